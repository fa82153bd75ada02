//! # Collegium Core
//!
//! Static role-based access control data and the pure permission resolver.
//!
//! This crate holds the seeded reference data of the RBAC layer — permission
//! identifiers, the role catalog with its precedence order, and the feature
//! modules — plus the pure functions that resolve a user's role names into
//! effective permissions. Nothing in here performs I/O or can fail: unknown
//! role names simply contribute no permissions, and an empty role list denies
//! everything.
//!
//! # Example
//!
//! ```
//! use collegium_core::{permissions, resolver};
//!
//! let roles = vec!["hod".to_string(), "teacher".to_string()];
//!
//! assert!(resolver::has_permission(&roles, permissions::DIARY_APPROVE_HOD));
//! assert!(!resolver::has_permission(&roles, permissions::FEES_MANAGE));
//! assert_eq!(resolver::highest_role(&roles).unwrap().name, "hod");
//! ```

pub mod catalog;
pub mod permissions;
pub mod resolver;

pub use catalog::{Module, RoleCategory, RoleDef};
pub use resolver::{ApprovalKind, ApprovalStage, ManageScope};
