//! # Collegium Store
//!
//! Client for the managed backend the college-management app runs against.
//!
//! The backend is an external collaborator reached over three surfaces:
//! row queries and mutations under `/rest/v1` (with column projection,
//! equality/`in`/range filters, ordering and limits), remote procedures
//! under `/rest/v1/rpc` and `/functions/v1` that own the business rules the
//! client never re-implements, and a per-table change feed that triggers
//! full re-fetches on the client.
//!
//! The application layer depends on the [`DataService`] trait, not on a
//! concrete transport: [`RestService`] talks to the real backend via
//! [`RestClient`], while [`MemoryService`] is a HashMap-backed double with
//! failure injection for tests.

pub mod error;
pub mod feed;
pub mod memory;
pub mod query;
pub mod rest;
pub mod service;

pub use error::{StoreError, StoreResult, TABLE_MISSING_CODE};
pub use feed::{ChangeFeed, ChangeKind, TableChange};
pub use memory::MemoryService;
pub use query::{Order, SelectQuery};
pub use rest::{RestClient, RestService};
pub use service::DataService;
