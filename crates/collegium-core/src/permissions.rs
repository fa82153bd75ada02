//! Permission constants for Collegium.
//!
//! This module provides centralized permission string constants for use across
//! the codebase. Using these constants instead of string literals ensures
//! consistency and makes refactoring easier. Permissions are opaque
//! identifiers; membership in a role's permission set is their only
//! relationship.
//!
//! # Example
//!
//! ```ignore
//! use collegium_core::{permissions, resolver};
//!
//! if resolver::has_permission(&roles, permissions::EVENTS_MANAGE) {
//!     // Show the create-event button
//! }
//! ```

// =============================================================================
// Assignments permissions
// =============================================================================

/// Permission to create and edit assignments
pub const ASSIGNMENTS_MANAGE: &str = "assignments:manage";
/// Permission to grade submitted assignments
pub const ASSIGNMENTS_GRADE: &str = "assignments:grade";

// =============================================================================
// Exams permissions
// =============================================================================

/// Permission to schedule and manage exams
pub const EXAMS_MANAGE: &str = "exams:manage";
/// Permission to enter exam marks
pub const EXAMS_ENTER_MARKS: &str = "exams:enter_marks";

// =============================================================================
// Fees permissions
// =============================================================================

/// Permission to manage fee structures
pub const FEES_MANAGE: &str = "fees:manage";
/// Permission to record fee payments
pub const FEES_RECORD_PAYMENTS: &str = "fees:record_payments";

// =============================================================================
// Library permissions
// =============================================================================

/// Permission to manage the library catalog and issue books
pub const LIBRARY_MANAGE: &str = "library:manage";

// =============================================================================
// Events permissions
// =============================================================================

/// Permission to create and edit campus events
pub const EVENTS_MANAGE: &str = "events:manage";
/// Permission to view campus events
pub const EVENTS_VIEW: &str = "events:view";

// =============================================================================
// Notices permissions
// =============================================================================

/// Permission to publish notices
pub const NOTICES_MANAGE: &str = "notices:manage";
/// Permission to view notices
pub const NOTICES_VIEW: &str = "notices:view";

// =============================================================================
// Lesson planner permissions
// =============================================================================

/// Permission to create and submit lesson planners
pub const PLANNER_SUBMIT: &str = "planner:submit";
/// Permission to approve or reject submitted lesson planners
pub const PLANNER_APPROVE: &str = "planner:approve";

// =============================================================================
// Work diary permissions
// =============================================================================

/// Permission to create and submit work diaries
pub const DIARY_SUBMIT: &str = "diary:submit";
/// Permission to approve submitted work diaries at the HOD stage
pub const DIARY_APPROVE_HOD: &str = "diary:approve_hod";
/// Permission to give work diaries their final, principal-stage approval
pub const DIARY_APPROVE_PRINCIPAL: &str = "diary:approve_principal";

// =============================================================================
// User management permissions
// =============================================================================

/// Permission to manage any user in the institution
pub const USERS_MANAGE_ALL: &str = "users:manage_all";
/// Permission to manage users within one's own department
pub const USERS_MANAGE_DEPARTMENT: &str = "users:manage_department";
/// Permission to assign and revoke roles
pub const USERS_ASSIGN_ROLES: &str = "users:assign_roles";

// =============================================================================
// Reception permissions
// =============================================================================

/// Permission to issue late passes at the front desk
pub const RECEPTION_LATE_PASS: &str = "reception:late_pass";
/// Permission to look up students by admission number
pub const RECEPTION_LOOKUP_STUDENTS: &str = "reception:lookup_students";

/// Every permission known to the system, in declaration order.
///
/// The `super_admin` role is seeded with this full set.
pub const ALL: &[&str] = &[
    ASSIGNMENTS_MANAGE,
    ASSIGNMENTS_GRADE,
    EXAMS_MANAGE,
    EXAMS_ENTER_MARKS,
    FEES_MANAGE,
    FEES_RECORD_PAYMENTS,
    LIBRARY_MANAGE,
    EVENTS_MANAGE,
    EVENTS_VIEW,
    NOTICES_MANAGE,
    NOTICES_VIEW,
    PLANNER_SUBMIT,
    PLANNER_APPROVE,
    DIARY_SUBMIT,
    DIARY_APPROVE_HOD,
    DIARY_APPROVE_PRINCIPAL,
    USERS_MANAGE_ALL,
    USERS_MANAGE_DEPARTMENT,
    USERS_ASSIGN_ROLES,
    RECEPTION_LATE_PASS,
    RECEPTION_LOOKUP_STUDENTS,
];
