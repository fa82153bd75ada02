//! Seeded role catalog and feature modules.
//!
//! Roles are immutable reference data: each entry maps a role identifier to a
//! display name, a category, a precedence rank, and its permission set. The
//! catalog is not user-editable at runtime; role *assignments* live in the
//! remote store, this table only gives them meaning.
//!
//! Precedence is an explicit total order over the `rank` field (higher rank =
//! more senior). Ranks are unique, so `highest_role` never has to break ties.

use crate::permissions as perm;

/// Broad grouping of roles, used for display and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleCategory {
    Admin,
    Academic,
    Operations,
    Student,
}

/// A seeded role definition.
#[derive(Debug, Clone, Copy)]
pub struct RoleDef {
    /// Stable role identifier as stored in role assignments.
    pub name: &'static str,
    /// Human-readable name for screens.
    pub display_name: &'static str,
    pub category: RoleCategory,
    /// Position in the fixed precedence order; higher is more senior.
    pub rank: u8,
    /// Permissions granted by holding this role.
    pub permissions: &'static [&'static str],
}

/// Display fallback when a user holds no recognized role.
pub const NO_ROLE_DISPLAY: &str = "No Role";

/// All seeded roles, ordered by descending precedence.
pub const ROLES: &[RoleDef] = &[
    RoleDef {
        name: "super_admin",
        display_name: "Super Admin",
        category: RoleCategory::Admin,
        rank: 90,
        permissions: perm::ALL,
    },
    RoleDef {
        name: "principal",
        display_name: "Principal",
        category: RoleCategory::Admin,
        rank: 80,
        permissions: &[
            perm::DIARY_APPROVE_PRINCIPAL,
            perm::PLANNER_APPROVE,
            perm::EXAMS_MANAGE,
            perm::EVENTS_MANAGE,
            perm::EVENTS_VIEW,
            perm::NOTICES_MANAGE,
            perm::NOTICES_VIEW,
            perm::USERS_MANAGE_ALL,
            perm::USERS_ASSIGN_ROLES,
        ],
    },
    RoleDef {
        name: "department_admin",
        display_name: "Department Admin",
        category: RoleCategory::Admin,
        rank: 70,
        permissions: &[
            perm::USERS_MANAGE_DEPARTMENT,
            perm::USERS_ASSIGN_ROLES,
            perm::EVENTS_MANAGE,
            perm::EVENTS_VIEW,
            perm::NOTICES_MANAGE,
            perm::NOTICES_VIEW,
        ],
    },
    RoleDef {
        name: "hod",
        display_name: "Head of Department",
        category: RoleCategory::Academic,
        rank: 60,
        permissions: &[
            perm::DIARY_APPROVE_HOD,
            perm::PLANNER_APPROVE,
            perm::PLANNER_SUBMIT,
            perm::DIARY_SUBMIT,
            perm::ASSIGNMENTS_MANAGE,
            perm::ASSIGNMENTS_GRADE,
            perm::EXAMS_ENTER_MARKS,
            perm::EVENTS_VIEW,
            perm::NOTICES_VIEW,
        ],
    },
    RoleDef {
        name: "teacher",
        display_name: "Teacher",
        category: RoleCategory::Academic,
        rank: 50,
        permissions: &[
            perm::PLANNER_SUBMIT,
            perm::DIARY_SUBMIT,
            perm::ASSIGNMENTS_MANAGE,
            perm::ASSIGNMENTS_GRADE,
            perm::EXAMS_ENTER_MARKS,
            perm::EVENTS_VIEW,
            perm::NOTICES_VIEW,
        ],
    },
    RoleDef {
        name: "accountant",
        display_name: "Accountant",
        category: RoleCategory::Operations,
        rank: 40,
        permissions: &[perm::FEES_MANAGE, perm::FEES_RECORD_PAYMENTS, perm::NOTICES_VIEW],
    },
    RoleDef {
        name: "librarian",
        display_name: "Librarian",
        category: RoleCategory::Operations,
        rank: 30,
        permissions: &[perm::LIBRARY_MANAGE, perm::NOTICES_VIEW],
    },
    RoleDef {
        name: "receptionist",
        display_name: "Receptionist",
        category: RoleCategory::Operations,
        rank: 20,
        permissions: &[
            perm::RECEPTION_LATE_PASS,
            perm::RECEPTION_LOOKUP_STUDENTS,
            perm::NOTICES_VIEW,
        ],
    },
    RoleDef {
        name: "student",
        display_name: "Student",
        category: RoleCategory::Student,
        rank: 10,
        permissions: &[perm::EVENTS_VIEW, perm::NOTICES_VIEW],
    },
];

/// Look up a role definition by identifier.
///
/// Unknown names return `None`; they are never an error.
pub fn role_def(name: &str) -> Option<&'static RoleDef> {
    ROLES.iter().find(|r| r.name == name)
}

/// A named feature area of the application.
///
/// Module access is derived from permissions: a module is accessible iff the
/// user holds any permission in the module's set. There is no separate
/// role-to-module table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Assignments,
    Exams,
    Fees,
    Library,
    Events,
    Notices,
    PlannerDiary,
    Reception,
    UserManagement,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assignments => "assignments",
            Self::Exams => "exams",
            Self::Fees => "fees",
            Self::Library => "library",
            Self::Events => "events",
            Self::Notices => "notices",
            Self::PlannerDiary => "planner-diary",
            Self::Reception => "reception",
            Self::UserManagement => "user-management",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Assignments => "Assignments",
            Self::Exams => "Exams",
            Self::Fees => "Fees",
            Self::Library => "Library",
            Self::Events => "Events",
            Self::Notices => "Notices",
            Self::PlannerDiary => "Planner & Diary",
            Self::Reception => "Reception",
            Self::UserManagement => "User Management",
        }
    }

    /// Permissions that grant access to this module. Holding any one suffices.
    pub fn permissions(&self) -> &'static [&'static str] {
        match self {
            Self::Assignments => &[perm::ASSIGNMENTS_MANAGE, perm::ASSIGNMENTS_GRADE],
            Self::Exams => &[perm::EXAMS_MANAGE, perm::EXAMS_ENTER_MARKS],
            Self::Fees => &[perm::FEES_MANAGE, perm::FEES_RECORD_PAYMENTS],
            Self::Library => &[perm::LIBRARY_MANAGE],
            Self::Events => &[perm::EVENTS_MANAGE, perm::EVENTS_VIEW],
            Self::Notices => &[perm::NOTICES_MANAGE, perm::NOTICES_VIEW],
            Self::PlannerDiary => &[
                perm::PLANNER_SUBMIT,
                perm::PLANNER_APPROVE,
                perm::DIARY_SUBMIT,
                perm::DIARY_APPROVE_HOD,
                perm::DIARY_APPROVE_PRINCIPAL,
            ],
            Self::Reception => &[perm::RECEPTION_LATE_PASS, perm::RECEPTION_LOOKUP_STUDENTS],
            Self::UserManagement => &[
                perm::USERS_MANAGE_ALL,
                perm::USERS_MANAGE_DEPARTMENT,
                perm::USERS_ASSIGN_ROLES,
            ],
        }
    }
}
