//! Pure permission resolution over role-name lists.
//!
//! Every function here is a total function over in-memory static tables:
//! unknown role names contribute no permissions, the empty role list denies
//! everything, and results are invariant under reordering or duplication of
//! the input.

use std::collections::BTreeSet;

use crate::catalog::{self, Module, RoleDef};
use crate::permissions as perm;

/// Scope of user-management authority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManageScope {
    /// Manage any user in the institution.
    All,
    /// Manage users within one's own department only.
    Department,
}

/// The two approval-bearing entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalKind {
    LessonPlanner,
    WorkDiary,
}

impl ApprovalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LessonPlanner => "lesson_planner",
            Self::WorkDiary => "work_diary",
        }
    }
}

/// Stage of an approval workflow. Lesson planners are single-stage, so both
/// stages resolve to the same permission for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalStage {
    First,
    Final,
}

/// Union of the permission sets of all given roles.
pub fn user_permissions<S: AsRef<str>>(roles: &[S]) -> BTreeSet<&'static str> {
    roles
        .iter()
        .filter_map(|name| catalog::role_def(name.as_ref()))
        .flat_map(|def| def.permissions.iter().copied())
        .collect()
}

/// True iff the resolved permission set contains `permission`.
pub fn has_permission<S: AsRef<str>>(roles: &[S], permission: &str) -> bool {
    roles
        .iter()
        .filter_map(|name| catalog::role_def(name.as_ref()))
        .any(|def| def.permissions.contains(&permission))
}

/// True iff the resolved permission set contains any of `permissions`.
pub fn has_any_permission<S: AsRef<str>>(roles: &[S], permissions: &[&str]) -> bool {
    permissions.iter().any(|p| has_permission(roles, p))
}

/// True iff any held role grants access to `module`.
pub fn can_access_module<S: AsRef<str>>(roles: &[S], module: Module) -> bool {
    has_any_permission(roles, module.permissions())
}

/// The most senior recognized role among `roles`, by the fixed precedence
/// order. `None` is the "no role" sentinel: no input, or nothing recognized.
pub fn highest_role<S: AsRef<str>>(roles: &[S]) -> Option<&'static RoleDef> {
    roles
        .iter()
        .filter_map(|name| catalog::role_def(name.as_ref()))
        .max_by_key(|def| def.rank)
}

/// Display name for the most senior role, or [`catalog::NO_ROLE_DISPLAY`].
pub fn highest_role_display<S: AsRef<str>>(roles: &[S]) -> &'static str {
    highest_role(roles).map_or(catalog::NO_ROLE_DISPLAY, |def| def.display_name)
}

/// Display name for a single role identifier, falling back to the raw
/// identifier when unmapped.
pub fn role_display_name(name: &str) -> &str {
    catalog::role_def(name).map_or(name, |def| def.display_name)
}

/// Convenience predicate over the user-management permissions.
pub fn can_manage_users<S: AsRef<str>>(roles: &[S], scope: ManageScope) -> bool {
    match scope {
        ManageScope::All => has_permission(roles, perm::USERS_MANAGE_ALL),
        ManageScope::Department => has_any_permission(
            roles,
            &[perm::USERS_MANAGE_ALL, perm::USERS_MANAGE_DEPARTMENT],
        ),
    }
}

/// Convenience predicate over the approval permissions.
pub fn can_approve<S: AsRef<str>>(roles: &[S], kind: ApprovalKind, stage: ApprovalStage) -> bool {
    let required = match (kind, stage) {
        (ApprovalKind::LessonPlanner, _) => perm::PLANNER_APPROVE,
        (ApprovalKind::WorkDiary, ApprovalStage::First) => perm::DIARY_APPROVE_HOD,
        (ApprovalKind::WorkDiary, ApprovalStage::Final) => perm::DIARY_APPROVE_PRINCIPAL,
    };
    has_permission(roles, required)
}
