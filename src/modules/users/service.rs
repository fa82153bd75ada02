//! Role assignment, revocation, and the per-target scope check.
//!
//! The admin edge function owns the actual assignment rules; the checks here
//! only decide what the management screens offer. Revocation deactivates the
//! assignment row — assignments are never hard deleted.

use std::sync::Arc;

use tracing::instrument;

use collegium_core::{ManageScope, resolver};
use collegium_models::{AdminOutcome, AssignmentId, ManagedUser, RoleChange};
use collegium_store::DataService;

use crate::session::ResolvedAccess;
use crate::utils::errors::AppError;

/// Whether this manager may act on `target`.
///
/// All-scope managers act on anyone. Department-scope managers act only on
/// users in their own department whose highest role ranks strictly below
/// their own — a department admin cannot manage a peer admin or anyone
/// above.
pub fn can_manage_target(
    access: &ResolvedAccess,
    my_department: Option<&str>,
    target: &ManagedUser,
) -> bool {
    if access.can_manage_users(ManageScope::All) {
        return true;
    }
    if !access.can_manage_users(ManageScope::Department) {
        return false;
    }

    let same_department = match (my_department, target.department.as_deref()) {
        (Some(mine), Some(theirs)) => mine == theirs,
        _ => false,
    };
    if !same_department {
        return false;
    }

    let my_rank = access.highest_role().map_or(0, |def| def.rank);
    let target_rank = resolver::highest_role(&target.role_names).map_or(0, |def| def.rank);
    target_rank < my_rank
}

/// Screen-facing service for the user-management module.
pub struct UserAdmin {
    store: Arc<dyn DataService>,
    page_size: u32,
}

impl UserAdmin {
    pub fn new(store: Arc<dyn DataService>, page_size: u32) -> Self {
        Self { store, page_size }
    }

    /// Users this manager may see: everyone for all-scope managers, their
    /// own department otherwise.
    #[instrument(skip(self, access))]
    pub async fn list_users(
        &self,
        access: &ResolvedAccess,
        my_department: Option<&str>,
    ) -> Result<Vec<ManagedUser>, AppError> {
        if access.can_manage_users(ManageScope::All) {
            return Ok(self.store.managed_users(None, self.page_size).await?);
        }
        if access.can_manage_users(ManageScope::Department) {
            let department = my_department.ok_or_else(|| {
                AppError::forbidden("Department managers must belong to a department.")
            })?;
            return Ok(self
                .store
                .managed_users(Some(department), self.page_size)
                .await?);
        }
        Err(AppError::forbidden(
            "You do not have permission to manage users.",
        ))
    }

    /// Assign a role to a target user via the admin edge function.
    ///
    /// The function's outcome is surfaced as-is: an `ok: false` result is a
    /// logical rejection from the backend, not a transport error.
    #[instrument(skip(self, access, target))]
    pub async fn assign_role(
        &self,
        access: &ResolvedAccess,
        my_department: Option<&str>,
        target: &ManagedUser,
        role_name: &str,
        department: Option<&str>,
    ) -> Result<AdminOutcome, AppError> {
        if !can_manage_target(access, my_department, target) {
            return Err(AppError::forbidden(
                "You do not have permission to manage this user.",
            ));
        }

        let change = RoleChange {
            user_id: target.id,
            role_name: role_name.to_string(),
            department: department.map(str::to_string),
        };
        Ok(self.store.change_user_role(&change).await?)
    }

    /// Revoke an assignment by deactivating it.
    #[instrument(skip(self, access, target))]
    pub async fn revoke_assignment(
        &self,
        access: &ResolvedAccess,
        my_department: Option<&str>,
        target: &ManagedUser,
        assignment: AssignmentId,
    ) -> Result<(), AppError> {
        if !can_manage_target(access, my_department, target) {
            return Err(AppError::forbidden(
                "You do not have permission to manage this user.",
            ));
        }

        Ok(self.store.deactivate_role_assignment(assignment).await?)
    }
}
