//! User administration models and DTOs.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Summary of a user as seen by the user-management screens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagedUser {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub department: Option<String>,
    /// Names of this user's active roles.
    pub role_names: Vec<String>,
}

/// Request payload for the admin role-management edge function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleChange {
    pub user_id: UserId,
    pub role_name: String,
    pub department: Option<String>,
}

/// Result envelope returned by the user-management edge functions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminOutcome {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}
