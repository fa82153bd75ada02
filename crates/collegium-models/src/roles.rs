//! User-role assignment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AssignmentId, UserId};

/// A user-role assignment row from the remote store.
///
/// A user may hold multiple simultaneous assignments. Only rows with
/// `active == true` feed permission resolution; revocation deactivates the
/// row rather than deleting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub id: AssignmentId,
    pub user_id: UserId,
    pub role_name: String,
    /// Department scoping for department-bound roles (e.g. HOD).
    pub department: Option<String>,
    pub active: bool,
    pub assigned_at: DateTime<Utc>,
    pub assigned_by: Option<UserId>,
}

impl RoleAssignment {
    /// Display name of the assigned role, falling back to the raw identifier.
    pub fn role_display_name(&self) -> &str {
        collegium_core::resolver::role_display_name(&self.role_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_name_fallback() {
        let assignment = RoleAssignment {
            id: AssignmentId::new(),
            user_id: UserId::new(),
            role_name: "hod".to_string(),
            department: Some("Physics".to_string()),
            active: true,
            assigned_at: Utc::now(),
            assigned_by: None,
        };
        assert_eq!(assignment.role_display_name(), "Head of Department");

        let unknown = RoleAssignment {
            role_name: "astronaut".to_string(),
            ..assignment
        };
        assert_eq!(unknown.role_display_name(), "astronaut");
    }
}
