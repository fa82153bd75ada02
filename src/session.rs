//! RBAC session over the remote store.
//!
//! [`RbacSession`] bridges the pure permission resolver to the signed-in
//! user: it fetches the user's active role assignments, resolves them into
//! effective permissions, and publishes the result through a watch channel
//! so gates and screens can react.
//!
//! While a fetch is in flight the session reads as [`SessionState::Loading`],
//! which callers must treat as "unknown", never as "denied" — otherwise a
//! denial would flash before data arrives. A failed fetch settles to an
//! empty role list: no roles, no permissions, every gate denies (fail
//! closed).

use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{instrument, warn};

use collegium_core::catalog::{Module, RoleDef};
use collegium_core::resolver;
use collegium_core::{ApprovalKind, ApprovalStage, ManageScope};
use collegium_models::UserId;
use collegium_store::DataService;

/// Table whose change notifications invalidate the session's role list.
const ROLE_ASSIGNMENTS_TABLE: &str = "user_roles";

/// A user's resolved authorization snapshot: role names plus the derived
/// permission set.
#[derive(Debug, Clone, Default)]
pub struct ResolvedAccess {
    roles: Vec<String>,
    permissions: BTreeSet<&'static str>,
}

impl ResolvedAccess {
    pub fn from_roles(roles: Vec<String>) -> Self {
        let permissions = resolver::user_permissions(&roles);
        Self { roles, permissions }
    }

    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    pub fn permissions(&self) -> &BTreeSet<&'static str> {
        &self.permissions
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_any_permission(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|p| self.has_permission(p))
    }

    pub fn can_access_module(&self, module: Module) -> bool {
        self.has_any_permission(module.permissions())
    }

    pub fn highest_role(&self) -> Option<&'static RoleDef> {
        resolver::highest_role(&self.roles)
    }

    pub fn highest_role_display(&self) -> &'static str {
        resolver::highest_role_display(&self.roles)
    }

    pub fn can_manage_users(&self, scope: ManageScope) -> bool {
        resolver::can_manage_users(&self.roles, scope)
    }

    pub fn can_approve(&self, kind: ApprovalKind, stage: ApprovalStage) -> bool {
        resolver::can_approve(&self.roles, kind, stage)
    }
}

/// Reactive state of the session's role resolution.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// The role fetch is in flight; permissions are unknown, not denied.
    Loading,
    Ready(ResolvedAccess),
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn access(&self) -> Option<&ResolvedAccess> {
        match self {
            Self::Loading => None,
            Self::Ready(access) => Some(access),
        }
    }
}

/// Per-user RBAC session. Create one at sign-in, drop it at logout.
pub struct RbacSession {
    user_id: UserId,
    store: Arc<dyn DataService>,
    tx: watch::Sender<SessionState>,
    /// Serializes fetches so a session has at most one in flight.
    fetch_lock: tokio::sync::Mutex<()>,
}

impl RbacSession {
    pub fn new(store: Arc<dyn DataService>, user_id: UserId) -> Self {
        let (tx, _) = watch::channel(SessionState::Loading);
        Self {
            user_id,
            store,
            tx,
            fetch_lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Current snapshot of the session state.
    pub fn state(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Fetch the user's active role assignments and publish the resolved
    /// access. Call after sign-in and after any action that may have changed
    /// one's own roles.
    ///
    /// A fetch failure is logged and settles the session on an empty role
    /// list, so every permission check denies until a later refresh
    /// succeeds.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn refresh_roles(&self) {
        let _guard = self.fetch_lock.lock().await;
        self.tx.send_replace(SessionState::Loading);

        let state = match self.store.active_role_assignments(self.user_id).await {
            Ok(assignments) => {
                let roles = assignments
                    .into_iter()
                    .filter(|a| a.active)
                    .map(|a| a.role_name)
                    .collect();
                SessionState::Ready(ResolvedAccess::from_roles(roles))
            }
            Err(err) => {
                warn!(error = %err, "role assignment fetch failed; denying all access");
                SessionState::Ready(ResolvedAccess::default())
            }
        };

        self.tx.send_replace(state);
    }

    /// Spawn a task that re-fetches roles whenever the role-assignment table
    /// reports a change on the feed. The task ends when the store's feed
    /// closes; abort the handle to detach earlier.
    pub fn watch_role_changes(self: &Arc<Self>) -> JoinHandle<()> {
        let session = Arc::clone(self);
        let mut changes = self.store.subscribe();
        tokio::spawn(async move {
            loop {
                match changes.recv().await {
                    Ok(change) if change.table == ROLE_ASSIGNMENTS_TABLE => {
                        session.refresh_roles().await;
                    }
                    Ok(_) => {}
                    // Missed notifications: re-fetch rather than reason about
                    // what was dropped.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        session.refresh_roles().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_access_derives_permissions() {
        let access = ResolvedAccess::from_roles(vec!["hod".to_string()]);
        assert!(access.has_permission(collegium_core::permissions::DIARY_APPROVE_HOD));
        assert!(!access.has_permission(collegium_core::permissions::FEES_MANAGE));
        assert_eq!(access.highest_role().unwrap().name, "hod");
    }

    #[test]
    fn test_default_access_denies_everything() {
        let access = ResolvedAccess::default();
        assert!(access.roles().is_empty());
        for p in collegium_core::permissions::ALL {
            assert!(!access.has_permission(p));
        }
        assert!(access.highest_role().is_none());
        assert_eq!(access.highest_role_display(), "No Role");
    }

    #[test]
    fn test_session_state_accessors() {
        assert!(SessionState::Loading.is_loading());
        assert!(SessionState::Loading.access().is_none());

        let ready = SessionState::Ready(ResolvedAccess::default());
        assert!(!ready.is_loading());
        assert!(ready.access().is_some());
    }
}
