//! View-level access gate.
//!
//! An [`AccessGate`] declaratively decides whether a screen subtree renders,
//! based on the resolved session state and up to three requirement
//! categories: an any-of permission set, a module, and an any-of role set.
//! Categories that are not supplied are vacuously satisfied; all supplied
//! categories must pass.
//!
//! Evaluation yields exactly one of three outcomes. While the session is
//! still resolving the outcome is always [`GateOutcome::Loading`],
//! regardless of requirements — rendering a denial before roles arrive
//! would flash "no access" at authorized users.

use collegium_core::catalog::Module;

use crate::session::SessionState;

/// The three possible render outcomes of a gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Loading,
    Denied,
    Granted,
}

/// What a host shell should render for a gated subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateView {
    /// Show a progress affordance (or nothing, when the gate opted out).
    Loading { indicator: bool },
    /// Show the fallback element if configured, else the denial message,
    /// else nothing.
    Denied { message: Option<String> },
    /// Render the children.
    Granted,
}

/// Declarative requirements plus presentation options for one gated subtree.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    any_permission: Vec<String>,
    module: Option<Module>,
    any_role: Vec<String>,
    hide_loading_indicator: bool,
    denied_message: Option<String>,
    fallback: Option<String>,
}

impl AccessGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate on module access with the standard denial message for that
    /// module.
    pub fn for_module(module: Module) -> Self {
        Self::new().require_module(module).with_denied_message(format!(
            "You do not have permission to access {}.",
            module.display_name()
        ))
    }

    /// Require any one of the given permissions.
    pub fn require_any_permission<S: Into<String>>(
        mut self,
        permissions: impl IntoIterator<Item = S>,
    ) -> Self {
        self.any_permission
            .extend(permissions.into_iter().map(Into::into));
        self
    }

    pub fn require_permission(self, permission: impl Into<String>) -> Self {
        self.require_any_permission([permission.into()])
    }

    pub fn require_module(mut self, module: Module) -> Self {
        self.module = Some(module);
        self
    }

    /// Require any one of the given roles.
    pub fn require_any_role<S: Into<String>>(mut self, roles: impl IntoIterator<Item = S>) -> Self {
        self.any_role.extend(roles.into_iter().map(Into::into));
        self
    }

    pub fn with_denied_message(mut self, message: impl Into<String>) -> Self {
        self.denied_message = Some(message.into());
        self
    }

    /// Custom fallback element shown instead of the denial message.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Render nothing instead of a progress affordance while resolving.
    pub fn without_loading_indicator(mut self) -> Self {
        self.hide_loading_indicator = true;
        self
    }

    /// The message shown when denied: the fallback if configured, else the
    /// denial message, else nothing.
    pub fn denial_text(&self) -> Option<&str> {
        self.fallback
            .as_deref()
            .or(self.denied_message.as_deref())
    }

    /// Evaluate the gate against the current session state. Returns exactly
    /// one outcome.
    pub fn evaluate(&self, state: &SessionState) -> GateOutcome {
        let Some(access) = state.access() else {
            return GateOutcome::Loading;
        };

        let permissions_ok = self.any_permission.is_empty()
            || self
                .any_permission
                .iter()
                .any(|p| access.has_permission(p));
        let module_ok = self.module.is_none_or(|m| access.can_access_module(m));
        let roles_ok = self.any_role.is_empty()
            || self
                .any_role
                .iter()
                .any(|r| access.roles().contains(r));

        if permissions_ok && module_ok && roles_ok {
            GateOutcome::Granted
        } else {
            GateOutcome::Denied
        }
    }

    /// Evaluate and resolve presentation options for the host shell.
    pub fn render(&self, state: &SessionState) -> GateView {
        match self.evaluate(state) {
            GateOutcome::Loading => GateView::Loading {
                indicator: !self.hide_loading_indicator,
            },
            GateOutcome::Denied => GateView::Denied {
                message: self.denial_text().map(str::to_string),
            },
            GateOutcome::Granted => GateView::Granted,
        }
    }
}
