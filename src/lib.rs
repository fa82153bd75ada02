//! # Collegium
//!
//! The authorization layer of a college-management client: a thin, testable
//! core sitting between screens and a managed remote backend.
//!
//! ## Overview
//!
//! Collegium resolves a user's remote role assignments into effective
//! permissions, gates screen subtrees on those permissions, and drives the
//! lesson-planner / work-diary approval workflow:
//!
//! - **RBAC session**: fetches active role assignments for the signed-in
//!   user and exposes resolved permissions reactively; failures fail closed
//! - **Access gate**: declaratively shows loading, denied, or granted for a
//!   subtree based on permission, module, or role requirements
//! - **Approval workflow**: pending queues, detail inspection, and
//!   approve/reject decisions delegated to remote procedures
//! - **Screen services**: events, user-role administration, reception desk
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── session.rs        # RBAC session over the remote store
//! ├── gate.rs           # view-level access gate
//! ├── state.rs          # explicit application state (no singletons)
//! ├── logging.rs        # console tracing setup
//! ├── modules/          # feature modules
//! │   ├── approvals/   # planner/diary approval queues and decisions
//! │   ├── events/      # campus events screen
//! │   ├── users/       # user-role administration
//! │   └── reception/   # late passes and student lookup
//! └── utils/            # shared utilities
//! ```
//!
//! Business rules beyond permission gating (who may approve what, whether a
//! transition is legal) live in the backend's remote procedures; this crate
//! surfaces their outcomes and never re-implements them.

pub mod gate;
pub mod logging;
pub mod modules;
pub mod session;
pub mod state;
pub mod utils;

pub use gate::{AccessGate, GateOutcome, GateView};
pub use session::{RbacSession, ResolvedAccess, SessionState};
pub use state::AppState;
pub use utils::errors::{AppError, ErrorKind};
