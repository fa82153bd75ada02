//! # Collegium Models
//!
//! Domain models and DTOs shared across the Collegium crates.
//!
//! Every remote payload is decoded into one of these types at the store
//! boundary, so the resolver, gates, and screen controllers only ever see
//! validated domain data. Structured approval payloads (planned topics,
//! daily entries) are carried as opaque JSON values: the client surfaces
//! them but never interprets their internal schema.

pub mod approvals;
pub mod events;
pub mod ids;
pub mod reception;
pub mod roles;
pub mod users;

pub use approvals::{
    Decision, DiaryStatus, DiarySummary, LessonPlanner, PlannerStatus, PlannerSummary, RpcOutcome,
    WorkDiary,
};
pub use events::{CampusEvent, NewEvent};
pub use ids::{AssignmentId, DiaryId, EventId, PlannerId, UserId};
pub use reception::{LatePassRequest, StudentRef};
pub use roles::RoleAssignment;
pub use users::{AdminOutcome, ManagedUser, RoleChange};
