//! Lesson-planner and work-diary approval workflow.
//!
//! Approvers see a queue of items pending *their* decision, inspect one, and
//! submit an approve/reject decision to a remote procedure. The procedure is
//! the sole authority on whether the transition is legal; the screens only
//! choose which statuses to list and surface the procedure's outcome.

pub mod controller;
pub mod model;
pub mod service;

pub use controller::ApprovalScreen;
pub use model::Feedback;
pub use service::{ApprovalFlow, DiaryFlow, PlannerFlow};
