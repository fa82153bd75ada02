//! View-state types for the events screen.

/// What the events screen is currently showing.
///
/// `TableMissing` is the distinct "backend not migrated" informational
/// state; it is not a retryable failure and the list reads as empty. A
/// `Failed` fetch leaves the previously loaded list untouched behind a
/// retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventsStatus {
    Loading,
    Denied { message: String },
    Ready,
    TableMissing,
    Failed { message: String },
}
