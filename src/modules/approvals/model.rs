//! View-state types for the approval screens.

/// Outcome message surfaced to the approver after a decision attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The remote procedure accepted the decision.
    Success(String),
    /// Logical rejection from the procedure, or a transport failure.
    /// The message is shown verbatim; local state is left unchanged.
    Failure(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Failure(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
