//! Approval workflow domain models.
//!
//! Lesson planners move through a single approval stage
//! (`draft → submitted → approved | rejected`); work diaries move through two
//! (`draft → submitted → hod_approved → principal_approved`, with rejection
//! possible from either pending stage). Transitions are forward-only except
//! explicit rejection, and terminal states admit no further transition.
//!
//! The transition tables here exist for display and tests. The remote
//! decision procedures remain the sole authority on whether a transition is
//! legal for a given user and item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{DiaryId, PlannerId, UserId};

/// Status of a lesson planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerStatus {
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl PlannerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Forward-only transition table, rejection only from `submitted`.
    pub fn can_transition(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::Approved)
                | (Self::Submitted, Self::Rejected)
        )
    }
}

/// Status of a work diary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiaryStatus {
    Draft,
    Submitted,
    HodApproved,
    PrincipalApproved,
    Rejected,
}

impl DiaryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::HodApproved => "hod_approved",
            Self::PrincipalApproved => "principal_approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PrincipalApproved | Self::Rejected)
    }

    /// Forward-only transition table, rejection from either pending stage.
    pub fn can_transition(from: Self, to: Self) -> bool {
        matches!(
            (from, to),
            (Self::Draft, Self::Submitted)
                | (Self::Submitted, Self::HodApproved)
                | (Self::Submitted, Self::Rejected)
                | (Self::HodApproved, Self::PrincipalApproved)
                | (Self::HodApproved, Self::Rejected)
        )
    }
}

/// Decision submitted to a remote approval procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

/// Discriminated result of a remote decision procedure.
///
/// A `success: false` outcome is a logical rejection ("not your turn to
/// approve"), not a transport error; callers surface `message` verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcOutcome {
    pub success: bool,
    pub message: String,
}

/// Lesson planner row as listed in the approval queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerSummary {
    pub id: PlannerId,
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub subject: String,
    pub week_start: NaiveDate,
    pub status: PlannerStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Full lesson planner payload.
///
/// `planned_topics` and `completed_topics` are surfaced as-is; their internal
/// schema belongs to the authoring screens, not this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPlanner {
    pub id: PlannerId,
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub subject: String,
    pub week_start: NaiveDate,
    pub status: PlannerStatus,
    pub planned_topics: serde_json::Value,
    pub completed_topics: serde_json::Value,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Work diary row as listed in the approval queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiarySummary {
    pub id: DiaryId,
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub department: Option<String>,
    pub diary_date: NaiveDate,
    pub status: DiaryStatus,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Full work diary payload with its opaque daily entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkDiary {
    pub id: DiaryId,
    pub teacher_id: UserId,
    pub teacher_name: String,
    pub department: Option<String>,
    pub diary_date: NaiveDate,
    pub status: DiaryStatus,
    pub entries: serde_json::Value,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}
