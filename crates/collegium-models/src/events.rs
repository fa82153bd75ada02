//! Campus event models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{EventId, UserId};

/// A campus event as stored remotely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusEvent {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// DTO for creating an event.
///
/// Validation here is advisory; the remote store remains the authority and
/// may reject further.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewEvent {
    #[validate(length(
        min = 1,
        max = 200,
        message = "Title must be between 1 and 200 characters"
    ))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description must not exceed 2000 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 200, message = "Venue must not exceed 200 characters"))]
    pub venue: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
}

impl NewEvent {
    /// True when the end time, if given, does not precede the start time.
    pub fn schedule_is_ordered(&self) -> bool {
        self.ends_at.is_none_or(|end| end >= self.starts_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn draft() -> NewEvent {
        NewEvent {
            title: "Convocation".to_string(),
            description: None,
            venue: Some("Main Hall".to_string()),
            starts_at: Utc::now(),
            ends_at: None,
        }
    }

    #[test]
    fn test_new_event_validation() {
        assert!(draft().validate().is_ok());

        let empty_title = NewEvent {
            title: String::new(),
            ..draft()
        };
        assert!(empty_title.validate().is_err());

        let long_description = NewEvent {
            description: Some("x".repeat(2001)),
            ..draft()
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_schedule_ordering() {
        let open_ended = draft();
        assert!(open_ended.schedule_is_ordered());

        let mut ordered = draft();
        ordered.ends_at = Some(ordered.starts_at + TimeDelta::hours(2));
        assert!(ordered.schedule_is_ordered());

        let mut inverted = draft();
        inverted.ends_at = Some(inverted.starts_at - TimeDelta::hours(2));
        assert!(!inverted.schedule_is_ordered());
    }
}
