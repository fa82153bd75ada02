//! Reception desk models and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::UserId;

/// Minimal student reference returned by the admission-number lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRef {
    pub student_id: UserId,
    pub admission_no: String,
    pub student_name: String,
}

/// DTO for issuing a late pass at the front desk.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LatePassRequest {
    #[validate(length(
        min = 1,
        max = 32,
        message = "Admission number must be between 1 and 32 characters"
    ))]
    pub admission_no: String,
    #[validate(length(max = 500, message = "Notes must not exceed 500 characters"))]
    pub notes: Option<String>,
}
