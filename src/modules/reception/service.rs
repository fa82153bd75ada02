//! Front-desk operations backed by the reception remote procedures.

use std::sync::Arc;

use tracing::instrument;
use validator::Validate;

use collegium_core::permissions;
use collegium_models::{LatePassRequest, RpcOutcome, StudentRef};
use collegium_store::DataService;

use crate::session::ResolvedAccess;
use crate::utils::errors::AppError;

/// Screen-facing service for the reception module.
pub struct ReceptionDesk {
    store: Arc<dyn DataService>,
}

impl ReceptionDesk {
    pub fn new(store: Arc<dyn DataService>) -> Self {
        Self { store }
    }

    /// Issue a late pass through `reception_issue_late_pass`.
    ///
    /// The admission-number presence check is advisory; the procedure owns
    /// the actual rules (cutoff times, duplicate passes) and its outcome is
    /// surfaced verbatim.
    #[instrument(skip(self, access))]
    pub async fn issue_late_pass(
        &self,
        access: &ResolvedAccess,
        request: LatePassRequest,
    ) -> Result<RpcOutcome, AppError> {
        if !access.has_permission(permissions::RECEPTION_LATE_PASS) {
            return Err(AppError::forbidden(
                "You do not have permission to issue late passes.",
            ));
        }
        request.validate()?;

        Ok(self.store.issue_late_pass(&request).await?)
    }

    /// Look up a student by admission number.
    #[instrument(skip(self, access))]
    pub async fn find_student(
        &self,
        access: &ResolvedAccess,
        admission_no: &str,
    ) -> Result<Option<StudentRef>, AppError> {
        if !access.has_permission(permissions::RECEPTION_LOOKUP_STUDENTS) {
            return Err(AppError::forbidden(
                "You do not have permission to look up students.",
            ));
        }
        if admission_no.trim().is_empty() {
            return Err(AppError::validation(anyhow::anyhow!(
                "Admission number is required"
            )));
        }

        Ok(self.store.student_by_admission_no(admission_no.trim()).await?)
    }
}
