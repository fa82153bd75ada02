//! The approval screen controller.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use tracing::{instrument, warn};

use collegium_models::Decision;
use collegium_store::DataService;

use crate::session::ResolvedAccess;
use crate::utils::errors::AppError;

use super::model::Feedback;
use super::service::ApprovalFlow;

/// Generic failure surfaced when a decision cannot reach the backend. The
/// in-progress reason text is preserved so nothing is lost on retry.
pub const DECISION_FAILED_MESSAGE: &str =
    "Could not submit the decision. Check your connection and try again.";

struct View<F: ApprovalFlow> {
    items: Vec<F::Summary>,
    selected: Option<F::Detail>,
    reason: String,
    feedback: Option<Feedback>,
    loading: bool,
    saving: bool,
}

impl<F: ApprovalFlow> Default for View<F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected: None,
            reason: String::new(),
            feedback: None,
            loading: false,
            saving: false,
        }
    }
}

/// List / detail / decision state for one approval queue.
///
/// Detail selection is guarded by a monotonically increasing request token:
/// when a second item is selected while the first fetch is still in flight,
/// the earlier response is discarded instead of overwriting the newer
/// selection.
pub struct ApprovalScreen<F: ApprovalFlow> {
    store: Arc<dyn DataService>,
    page_size: u32,
    view: Mutex<View<F>>,
    detail_seq: AtomicU64,
}

impl<F: ApprovalFlow> ApprovalScreen<F> {
    pub fn new(store: Arc<dyn DataService>, page_size: u32) -> Self {
        Self {
            store,
            page_size,
            view: Mutex::new(View::default()),
            detail_seq: AtomicU64::new(0),
        }
    }

    fn view(&self) -> MutexGuard<'_, View<F>> {
        self.view.lock().expect("approval view lock poisoned")
    }

    pub fn items(&self) -> Vec<F::Summary> {
        self.view().items.clone()
    }

    pub fn selected(&self) -> Option<F::Detail> {
        self.view().selected.clone()
    }

    pub fn reason(&self) -> String {
        self.view().reason.clone()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.view().feedback.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.view().loading
    }

    pub fn is_saving(&self) -> bool {
        self.view().saving
    }

    pub fn set_reason(&self, text: impl Into<String>) {
        self.view().reason = text.into();
    }

    pub fn clear_selection(&self) {
        self.view().selected = None;
    }

    /// Re-fetch the pending queue for this approver.
    ///
    /// On failure the current items are left untouched and the caller gets
    /// the error to surface with a retry affordance.
    #[instrument(skip_all, fields(kind = F::KIND.as_str()))]
    pub async fn refresh(&self, access: &ResolvedAccess) -> Result<(), AppError> {
        self.view().loading = true;
        let result = F::list_pending(self.store.as_ref(), access, self.page_size).await;
        self.view().loading = false;

        match result {
            Ok(items) => {
                self.view().items = items;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "pending list fetch failed");
                Err(err.into())
            }
        }
    }

    /// Fetch and show one item. Selecting again while a fetch is outstanding
    /// supersedes it: whichever selection is newest wins, regardless of
    /// response arrival order.
    #[instrument(skip(self), fields(kind = F::KIND.as_str()))]
    pub async fn select(&self, id: F::Id) -> Result<(), AppError> {
        let token = self.detail_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let result = F::detail(self.store.as_ref(), id).await;

        if self.detail_seq.load(Ordering::SeqCst) != token {
            // A newer selection superseded this fetch; drop the response.
            return Ok(());
        }

        match result {
            Ok(Some(detail)) => {
                let mut view = self.view();
                view.selected = Some(detail);
                view.feedback = None;
                Ok(())
            }
            Ok(None) => {
                self.clear_selection();
                Err(AppError::not_found(anyhow!("Item no longer exists")))
            }
            Err(err) => {
                warn!(error = %err, "detail fetch failed");
                Err(err.into())
            }
        }
    }

    /// Submit a decision for the selected item.
    ///
    /// The remote procedure decides whether the transition is legal. On
    /// `success: true` the selection and reason are cleared and the queue is
    /// re-fetched. On a logical rejection the message is surfaced verbatim
    /// and nothing else changes. On a transport failure a generic message is
    /// surfaced and the reason text is preserved for retry.
    #[instrument(skip(self, access), fields(kind = F::KIND.as_str()))]
    pub async fn decide(
        &self,
        access: &ResolvedAccess,
        decision: Decision,
    ) -> Result<(), AppError> {
        let (id, reason) = {
            let view = self.view();
            let Some(detail) = &view.selected else {
                return Err(AppError::validation(anyhow!("No item selected")));
            };
            let reason = view.reason.trim();
            (
                F::detail_id(detail),
                (!reason.is_empty()).then(|| reason.to_string()),
            )
        };

        self.view().saving = true;
        let result = F::decide(self.store.as_ref(), id, decision, reason.as_deref()).await;
        self.view().saving = false;

        match result {
            Ok(outcome) if outcome.success => {
                {
                    let mut view = self.view();
                    view.selected = None;
                    view.reason.clear();
                    view.feedback = Some(Feedback::Success(outcome.message));
                }
                self.refresh(access).await
            }
            Ok(outcome) => {
                self.view().feedback = Some(Feedback::Failure(outcome.message));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "decision submission failed");
                self.view().feedback =
                    Some(Feedback::Failure(DECISION_FAILED_MESSAGE.to_string()));
                Err(err.into())
            }
        }
    }
}
