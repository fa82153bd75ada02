//! The events screen controller.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::anyhow;
use tracing::{instrument, warn};

use collegium_core::catalog::Module;
use collegium_core::permissions;
use collegium_models::{CampusEvent, EventId, NewEvent, UserId};
use collegium_store::DataService;
use validator::Validate;

use crate::gate::{AccessGate, GateOutcome};
use crate::session::SessionState;
use crate::utils::errors::AppError;

use super::model::EventsStatus;

/// Generic failure shown when the events list cannot be fetched. The
/// previously loaded list stays on screen behind a retry affordance.
pub const EVENTS_LOAD_FAILED_MESSAGE: &str = "Could not load events. Try again.";

struct View {
    events: Vec<CampusEvent>,
    status: EventsStatus,
    saving: bool,
}

/// List and creation state for the events screen, gated on the Events
/// module.
pub struct EventsScreen {
    store: Arc<dyn DataService>,
    page_size: u32,
    gate: AccessGate,
    view: Mutex<View>,
}

impl EventsScreen {
    pub fn new(store: Arc<dyn DataService>, page_size: u32) -> Self {
        Self {
            store,
            page_size,
            gate: AccessGate::for_module(Module::Events),
            view: Mutex::new(View {
                events: Vec::new(),
                status: EventsStatus::Loading,
                saving: false,
            }),
        }
    }

    fn view(&self) -> MutexGuard<'_, View> {
        self.view.lock().expect("events view lock poisoned")
    }

    pub fn events(&self) -> Vec<CampusEvent> {
        self.view().events.clone()
    }

    pub fn status(&self) -> EventsStatus {
        self.view().status.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.view().saving
    }

    /// True when the create-event affordance should be visible: the screen
    /// is resolved and the user holds the manage permission.
    pub fn can_create(&self, state: &SessionState) -> bool {
        state
            .access()
            .is_some_and(|access| access.has_permission(permissions::EVENTS_MANAGE))
    }

    /// Resolve the gate and, when granted, fetch the list.
    #[instrument(skip_all)]
    pub async fn load(&self, state: &SessionState) -> Result<(), AppError> {
        match self.gate.evaluate(state) {
            GateOutcome::Loading => {
                self.view().status = EventsStatus::Loading;
                Ok(())
            }
            GateOutcome::Denied => {
                let message = self.gate.denial_text().unwrap_or_default().to_string();
                let mut view = self.view();
                view.events.clear();
                view.status = EventsStatus::Denied { message };
                Ok(())
            }
            GateOutcome::Granted => self.fetch_list().await,
        }
    }

    async fn fetch_list(&self) -> Result<(), AppError> {
        let result = self.store.events(self.page_size).await;
        match result {
            Ok(events) => {
                let mut view = self.view();
                view.events = events;
                view.status = EventsStatus::Ready;
                Ok(())
            }
            Err(err) if err.is_table_missing() => {
                let mut view = self.view();
                view.events.clear();
                view.status = EventsStatus::TableMissing;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "events fetch failed");
                self.view().status = EventsStatus::Failed {
                    message: EVENTS_LOAD_FAILED_MESSAGE.to_string(),
                };
                Err(err.into())
            }
        }
    }

    /// Create an event and re-fetch the list.
    ///
    /// Validation here is advisory (field lengths, schedule ordering); the
    /// backend may still reject the insert.
    #[instrument(skip_all)]
    pub async fn create(
        &self,
        state: &SessionState,
        event: NewEvent,
        created_by: UserId,
    ) -> Result<CampusEvent, AppError> {
        let Some(access) = state.access() else {
            return Err(AppError::forbidden("Permissions are still resolving."));
        };
        if !access.has_permission(permissions::EVENTS_MANAGE) {
            return Err(AppError::forbidden(
                "You do not have permission to manage events.",
            ));
        }
        event.validate()?;
        if !event.schedule_is_ordered() {
            return Err(AppError::validation(anyhow!(
                "Event end time must not precede its start time"
            )));
        }

        self.view().saving = true;
        let result = self.store.create_event(&event, created_by).await;
        self.view().saving = false;

        let created = result?;
        self.fetch_list().await?;
        Ok(created)
    }

    /// Delete an event and re-fetch the list.
    #[instrument(skip_all, fields(event_id = %id))]
    pub async fn delete(&self, state: &SessionState, id: EventId) -> Result<(), AppError> {
        let Some(access) = state.access() else {
            return Err(AppError::forbidden("Permissions are still resolving."));
        };
        if !access.has_permission(permissions::EVENTS_MANAGE) {
            return Err(AppError::forbidden(
                "You do not have permission to manage events.",
            ));
        }

        self.view().saving = true;
        let result = self.store.delete_event(id).await;
        self.view().saving = false;

        result?;
        self.fetch_list().await
    }
}
