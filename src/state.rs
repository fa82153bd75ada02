use std::sync::Arc;

use collegium_config::{BackendConfig, SessionConfig};
use collegium_store::{DataService, RestService};

use crate::utils::errors::AppError;

/// Application-wide dependencies, built once at session start and passed
/// explicitly to whatever needs them. Dropping the state at logout tears
/// everything down; there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DataService>,
    pub session_config: SessionConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn DataService>, session_config: SessionConfig) -> Self {
        Self {
            store,
            session_config,
        }
    }
}

/// Build the application state against the real backend, reading
/// configuration from the environment.
pub fn init_app_state() -> Result<AppState, AppError> {
    dotenvy::dotenv().ok();

    let backend_config = BackendConfig::from_env();
    let store = RestService::new(backend_config)?;

    Ok(AppState::new(Arc::new(store), SessionConfig::from_env()))
}
