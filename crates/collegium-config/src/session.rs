//! Session and list-query tuning.
//!
//! # Configuration
//!
//! - `COLLEGIUM_PAGE_SIZE`: fixed first-page bound for list queries
//!   (default: 20)

/// Tuning knobs for the RBAC session and screen list queries.
///
/// Every list in the client is bounded to `page_size` rows, most recent
/// first; there is no pagination beyond the first page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub page_size: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { page_size: 20 }
    }
}

impl SessionConfig {
    /// Creates a new `SessionConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            page_size: std::env::var("COLLEGIUM_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(20),
        }
    }
}
