//! Remote data-service connection configuration.
//!
//! The client talks to a managed backend exposing row queries under
//! `/rest/v1` and remote procedures under `/rest/v1/rpc`. All requests carry
//! the project API key.
//!
//! # Configuration
//!
//! - `COLLEGIUM_BACKEND_URL`: base URL of the backend project
//! - `COLLEGIUM_API_KEY`: project API key sent with every request
//! - `COLLEGIUM_DB_SCHEMA`: exposed schema name (default: "public")
//! - `COLLEGIUM_HTTP_TIMEOUT_SECS`: per-request timeout (default: 15)

/// Connection settings for the remote data service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Base URL of the backend project, without a trailing slash.
    pub base_url: String,

    /// Project API key sent in the `apikey` and `Authorization` headers.
    pub api_key: String,

    /// Exposed schema the row endpoints are served from.
    pub schema: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: String::new(),
            schema: "public".to_string(),
            timeout_secs: 15,
        }
    }
}

impl BackendConfig {
    /// Creates a new `BackendConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("COLLEGIUM_BACKEND_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            api_key: std::env::var("COLLEGIUM_API_KEY").unwrap_or(defaults.api_key),
            schema: std::env::var("COLLEGIUM_DB_SCHEMA").unwrap_or(defaults.schema),
            timeout_secs: std::env::var("COLLEGIUM_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Row endpoint for a table, e.g. `{base}/rest/v1/user_roles`.
    #[must_use]
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Remote procedure endpoint, e.g. `{base}/rest/v1/rpc/approve_work_diary`.
    #[must_use]
    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    /// Edge function endpoint, e.g. `{base}/functions/v1/admin-manage-user`.
    #[must_use]
    pub fn function_url(&self, function: &str) -> String {
        format!("{}/functions/v1/{}", self.base_url, function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendConfig::default();
        assert_eq!(config.schema, "public");
        assert_eq!(config.timeout_secs, 15);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_endpoint_urls() {
        let config = BackendConfig {
            base_url: "https://campus.example.com".to_string(),
            ..BackendConfig::default()
        };
        assert_eq!(
            config.table_url("user_roles"),
            "https://campus.example.com/rest/v1/user_roles"
        );
        assert_eq!(
            config.rpc_url("approve_work_diary"),
            "https://campus.example.com/rest/v1/rpc/approve_work_diary"
        );
        assert_eq!(
            config.function_url("admin-manage-user"),
            "https://campus.example.com/functions/v1/admin-manage-user"
        );
    }

    #[test]
    fn test_config_clone_and_equality() {
        let config = BackendConfig::default();
        assert_eq!(config, config.clone());
    }
}
