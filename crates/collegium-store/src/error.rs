//! Store error taxonomy.
//!
//! Only transport, decoding, and backend failures become errors here. A
//! remote procedure reporting `success: false` is a logical rejection and is
//! returned as an ordinary [`RpcOutcome`](collegium_models::RpcOutcome)
//! value, never as a `StoreError`.

use thiserror::Error;

/// Backend error code meaning the queried table is absent or not exposed.
///
/// Screens surface this as a distinct "apply migrations" state rather than a
/// retryable transient failure.
pub const TABLE_MISSING_CODE: &str = "PGRST205";

#[derive(Debug, Error)]
pub enum StoreError {
    /// The queried table is not present in the exposed schema.
    #[error("table not available: {table}")]
    TableMissing { table: String },

    /// The backend rejected the request with a structured error body.
    #[error("backend error {code}: {message}")]
    Backend { code: String, message: String },

    /// Network-level failure reaching the backend.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl StoreError {
    /// Map a structured backend error onto the taxonomy, special-casing the
    /// table-missing sentinel.
    pub fn from_backend(resource: &str, code: String, message: String) -> Self {
        if code == TABLE_MISSING_CODE {
            Self::TableMissing {
                table: resource.to_string(),
            }
        } else {
            Self::Backend { code, message }
        }
    }

    pub fn is_table_missing(&self) -> bool {
        matches!(self, Self::TableMissing { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_missing_sentinel_mapping() {
        let err = StoreError::from_backend("events", TABLE_MISSING_CODE.to_string(), "x".into());
        assert!(err.is_table_missing());

        let other = StoreError::from_backend("events", "PGRST301".to_string(), "x".into());
        assert!(!other.is_table_missing());
        assert!(matches!(other, StoreError::Backend { .. }));
    }
}
