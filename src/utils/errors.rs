use anyhow::Error;
use std::fmt;

use collegium_store::StoreError;

/// Client-observable error classes.
///
/// Resolution-pending is not represented here: an in-flight session is a
/// state, not an error. Logical RPC rejections travel as
/// [`RpcOutcome`](collegium_models::RpcOutcome) values, not as `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A gate or scope check denied the action.
    Forbidden,
    /// Advisory client-local validation failed before a round trip.
    Validation,
    NotFound,
    /// The queried table is absent or not exposed ("apply migrations").
    TableMissing,
    /// Network or generic backend failure; retry is a manual user action.
    Transport,
    Internal,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message.into()))
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    /// Human-readable message for screens.
    pub fn user_message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.error)
    }
}

impl std::error::Error for AppError {}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let kind = match &err {
            StoreError::TableMissing { .. } => ErrorKind::TableMissing,
            StoreError::Transport(_) | StoreError::Backend { .. } => ErrorKind::Transport,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Decode(_) | StoreError::Unexpected(_) => ErrorKind::Internal,
        };
        Self::new(kind, err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::validation(err)
    }
}

impl From<Error> for AppError {
    fn from(err: Error) -> Self {
        Self::internal(err)
    }
}
