use serde::{Deserialize, Serialize};

/// Error kinds observed across the client/remote boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Missing/placeholder endpoint URL or a missing named sheet. Fatal to
    /// initialization, never retried.
    Configuration,
    /// Incomplete product data, unknown operation, malformed columns. Handled
    /// before any request is sent, or surfaced in the failure envelope.
    Validation,
    /// Unknown product id during a mutation.
    NotFound,
    /// A subtract that would drive stock below zero.
    InsufficientStock,
    /// Network failure or non-2xx HTTP status.
    Transport,
    Internal,
}

/// Error shape shared between the client and the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn insufficient_stock(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InsufficientStock, message)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Transport, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::internal(err.to_string())
    }
}
