use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uniform response wrapper for every remote call, success or failure.
///
/// `data` is `None` on failure; `success` must be consulted before trusting
/// `data`. The timestamp is stamped at construction time and serializes as an
/// RFC 3339 / ISO-8601 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    /// Payload of a successful envelope; `None` when the remote reported a
    /// failure or omitted the data.
    pub fn into_data(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}
