//! Command error classification

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Caller-facing failure, carrying a human-readable message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl CommandError {
    pub fn bad_request(message: &str) -> Self {
        Self::BadRequest(message.to_string())
    }

    pub fn not_found(message: &str) -> Self {
        Self::NotFound(message.to_string())
    }

    pub fn internal(message: &str) -> Self {
        Self::Internal(message.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(m) | Self::NotFound(m) | Self::Internal(m) => m,
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.message().to_string(),
        }
    }
}

/// Error payload: `{ "error": "<message>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
