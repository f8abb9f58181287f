// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names a failure mode of the job: configuration problems that
//! stop a run before it starts, remote services refusing or failing a call,
//! inventory entries that cannot be interpreted, and the rate-limit signal
//! that drives the delivery retry loop.

use std::time::Duration;
use thiserror::Error;

/// External services the job talks to, used to label remote failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteService {
    Neos,
    Notion,
    Discord,
}

impl std::fmt::Display for RemoteService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neos => write!(f, "Neos"),
            Self::Notion => write!(f, "Notion"),
            Self::Discord => write!(f, "Discord"),
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Discord channel {channel_id} not found in guild {guild_id}")]
    ChannelNotFound {
        guild_id: String,
        channel_id: String,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("{service} API returned an error ({status}): {message}")]
    RemoteService {
        service: RemoteService,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Rate limited, retry after {}ms", retry_after.as_millis())]
    RateLimited { retry_after: Duration },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Malformed link '{name}': cannot decode owner/record from asset uri '{asset_uri}'")]
    MalformedLink { name: String, asset_uri: String },

    #[error("Unsupported record type '{record_type}' for record '{id}'")]
    UnsupportedRecord { id: String, record_type: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

/// Process exit status for a run that failed after starting.
pub const EXIT_FAILURE: i32 = 1;
/// Process exit status when the configuration is incomplete or a channel is missing.
pub const EXIT_CONFIGURATION: i32 = 2;

impl AppError {
    /// The server-requested resume delay, when this error is a backpressure signal.
    pub fn backpressure_delay(&self) -> Option<Duration> {
        match self {
            AppError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }

    /// Whether this error means the run cannot start at all.
    pub fn is_fatal_configuration(&self) -> bool {
        matches!(
            self,
            AppError::MissingConfiguration(_)
                | AppError::ChannelNotFound { .. }
                | AppError::ValidationError(_)
        )
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_fatal_configuration() {
            EXIT_CONFIGURATION
        } else {
            EXIT_FAILURE
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
