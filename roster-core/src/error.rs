//! Error types for the Roster core
//!
//! Network and server failures collapse into [`ApiError`]; the stores turn
//! those into a single display string with [`ApiError::normalized`].
//! Client-side form failures are [`ValidationError`]s and never reach the
//! network layer.

use std::path::PathBuf;

use thiserror::Error;

pub use crate::domains::ui::form::ValidationError;

/// Any non-2xx response or transport failure talking to the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. `message` is the
    /// body's `error` field when one was present.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Single user-facing message for this failure: the server supplied
    /// `error` text when available, otherwise `fallback`.
    pub fn normalized(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.trim().to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// Result type alias for remote API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Session token persistence errors. Logged by the session store, never
/// fatal.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("unable to determine a data directory for the session file")]
    NoDataDir,

    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupted session file {path}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Invalid client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid API base URL '{value}'")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("API base URL must use http or https, got '{0}'")]
    UnsupportedScheme(String),

    #[error("API key must not be blank")]
    MissingApiKey,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_prefers_server_message() {
        let err = ApiError::Status {
            status: 400,
            message: Some("user not found".into()),
        };
        assert_eq!(err.normalized("Login failed"), "user not found");
    }

    #[test]
    fn normalized_falls_back_for_blank_or_missing_messages() {
        let blank = ApiError::Status {
            status: 500,
            message: Some("   ".into()),
        };
        let missing = ApiError::Status {
            status: 404,
            message: None,
        };
        let transport = ApiError::Transport("connection refused".into());
        for err in [blank, missing, transport] {
            assert_eq!(err.normalized("Failed to fetch users"), "Failed to fetch users");
        }
    }
}
