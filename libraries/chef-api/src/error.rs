//! Error types for the Chef API client.

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Errors that can occur when talking to a Chef server.
#[derive(Error, Debug)]
pub enum ChefApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("{method} {url}: {}", .status.as_u16())]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Client configuration cannot be turned into request headers
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Failed to encode a request body
    #[error("Failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

impl ChefApiError {
    /// HTTP status reported by the server, if the failure came from one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        self.status() == Some(StatusCode::CONFLICT)
    }
}

/// Result type for Chef API operations.
pub type Result<T> = std::result::Result<T, ChefApiError>;
