//! Error types for the task service client.

use thiserror::Error;

/// Errors that can occur when talking to the task service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, or a non-success status on a read.
    #[error("network error: {0}")]
    Network(String),

    /// The service does not know the task.
    #[error("not found: {0}")]
    NotFound(String),

    /// The service rejected or failed an execution request.
    #[error("execution failed with HTTP {status}{}", body_suffix(.body))]
    Execution { status: u16, body: Option<String> },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Request rejected before it was sent.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Serialization(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) if !body.is_empty() => format!(": {}", body),
        _ => String::new(),
    }
}
