use reqwest::StatusCode;
use thiserror::Error;

/// Failures raised while talking to a record store.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request never produced a response (DNS, refused connection, timeout).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store answered with a non-success status.
    #[error("HTTP {status} {path}: {body}")]
    Status {
        status: StatusCode,
        path: String,
        body: String,
    },

    /// The response body could not be read or decoded.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Status code of a rejected request, if the store answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ClientError::InvalidRequest(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ClientError::Protocol(err.to_string())
        } else {
            ClientError::Connection(err.to_string())
        }
    }
}
