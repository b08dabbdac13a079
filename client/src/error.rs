use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
        detail: Option<String>,
    },

    #[error("unexpected response from {endpoint}: {reason}")]
    MalformedResponse { endpoint: String, reason: String },

    #[error("failed to read {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("{0} is not available on the {1} backend contract")]
    Unsupported(&'static str, &'static str),
}

impl ClientError {
    pub(crate) fn transport(endpoint: &str, source: reqwest::Error) -> Self {
        ClientError::Transport {
            endpoint: endpoint.to_string(),
            source,
        }
    }

    pub(crate) fn malformed(endpoint: &str, reason: impl Into<String>) -> Self {
        ClientError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }

    /// Server-provided detail, if the backend sent one with a failing status.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
