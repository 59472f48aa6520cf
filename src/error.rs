use thiserror::Error;

use crate::client::Service;
use crate::extract::ShapeError;

/// Errors raised while talking to the upstream services
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("{service} API returned a body that is not JSON: {detail}")]
    InvalidJson { service: Service, detail: String },

    #[error("Unexpected response shape: {0}")]
    Shape(#[from] ShapeError),
}

impl ProbeError {
    pub fn invalid_json(service: Service, detail: impl Into<String>) -> Self {
        ProbeError::InvalidJson {
            service,
            detail: detail.into(),
        }
    }

    /// Network-level failures propagate; everything else is about the payload
    pub fn is_transport(&self) -> bool {
        matches!(self, ProbeError::Transport(_))
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;
