use std::time::Duration;

use ledger_types::ErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client")]
    ClientBuild,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Service responded with status {status}")]
    ServerError { status: u16 },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ClientError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidUrl(_) | Self::ClientBuild | Self::HttpError(_) | Self::Timeout(_) => {
                ErrorKind::NetworkFailure
            }
            Self::ServerError { .. } | Self::JsonError(_) => ErrorKind::ServerError,
        }
    }
}
