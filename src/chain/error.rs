use reqwest::StatusCode;
use thiserror::Error;

/// Failure to reach the remote chain at all, after the transport's retries
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("GET {url} failed after {attempts} attempt(s): {source}")]
    Request {
        url: String,
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} failed: {reason}")]
    Unreachable { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("failed to create http client: {0}")]
    HttpClient(#[source] TransportError),

    #[error("failed to GET {what}: {source}")]
    Transport {
        what: &'static str,
        #[source]
        source: TransportError,
    },

    #[error("failed to GET {what}: status code {status} returned: {body}")]
    Status {
        what: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("failed to unmarshal {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid block height {0:?}")]
    InvalidHeight(String),

    #[error("unsupported account type {0}")]
    UnsupportedAccount(String),

    #[error("invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl BridgeError {
    /// Could not reach the remote, or it answered with a non-200 status
    pub fn is_transport(&self) -> bool {
        matches!(self, BridgeError::Transport { .. } | BridgeError::Status { .. })
    }

    /// Reached the remote but the payload did not have the expected shape
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            BridgeError::Decode { .. } | BridgeError::InvalidHeight(_) | BridgeError::UnsupportedAccount(_)
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BridgeError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
