use crate::errors::UxError;
use crate::process::ProcessError;

/// A single fetcher run failed. Always recoverable: the key keeps its previous
/// value and the fetcher is retried on a later cycle.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Command(#[from] ProcessError),

    #[error("Fetcher '{key}' timed out after {timeout_ms}ms")]
    TimedOut { key: String, timeout_ms: u128 },

    #[error("Failed to decode fetch result: {message}")]
    Decode { message: String },

    #[error("Fetch failed: {message}")]
    Failed { message: String },

    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn failed(message: impl Into<String>) -> Self {
        FetchError::Failed {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(error: serde_json::Error) -> Self {
        FetchError::Decode {
            message: error.to_string(),
        }
    }
}

impl UxError for FetchError {
    fn error_code(&self) -> &'static str {
        match self {
            FetchError::Command(inner) => inner.error_code(),
            FetchError::TimedOut { .. } => "FETCH_TIMED_OUT",
            FetchError::Decode { .. } => "FETCH_DECODE_FAILED",
            FetchError::Failed { .. } => "FETCH_FAILED",
            FetchError::Cancelled => "FETCH_CANCELLED",
        }
    }
}
