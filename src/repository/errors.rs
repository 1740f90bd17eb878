use thiserror::Error;

/// Failures of a single call to the cinema API. Calls are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced a response (timeout, DNS, connection reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The API answered with a non-2xx status.
    #[error("Request failed: {status} - {body}")]
    Http { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
