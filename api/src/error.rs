use thiserror::Error;

/// Failure modes of a single API call.
///
/// Transport problems (`Transport`, `Status`) and payload problems (`Decode`,
/// `Shape`) are kept apart so logs can tell them apart, but callers of the
/// dashboard collapse all of them into a failed metric.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid endpoint url `{0}`")]
    Url(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server answered with status {0}")]
    Status(reqwest::StatusCode),

    #[error("response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    Shape(String),
}

impl FetchError {
    pub fn shape(detail: impl Into<String>) -> Self {
        Self::Shape(detail.into())
    }

    /// True when the failure came from the network rather than the payload.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status(_))
    }
}
