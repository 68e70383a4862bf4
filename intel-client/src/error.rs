use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {}", .message.as_deref().unwrap_or("no detail"))]
    Api { status: u16, message: Option<String> },

    #[error("{0}")]
    Authentication(String),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Api { status: 401, .. })
    }
}
