use reader_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend URL is not configured")]
    Unconfigured,
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Row not found")]
    NotFound,
}

impl From<BackendError> for StoreError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Api { status, message } => StoreError::Api { status, message },
            BackendError::NotFound => StoreError::NotFound,
            BackendError::Json(e) => StoreError::Decode(e.to_string()),
            BackendError::Http(e) if e.is_decode() => StoreError::Decode(e.to_string()),
            BackendError::Http(e) => StoreError::Transport(e.to_string()),
            BackendError::Unconfigured => StoreError::Transport(BackendError::Unconfigured.to_string()),
        }
    }
}
