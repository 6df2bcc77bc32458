use thiserror::Error;

/// Failure taxonomy for the player record store. The HTTP layer maps these
/// onto 400 / 409 / 404 / 500 responses.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid player id")]
    InvalidArgument,
    #[error("player '{id}' already exists")]
    Conflict { id: String },
    #[error("player '{id}' not found")]
    NotFound { id: String },
    #[error("store failure: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub fn backend(err: impl std::fmt::Display) -> Self {
        Self::Backend {
            message: err.to_string(),
        }
    }
}
