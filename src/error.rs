use thiserror::Error;

use crate::gateway::RemoteError;

#[derive(Debug, Error)]
pub enum WellnessError {
    /// A local precondition failed. No request was sent.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// A fetched message could not be attributed to a counterpart.
    #[error("Integrity Error: {0}")]
    Integrity(String),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Storage Error: {0}")]
    Storage(String),
}

impl WellnessError {
    pub fn validation(msg: impl Into<String>) -> Self {
        WellnessError::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WellnessError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, WellnessError>;
