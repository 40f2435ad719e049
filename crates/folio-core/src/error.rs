use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("Upstream returned {status} for {url}")]
    Upstream { status: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Mail error: {0}")]
    Mail(String),
}

impl FolioError {
    /// Returns `true` when the failure came from a remote service (bad status
    /// or transport), as opposed to local input or configuration.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream { .. } | Self::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, FolioError>;
