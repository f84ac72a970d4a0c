use thiserror::Error;

/// Errors that can occur while talking to the recipe service or running the finder
#[derive(Error, Debug)]
pub enum FinderError {
    /// Failed to reach the recipe service
    #[error("Failed to fetch from recipe service: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Recipe service answered with a non-success status
    #[error("Recipe service returned status {status} for {endpoint}")]
    StatusError { status: u16, endpoint: String },

    /// Response body could not be interpreted
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No recipe exists for the requested identifier
    #[error("Recipe not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl From<serde_json::Error> for FinderError {
    fn from(err: serde_json::Error) -> Self {
        FinderError::ParseError(err.to_string())
    }
}
