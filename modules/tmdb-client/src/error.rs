use thiserror::Error;

pub type Result<T> = std::result::Result<T, TmdbError>;

#[derive(Debug, Error)]
pub enum TmdbError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for TmdbError {
    fn from(err: reqwest::Error) -> Self {
        TmdbError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for TmdbError {
    fn from(err: serde_json::Error) -> Self {
        TmdbError::Parse(err.to_string())
    }
}
