use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{source_name} responded with status {status}")]
    Status { source_name: String, status: u16 },

    #[error("Failed to decode {source_name} response: {message}")]
    Decode { source_name: String, message: String },

    #[error("{0} returned no reviews")]
    Empty(String),

    #[error("{0} is not configured")]
    NotConfigured(String),
}

impl SourceError {
    pub fn decode(source_name: &str, err: impl std::fmt::Display) -> Self {
        SourceError::Decode {
            source_name: source_name.to_string(),
            message: err.to_string(),
        }
    }
}
