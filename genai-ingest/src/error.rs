//! Error definitions for the client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP client error: {source}")]
    HttpClient {
        #[from]
        source: reqwest::Error,
    },

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// The service reported the stored file as `FAILED`.
    #[error("File processing failed: {message}")]
    FileProcessing { message: String },

    #[error("Timeout: {message}")]
    Timeout { message: String },
}

impl Error {
    /// Builds an [`Error::ApiError`] from a non-success response, consuming its body.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        Self::ApiError {
            status: response.status().as_u16(),
            message: response.text().await.unwrap_or_default(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
