//! Error types for LLM operations

use thiserror::Error;

/// Result type for LLM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during diff analysis
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the endpoint
    #[error("API error (status {status}): {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, as returned
        body: String,
    },

    /// No API key available
    #[error(
        "LLM API key not found. Set OPENAI_API_KEY environment variable \
         or add api_key to ~/.config/vigil/secrets.toml"
    )]
    MissingApiKey,

    /// The endpoint returned no completion content
    #[error("Empty completion response")]
    EmptyResponse,

    /// The completion content did not match the review schema
    #[error("Response did not match the review schema: {0}")]
    UnexpectedResponse(String),
}
