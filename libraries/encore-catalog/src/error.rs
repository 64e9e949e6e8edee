//! Error types for the Subsonic client.

use encore_core::CatalogError;
use thiserror::Error;

/// Subsonic error code for "requested data was not found"
pub const SUBSONIC_NOT_FOUND: i32 = 70;

/// Errors that can occur when talking to a Subsonic server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server answered with a Subsonic `failed` envelope
    #[error("Subsonic error {code}: {message}")]
    Subsonic { code: i32, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl ClientError {
    /// Whether the server said the requested entity does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::ServerError { status, .. } => *status == 404,
            Self::Subsonic { code, .. } => *code == SUBSONIC_NOT_FOUND,
            _ => false,
        }
    }

    /// Convert into a catalog error for the entity that was requested
    pub fn into_catalog(self, entity: &str, id: &str) -> CatalogError {
        if self.is_not_found() {
            CatalogError::not_found(entity, id)
        } else {
            CatalogError::network(self.to_string())
        }
    }
}

/// Result type for Subsonic client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
