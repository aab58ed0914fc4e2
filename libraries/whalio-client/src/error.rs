//! Error types for the Whalio server client.

use thiserror::Error;
use whalio_playback::PlaybackError;

/// Errors that can occur when talking to a Whalio server.
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Song or album does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Server { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(404),
            ClientError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Short message suitable for a toast
    pub fn user_message(&self) -> String {
        match self.status() {
            Some(status) => status_message(status).to_string(),
            None => match self {
                ClientError::Request(_) => "Network error. Please check your connection.".to_string(),
                other => other.to_string(),
            },
        }
    }
}

/// Toast text for an HTTP error status
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request. Please check your input.",
        401 => "Unauthorized. Please log in.",
        403 => "Forbidden. You do not have permission.",
        404 => "Not found.",
        500 => "Server error. Please try again later.",
        _ => "An error occurred",
    }
}

impl From<ClientError> for PlaybackError {
    fn from(err: ClientError) -> Self {
        PlaybackError::Fetch(err.user_message())
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
