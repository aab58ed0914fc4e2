//! Error types for playback management

use thiserror::Error;

use crate::types::AlbumId;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue index outside `[0, len)`
    #[error("Queue index {index} out of range (queue length {len})")]
    OutOfRange { index: usize, len: usize },

    /// Metadata or album listing could not be fetched
    ///
    /// The message is meant to be shown to the user as-is.
    #[error("{0}")]
    Fetch(String),

    /// The playback device refused to start
    #[error("Playback failed: {0}")]
    Playback(String),

    /// Album listing came back without songs
    #[error("Album {0} has no songs")]
    EmptyAlbum(AlbumId),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
