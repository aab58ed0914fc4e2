//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{PlaybackError, Result};

/// Identifier of a playable song
///
/// Supplied by the page markup or a fetched album listing; the core never
/// invents one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(pub u32);

/// Identifier of an album
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumId(pub u32);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AlbumId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display metadata for a track
///
/// Fetched from the metadata provider right before the track is bound to the
/// playback device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
}

/// State reported by the playback device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    Playing,
    Paused,
    /// Track reached its natural end (rendered like `Paused`)
    Ended,
}

impl TransportState {
    /// Whether the play/pause control should show "playing"
    pub fn is_playing(self) -> bool {
        matches!(self, TransportState::Playing)
    }
}

/// Controller state machine
///
/// `Loading` is reachable from every state; failures fall back to the last
/// stable state instead of a dedicated error state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    /// Nothing has been loaded yet
    Idle,

    /// Fetching metadata or waiting for the device to start
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Queue ran out after the last track finished
    Ended,
}

impl PlayerState {
    pub fn is_stable(self) -> bool {
        self != PlayerState::Loading
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

/// Configuration for the session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial device volume (0.0-1.0, default: 0.8)
    pub initial_volume: f64,

    /// Emit an info notification whenever a track starts (default: false)
    pub notify_success: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            initial_volume: 0.8,
            notify_success: false,
        }
    }
}

impl PlayerConfig {
    /// Parse a JSON blob (e.g. a `data-player-config` attribute)
    ///
    /// Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| PlaybackError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.initial_volume.is_finite() || !(0.0..=1.0).contains(&self.initial_volume) {
            return Err(PlaybackError::Config(format!(
                "initial_volume must be between 0.0 and 1.0, got {}",
                self.initial_volume
            )));
        }
        Ok(())
    }
}
