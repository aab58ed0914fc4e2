//! Platform-agnostic collaborator traits
//!
//! The controller never touches the page directly. The browser binding (see
//! the `wasm` feature) implements these traits over the audio element and the
//! DOM; tests implement them with in-memory fakes.
//!
//! All traits are single-threaded (`?Send`): everything runs on the page's one
//! execution context.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AlbumId, Severity, TrackId, TrackInfo};

/// The single audio playback device of the page
#[async_trait(?Send)]
pub trait PlaybackDevice {
    /// Currently bound source URL (`None` when nothing is bound)
    fn source(&self) -> Option<String>;

    /// Bind a new source, or unbind with `None`
    fn set_source(&self, url: Option<&str>);

    /// Start playback
    ///
    /// # Returns
    /// * `Ok(())` - Device is playing
    /// * `Err(_)` - Device refused (no source, autoplay policy, decode error)
    async fn play(&self) -> Result<()>;

    /// Pause playback
    fn pause(&self);

    fn is_paused(&self) -> bool;

    /// Move the playhead (seconds)
    fn set_position(&self, seconds: f64);

    /// Set output volume (0.0-1.0)
    fn set_volume(&self, volume: f64);
}

/// Transport bar of the page
pub trait TransportView {
    fn show_elapsed(&self, text: &str);

    fn show_remaining(&self, text: &str);

    fn show_duration(&self, text: &str);

    /// Move the seek control (0.0-1.0)
    fn set_seek_fraction(&self, fraction: f64);

    /// Switch the play/pause icon
    fn show_playing(&self, playing: bool);

    /// Show title and artist of the loaded track
    fn show_track(&self, info: &TrackInfo);

    /// Make the transport bar visible
    fn reveal(&self);
}

/// Row highlighting for the active track
///
/// Elements may disappear at any time (partial page updates), so both calls
/// must tolerate an empty match set.
pub trait NowPlayingView {
    /// Remove the marker from every marked element
    fn clear_marks(&self);

    /// Mark all elements tagged with `id`; returns how many were marked
    fn mark(&self, id: TrackId) -> usize;
}

/// Fire-and-forget user notification (toast)
pub trait Notifier {
    fn notify(&self, severity: Severity, message: &str);
}

/// Song and album metadata
#[async_trait(?Send)]
pub trait MetadataProvider {
    async fn track_info(&self, id: TrackId) -> Result<TrackInfo>;

    /// Ordered track list of an album
    async fn album_tracks(&self, id: AlbumId) -> Result<Vec<TrackId>>;
}

/// Maps a track to the stream URL bound as device source
pub trait StreamLocator {
    fn stream_url(&self, id: TrackId) -> String;
}
