//! Playback session
//!
//! The one live binding between the controller and the playback device.
//! Constructed once at startup and shared by `Rc` with the transport binding
//! and the session controller. Interior mutability only; no borrow is held
//! across an await point.

use std::cell::Cell;

use serde::Serialize;

use crate::types::{TrackId, TransportState};

/// Shared playback state
#[derive(Debug)]
pub struct PlaybackSession {
    track: Cell<Option<TrackId>>,
    transport: Cell<TransportState>,
    position: Cell<f64>,
    duration: Cell<Option<f64>>,
    volume: Cell<f64>,
    scrubbing: Cell<bool>,
}

/// Point-in-time copy of the session, for observers and tests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub track: Option<TrackId>,
    pub transport: TransportState,
    pub position: f64,
    pub duration: Option<f64>,
    pub volume: f64,
    pub scrubbing: bool,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self {
            track: Cell::new(None),
            transport: Cell::new(TransportState::Paused),
            position: Cell::new(0.0),
            duration: Cell::new(None),
            volume: Cell::new(1.0),
            scrubbing: Cell::new(false),
        }
    }

    /// Active track
    pub fn track(&self) -> Option<TrackId> {
        self.track.get()
    }

    pub(crate) fn set_track(&self, id: Option<TrackId>) {
        self.track.set(id);
    }

    pub fn transport(&self) -> TransportState {
        self.transport.get()
    }

    pub(crate) fn set_transport(&self, state: TransportState) {
        self.transport.set(state);
    }

    /// Last reported device position (seconds)
    pub fn position(&self) -> f64 {
        self.position.get()
    }

    pub(crate) fn set_position(&self, seconds: f64) {
        self.position.set(seconds);
    }

    /// Raw duration as reported by the device
    pub fn duration(&self) -> Option<f64> {
        self.duration.get()
    }

    pub(crate) fn set_duration(&self, seconds: Option<f64>) {
        self.duration.set(seconds);
    }

    /// Duration usable for seeking: finite and strictly positive
    pub fn known_duration(&self) -> Option<f64> {
        self.duration.get().filter(|d| d.is_finite() && *d > 0.0)
    }

    pub fn volume(&self) -> f64 {
        self.volume.get()
    }

    pub(crate) fn set_volume(&self, volume: f64) {
        self.volume.set(volume);
    }

    /// Whether the user is dragging the seek control
    pub fn is_scrubbing(&self) -> bool {
        self.scrubbing.get()
    }

    pub(crate) fn set_scrubbing(&self, scrubbing: bool) {
        self.scrubbing.set(scrubbing);
    }

    /// Position and duration, saved before a source swap
    pub(crate) fn progress(&self) -> (f64, Option<f64>) {
        (self.position.get(), self.duration.get())
    }

    pub(crate) fn restore_progress(&self, (position, duration): (f64, Option<f64>)) {
        self.position.set(position);
        self.duration.set(duration);
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            track: self.track(),
            transport: self.transport(),
            position: self.position(),
            duration: self.duration(),
            volume: self.volume(),
            scrubbing: self.is_scrubbing(),
        }
    }
}
