//! Playback Events
//!
//! Two directions:
//! - [`DeviceEvent`]: what the playback device reports (progress, metadata,
//!   play/pause, natural end). The controller pattern-matches on these.
//! - [`PlayerEvent`]: what the controller reports to observers (state and
//!   track changes, queue replacement, surfaced errors).

use serde::{Deserialize, Serialize};

use crate::types::{PlayerState, TrackId, TransportState};

/// Events coming from the playback device
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// Playback position advanced (seconds)
    PositionChanged(f64),

    /// Metadata loaded, duration is now known (seconds, may be non-finite
    /// for live streams)
    DurationKnown(f64),

    /// Device started or stopped playing
    TransportStateChanged(TransportState),

    /// Track played through to the end
    Ended,
}

/// Events emitted by the session controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// A new track became the active one
    TrackChanged {
        /// ID of the new (current) track
        track_id: TrackId,
        /// ID of the previous track (if any)
        previous_track_id: Option<TrackId>,
    },

    /// Queue was replaced
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// A failure was surfaced to the user
    Error {
        /// Error message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_event_serializes_with_tag() {
        let event = PlayerEvent::TrackChanged {
            track_id: TrackId(3),
            previous_track_id: None,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["TrackChanged"]["track_id"], 3);
    }

    #[test]
    fn device_event_serializes_lowercase_state() {
        let event = DeviceEvent::TransportStateChanged(TransportState::Paused);
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"TransportStateChanged":"paused"}"#);
    }
}
