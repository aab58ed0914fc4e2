//! View commands
//!
//! Page markup declares playback intents with data attributes:
//!
//! ```html
//! <button data-play-track="12">Play</button>
//! <a data-play-album="5">Play album</a>
//! <tr data-track-id="12">...</tr>
//! ```
//!
//! The boundary layer reads the attributes of the clicked element and hands
//! them to [`ViewCommand::from_attributes`]; the core only ever sees the typed
//! command.

use serde::{Deserialize, Serialize};

use crate::types::{AlbumId, TrackId};

/// Attribute that makes an element play a single track
pub const PLAY_TRACK_ATTR: &str = "data-play-track";

/// Attribute that makes an element play a whole album
pub const PLAY_ALBUM_ATTR: &str = "data-play-album";

/// Attribute tagging elements eligible for now-playing styling
pub const TRACK_TAG_ATTR: &str = "data-track-id";

/// CSS selector matching any actionable element
pub const ACTION_SELECTOR: &str = "[data-play-track], [data-play-album]";

/// Playback intent decoded from a view event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewCommand {
    PlayTrack(TrackId),
    PlayAlbum(AlbumId),
}

impl ViewCommand {
    /// Decode a single attribute/value pair
    ///
    /// Unknown attributes and non-numeric ids yield `None`.
    pub fn decode(attribute: &str, raw: &str) -> Option<Self> {
        match attribute {
            PLAY_TRACK_ATTR => parse_id(raw).map(|id| ViewCommand::PlayTrack(TrackId(id))),
            PLAY_ALBUM_ATTR => parse_id(raw).map(|id| ViewCommand::PlayAlbum(AlbumId(id))),
            _ => None,
        }
    }

    /// Decode from the two action attributes of one element
    ///
    /// A valid track id wins over an album id on the same element.
    pub fn from_attributes(track: Option<&str>, album: Option<&str>) -> Option<Self> {
        track
            .and_then(|raw| Self::decode(PLAY_TRACK_ATTR, raw))
            .or_else(|| album.and_then(|raw| Self::decode(PLAY_ALBUM_ATTR, raw)))
    }
}

fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}
