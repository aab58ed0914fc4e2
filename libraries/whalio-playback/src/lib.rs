//! Whalio Player - Playback Control
//!
//! Platform-agnostic playback control for the Whalio web pages.
//!
//! This crate provides:
//! - Play queue (replace-only, cursor navigation without wraparound)
//! - Transport binding (progress readouts, volume, scrub-safe seeking)
//! - Session controller (load/play state machine, queue advancement,
//!   now-playing marker, superseding of stale requests)
//! - Typed view commands decoded from page markup
//!
//! # Architecture
//!
//! `whalio-playback` does not know about the DOM or HTTP:
//! - The audio element, transport bar and row highlighting are traits
//!   ([`PlaybackDevice`], [`TransportView`], [`NowPlayingView`])
//! - Song metadata and stream URLs come from [`MetadataProvider`] and
//!   [`StreamLocator`] (see `whalio-client` for the HTTP implementation)
//! - The browser implementations live behind the `wasm` feature
//!
//! Everything is single-threaded: shared state is `Rc` + `Cell`/`RefCell`,
//! collaborator futures are `?Send`.
//!
//! # Example: Queue navigation
//!
//! ```rust
//! use whalio_playback::{Advance, Direction, Queue, TrackId};
//!
//! let mut queue = Queue::new();
//! queue.set_queue(vec![TrackId(10), TrackId(20)]);
//!
//! assert_eq!(queue.advance(Direction::Next), Advance::Moved(TrackId(20)));
//! assert_eq!(queue.advance(Direction::Next), Advance::Exhausted);
//! assert_eq!(queue.index(), Some(1));
//! ```
//!
//! # Example: Wiring the controller
//!
//! ```rust,ignore
//! use std::rc::Rc;
//! use whalio_playback::{Collaborators, PlaybackSession, PlayerConfig, SessionController, ViewCommand};
//!
//! let session = Rc::new(PlaybackSession::new());
//! let controller = SessionController::new(
//!     session,
//!     PlayerConfig::default(),
//!     Collaborators {
//!         device: Rc::new(my_audio_element),
//!         transport_view: Rc::new(my_transport_bar),
//!         now_playing: Rc::new(my_rows),
//!         metadata: Rc::new(my_client.clone()),
//!         streams: Rc::new(my_client),
//!         notifier: None,
//!     },
//! );
//!
//! if let Some(command) = ViewCommand::from_attributes(Some("12"), None) {
//!     controller.dispatch(command).await;
//! }
//! ```

mod command;
mod controller;
mod device;
mod error;
mod events;
mod notify;
mod queue;
mod session;
mod transport;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use command::{ViewCommand, ACTION_SELECTOR, PLAY_ALBUM_ATTR, PLAY_TRACK_ATTR, TRACK_TAG_ATTR};
pub use controller::{Collaborators, PlayOutcome, SessionController};
pub use device::{
    MetadataProvider, NowPlayingView, Notifier, PlaybackDevice, StreamLocator, TransportView,
};
pub use error::{PlaybackError, Result};
pub use events::{DeviceEvent, PlayerEvent};
pub use notify::Notifications;
pub use queue::{Advance, Direction, Queue};
pub use session::{PlaybackSession, SessionSnapshot};
pub use transport::{format_clock, format_remaining, seek_fraction, TransportBinding};
pub use types::{
    AlbumId, PlayerConfig, PlayerState, Severity, TrackId, TrackInfo, TransportState,
};
