//! WASM bindings for whalio-playback
//!
//! Browser implementations of the collaborator traits: the page's audio
//! element as [`PlaybackDevice`](crate::PlaybackDevice), DOM lookups for the
//! transport bar and row highlighting, and the page's toast helper as
//! [`Notifier`](crate::Notifier).
//!
//! Elements are looked up on every call, never cached: partial page updates
//! may replace them at any time.

mod device;
mod notify;
mod view;

pub use device::AudioElementDevice;
pub use notify::ToastNotifier;
pub use view::{DomNowPlaying, DomTransportView, TransportElementIds, NOW_PLAYING_CLASS, SEEK_RANGE};
