//! Whalio Server Client
//!
//! HTTP client for the song and album endpoints of a Whalio server, usable as
//! the metadata provider and stream locator of a
//! [`SessionController`](whalio_playback::SessionController).
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use whalio_client::{ClientConfig, WhalioClient};
//!
//! let client = Rc::new(WhalioClient::new(ClientConfig::load(None)?)?);
//! let collaborators = Collaborators {
//!     metadata: client.clone(),
//!     streams: client,
//!     // device, views, notifier ...
//! };
//! ```

mod client;
mod config;
mod error;
mod types;

pub use client::WhalioClient;
pub use config::ClientConfig;
pub use error::{status_message, ClientError, Result};
pub use types::{AlbumSong, AlbumSongs, ErrorBody, SongAlbum, SongArtist, SongInfo};
