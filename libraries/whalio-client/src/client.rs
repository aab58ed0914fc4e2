//! Whalio server client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use whalio_playback::{AlbumId, MetadataProvider, StreamLocator, TrackId, TrackInfo};

use crate::config::{normalize_base_url, ClientConfig};
use crate::error::{ClientError, Result};
use crate::types::{AlbumSongs, ErrorBody, SongInfo};

/// Client for the song and album endpoints of a Whalio server.
///
/// Implements [`MetadataProvider`] and [`StreamLocator`], so it plugs straight
/// into the session controller.
///
/// # Example
///
/// ```ignore
/// use whalio_client::{ClientConfig, WhalioClient};
///
/// let client = WhalioClient::new(ClientConfig::new("http://localhost:8080"))?;
/// let song = client.song(TrackId(7)).await?;
/// println!("{} by {}", song.name, song.album.artist.name);
/// ```
#[derive(Debug, Clone)]
pub struct WhalioClient {
    http: Client,
    base_url: String,
}

impl WhalioClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = normalize_base_url(&config.base_url)?;
        let http = build_http(&config)?;

        Ok(Self { http, base_url })
    }

    /// Get the server URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one song with its album and artist.
    pub async fn song(&self, id: TrackId) -> Result<SongInfo> {
        let url = format!("{}/api/song/{}", self.base_url, id);
        debug!(url = %url, track = %id, "Fetching song");

        let response = self.http.get(&url).send().await?;
        read_json(response, &format!("song {id}")).await
    }

    /// Fetch the ordered song listing of an album.
    pub async fn album_songs(&self, id: AlbumId) -> Result<AlbumSongs> {
        let url = format!("{}/api/album/{}/songs", self.base_url, id);
        debug!(url = %url, album = %id, "Fetching album songs");

        let response = self.http.get(&url).send().await?;
        let listing: AlbumSongs = read_json(response, &format!("album {id}")).await?;

        debug!(album = %id, songs = listing.songs.len(), "Fetched album songs");
        Ok(listing)
    }

    /// Absolute URL the audio element streams `id` from.
    pub fn stream_url_for(&self, id: TrackId) -> String {
        format!("{}/stream/{}", self.base_url, id)
    }
}

#[async_trait(?Send)]
impl MetadataProvider for WhalioClient {
    async fn track_info(&self, id: TrackId) -> whalio_playback::Result<TrackInfo> {
        let song = self.song(id).await.map_err(|e| {
            warn!(track = %id, error = %e, "Song lookup failed");
            e
        })?;
        Ok(song.into())
    }

    async fn album_tracks(&self, id: AlbumId) -> whalio_playback::Result<Vec<TrackId>> {
        let listing = self.album_songs(id).await.map_err(|e| {
            warn!(album = %id, error = %e, "Album lookup failed");
            e
        })?;
        Ok(listing.track_ids())
    }
}

impl StreamLocator for WhalioClient {
    fn stream_url(&self, id: TrackId) -> String {
        self.stream_url_for(id)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_http(config: &ClientConfig) -> Result<Client> {
    use std::time::Duration;

    // Create HTTP client with reasonable defaults
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(format!("Whalio/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(ClientError::Request)
}

// The browser owns timeouts and the user agent
#[cfg(target_arch = "wasm32")]
fn build_http(_config: &ClientConfig) -> Result<Client> {
    Client::builder().build().map_err(ClientError::Request)
}

async fn read_json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse {what}: {e}")));
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|b| b.message)
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(what.to_string()))
    } else {
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
