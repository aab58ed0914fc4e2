//! Types for Whalio server API responses.

use serde::Deserialize;
use whalio_playback::{AlbumId, TrackId, TrackInfo};

// =============================================================================
// Song Types
// =============================================================================

/// Response from `GET /api/song/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongInfo {
    pub id: u32,
    pub name: String,
    pub album: SongAlbum,
    /// Length in seconds (0 when the server could not probe it)
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// Album block nested in a song response.
#[derive(Debug, Clone, Deserialize)]
pub struct SongAlbum {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    pub artist: SongArtist,
}

/// Artist block nested in an album.
#[derive(Debug, Clone, Deserialize)]
pub struct SongArtist {
    pub id: u32,
    pub name: String,
}

impl From<SongInfo> for TrackInfo {
    fn from(song: SongInfo) -> Self {
        TrackInfo {
            id: TrackId(song.id),
            title: song.name,
            artist: song.album.artist.name,
            album: Some(song.album.name),
        }
    }
}

// =============================================================================
// Album Types
// =============================================================================

/// Response from `GET /api/album/{id}/songs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSongs {
    pub album_id: u32,
    pub album: String,
    pub artist: String,
    #[serde(default)]
    pub songs: Vec<AlbumSong>,
}

/// One entry of an album listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumSong {
    pub id: u32,
    pub name: String,
    pub album_id: u32,
    pub artist: String,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl AlbumSongs {
    pub fn album(&self) -> AlbumId {
        AlbumId(self.album_id)
    }

    /// Song ids in server order
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.songs.iter().map(|s| TrackId(s.id)).collect()
    }
}

// =============================================================================
// Errors
// =============================================================================

/// JSON error body: `{"error": true, "message": "...", "status": 404}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_info_to_track_info() {
        let json = r#"{
            "id": 7,
            "name": "Song of the Deep",
            "filename": "7.mp3",
            "mimeType": "audio/mpeg",
            "fileSize": 123456,
            "duration": 241,
            "album": {
                "id": 2,
                "name": "Abyss",
                "year": 2021,
                "artist": { "id": 3, "name": "Orca" }
            }
        }"#;

        let song: SongInfo = serde_json::from_str(json).unwrap();
        assert_eq!(song.duration, Some(241.0));

        let info = TrackInfo::from(song);
        assert_eq!(info.id, TrackId(7));
        assert_eq!(info.title, "Song of the Deep");
        assert_eq!(info.artist, "Orca");
        assert_eq!(info.album.as_deref(), Some("Abyss"));
    }

    #[test]
    fn test_album_songs_keep_order() {
        let json = r#"{
            "albumId": 2,
            "album": "Abyss",
            "artist": "Orca",
            "songs": [
                {"id": 9, "name": "B", "albumId": 2, "artist": "Orca", "mimeType": "audio/flac"},
                {"id": 4, "name": "A", "albumId": 2, "artist": "Orca", "mimeType": "audio/mpeg"}
            ]
        }"#;

        let listing: AlbumSongs = serde_json::from_str(json).unwrap();
        assert_eq!(listing.album(), AlbumId(2));
        assert_eq!(listing.track_ids(), vec![TrackId(9), TrackId(4)]);
    }

    #[test]
    fn test_album_without_songs_field() {
        let json = r#"{"albumId": 5, "album": "Empty", "artist": "Nobody"}"#;
        let listing: AlbumSongs = serde_json::from_str(json).unwrap();
        assert!(listing.track_ids().is_empty());
    }
}
