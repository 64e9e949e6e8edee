//! Types for the Subsonic REST API.

use encore_core::{AlbumId, ArtistId, Track, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection details for a Subsonic-compatible server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the server (e.g., "https://music.example.com")
    pub url: String,
    pub username: String,
    pub password: String,
}

impl ServerConfig {
    /// Create a new server config.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            username: username.into(),
            password: password.into(),
        }
    }
}

// =============================================================================
// Response envelope
// =============================================================================

/// Outer JSON object of every Subsonic response.
#[derive(Debug, Deserialize)]
pub struct SubsonicEnvelope {
    #[serde(rename = "subsonic-response")]
    pub response: SubsonicResponse,
}

/// Body of a Subsonic response. Exactly one payload field is set on success.
#[derive(Debug, Deserialize)]
pub struct SubsonicResponse {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub error: Option<SubsonicError>,
    #[serde(default)]
    pub song: Option<Song>,
    #[serde(default)]
    pub album: Option<AlbumWithSongs>,
    #[serde(default)]
    pub artist: Option<ArtistWithAlbums>,
    #[serde(default)]
    pub playlist: Option<PlaylistWithEntries>,
    #[serde(default, alias = "searchResult3")]
    pub search_result3: Option<SearchResult3>,
}

impl SubsonicResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubsonicError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Library types
// =============================================================================

/// A song as returned by `getSong`, album listings, playlists and search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default, alias = "artistId")]
    pub artist_id: Option<String>,
    #[serde(default, alias = "albumId")]
    pub album_id: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default, alias = "coverArt")]
    pub cover_art: Option<String>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub track: Option<u32>,
}

impl From<Song> for Track {
    fn from(song: Song) -> Self {
        let mut track = Track::new(
            TrackId::new(song.id),
            song.title,
            song.artist.unwrap_or_default(),
        )
        .with_duration(Duration::from_secs(song.duration.unwrap_or(0)));

        if let Some(album_id) = song.album_id {
            track = track.with_album(AlbumId::new(album_id));
        }
        if let Some(artist_id) = song.artist_id {
            track = track.with_artist_id(ArtistId::new(artist_id));
        }
        if let Some(cover_art) = song.cover_art {
            track = track.with_cover_art(cover_art);
        }
        track
    }
}

/// Album summary as listed under an artist.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AlbumSummary {
    pub id: String,
    pub name: String,
    #[serde(default, alias = "songCount")]
    pub song_count: Option<u32>,
    #[serde(default)]
    pub year: Option<u32>,
}

/// `getAlbum` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumWithSongs {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub song: Vec<Song>,
}

/// `getArtist` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistWithAlbums {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub album: Vec<AlbumSummary>,
}

/// `getPlaylist` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistWithEntries {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub entry: Vec<Song>,
}

/// `search3` payload. Only songs are requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult3 {
    #[serde(default)]
    pub song: Vec<Song>,
}
