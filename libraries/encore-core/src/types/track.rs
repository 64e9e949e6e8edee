/// Track Reference domain type
use crate::types::{AlbumId, ArtistId, TrackId};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable item as described by the catalog
///
/// Immutable once fetched. Queues hold clones of it, never references into
/// a resolver's cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Catalog track id
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Display artist
    pub artist: String,

    /// Artist id, for "go to artist"
    pub artist_id: Option<ArtistId>,

    /// Album id, for "go to album"
    pub album_id: Option<AlbumId>,

    /// Cover art id understood by the catalog's artwork endpoint
    pub cover_art: Option<String>,

    /// Track length
    pub duration: Duration,
}

impl Track {
    /// Create a track with the required fields; everything else empty
    pub fn new(id: TrackId, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            artist_id: None,
            album_id: None,
            cover_art: None,
            duration: Duration::ZERO,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the album id
    pub fn with_album(mut self, album_id: AlbumId) -> Self {
        self.album_id = Some(album_id);
        self
    }

    /// Set the artist id
    pub fn with_artist_id(mut self, artist_id: ArtistId) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    /// Set the cover art id
    pub fn with_cover_art(mut self, cover_art: impl Into<String>) -> Self {
        self.cover_art = Some(cover_art.into());
        self
    }
}
