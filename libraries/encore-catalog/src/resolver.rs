//! `CatalogResolver` backed by a Subsonic server.

use crate::client::SubsonicClient;
use crate::error::Result;
use crate::types::Song;
use async_trait::async_trait;
use encore_core::{CatalogError, CatalogResolver, SourceKind, Track, TrackId};
use futures_util::future::try_join_all;
use tracing::debug;

/// Songs requested per `search3` call
pub const SEARCH_LIMIT: u32 = 50;

#[async_trait]
impl CatalogResolver for SubsonicClient {
    async fn fetch_track(&self, id: &TrackId) -> encore_core::Result<Track> {
        self.get_song(id.as_str())
            .await
            .map(Track::from)
            .map_err(|e| e.into_catalog("Track", id.as_str()))
    }

    async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> encore_core::Result<Vec<Track>> {
        let entity = kind.entity_name();
        let songs = match kind {
            SourceKind::Album => self.get_album(id).await.map(|album| album.song),
            SourceKind::Playlist => self.get_playlist(id).await.map(|playlist| playlist.entry),
            SourceKind::Artist => self.artist_discography(id).await,
            SourceKind::Search => self.search(id, SEARCH_LIMIT).await,
            SourceKind::Adhoc => return Err(CatalogError::not_found(entity, id)),
        }
        .map_err(|e| e.into_catalog(entity, id))?;

        Ok(songs.into_iter().map(Track::from).collect())
    }
}

impl SubsonicClient {
    /// Every song of an artist, album by album.
    ///
    /// Albums are fetched concurrently; the result keeps the order `getArtist`
    /// lists them in. Any failed album fails the whole call.
    async fn artist_discography(&self, id: &str) -> Result<Vec<Song>> {
        let artist = self.get_artist(id).await?;
        let albums = try_join_all(artist.album.iter().map(|album| self.get_album(&album.id))).await?;

        let songs: Vec<_> = albums.into_iter().flat_map(|album| album.song).collect();
        debug!(artist = %artist.id, albums = artist.album.len(), songs = songs.len(), "Resolved discography");
        Ok(songs)
    }
}
