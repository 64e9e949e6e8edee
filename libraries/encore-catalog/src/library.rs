//! Library browsing endpoints.

use crate::client::SubsonicClient;
use crate::error::{ClientError, Result};
use crate::types::{AlbumWithSongs, ArtistWithAlbums, PlaylistWithEntries, Song};
use tracing::debug;

impl SubsonicClient {
    /// `getSong`
    pub async fn get_song(&self, id: &str) -> Result<Song> {
        let response = self.call("getSong", &[("id", id.to_string())]).await?;
        response.song.ok_or_else(|| missing("getSong", "song"))
    }

    /// `getAlbum`, songs in disc/track order
    pub async fn get_album(&self, id: &str) -> Result<AlbumWithSongs> {
        let response = self.call("getAlbum", &[("id", id.to_string())]).await?;
        let album = response.album.ok_or_else(|| missing("getAlbum", "album"))?;

        debug!(album = %album.id, songs = album.song.len(), "Fetched album");
        Ok(album)
    }

    /// `getArtist`, album summaries only
    pub async fn get_artist(&self, id: &str) -> Result<ArtistWithAlbums> {
        let response = self.call("getArtist", &[("id", id.to_string())]).await?;
        let artist = response.artist.ok_or_else(|| missing("getArtist", "artist"))?;

        debug!(artist = %artist.id, albums = artist.album.len(), "Fetched artist");
        Ok(artist)
    }

    /// `getPlaylist`
    pub async fn get_playlist(&self, id: &str) -> Result<PlaylistWithEntries> {
        let response = self.call("getPlaylist", &[("id", id.to_string())]).await?;
        let playlist = response
            .playlist
            .ok_or_else(|| missing("getPlaylist", "playlist"))?;

        debug!(playlist = %playlist.id, entries = playlist.entry.len(), "Fetched playlist");
        Ok(playlist)
    }

    /// `search3`, songs only
    ///
    /// An empty result comes back as an empty list, not an error.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<Song>> {
        let params = [
            ("query", query.to_string()),
            ("songCount", limit.to_string()),
            ("artistCount", "0".to_string()),
            ("albumCount", "0".to_string()),
        ];
        let response = self.call("search3", &params).await?;
        let songs = response.search_result3.unwrap_or_default().song;

        debug!(query, results = songs.len(), "Search finished");
        Ok(songs)
    }
}

fn missing(endpoint: &str, field: &str) -> ClientError {
    ClientError::ParseError(format!("{} response has no `{}`", endpoint, field))
}
