/// Core traits for Encore
use crate::error::Result;
use crate::types::{SourceKind, Track, TrackId};
use async_trait::async_trait;
use std::sync::Arc;

/// Catalog resolver
///
/// Supplies Track References by id. Queue mutations call it before they
/// touch any queue state, so an implementation is free to suspend (network
/// round-trips, fan-out over several albums) without holding locks.
#[async_trait]
pub trait CatalogResolver: Send + Sync {
    /// Fetch a single track
    ///
    /// # Errors
    /// `CatalogError::NotFound` if the catalog has no such track,
    /// `CatalogError::Network` on transport failure
    async fn fetch_track(&self, id: &TrackId) -> Result<Track>;

    /// Fetch the ordered track list of a collection
    ///
    /// `id` is the collection id for albums, artists and playlists, and the
    /// query text for `SourceKind::Search`.
    ///
    /// # Errors
    /// `CatalogError::NotFound` if the collection does not exist,
    /// `CatalogError::Network` on transport failure
    async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> Result<Vec<Track>>;
}

#[async_trait]
impl<R> CatalogResolver for Arc<R>
where
    R: CatalogResolver + ?Sized,
{
    async fn fetch_track(&self, id: &TrackId) -> Result<Track> {
        (**self).fetch_track(id).await
    }

    async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> Result<Vec<Track>> {
        (**self).fetch_tracks_for(kind, id).await
    }
}
