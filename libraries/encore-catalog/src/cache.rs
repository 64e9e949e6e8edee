//! Track cache in front of a resolver.

use async_trait::async_trait;
use encore_core::{CatalogResolver, Result, SourceKind, Track, TrackId};
use lru::LruCache;
use std::num::NonZeroUsize;
use tokio::sync::Mutex;
use tracing::trace;

/// Caches Track References by id.
///
/// `fetch_track` answers from the cache when it can. Collection lookups
/// always go to the inner resolver (their contents change) and feed every
/// returned track into the cache.
pub struct CachedResolver<R> {
    inner: R,
    tracks: Mutex<LruCache<TrackId, Track>>,
}

impl<R: CatalogResolver> CachedResolver<R> {
    pub fn new(inner: R, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            tracks: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The wrapped resolver
    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Number of cached tracks
    pub async fn len(&self) -> usize {
        self.tracks.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tracks.lock().await.is_empty()
    }

    /// Drop every cached track
    pub async fn clear(&self) {
        self.tracks.lock().await.clear();
    }
}

#[async_trait]
impl<R: CatalogResolver> CatalogResolver for CachedResolver<R> {
    async fn fetch_track(&self, id: &TrackId) -> Result<Track> {
        if let Some(track) = self.tracks.lock().await.get(id) {
            trace!(track_id = %id, "Track cache hit");
            return Ok(track.clone());
        }

        let track = self.inner.fetch_track(id).await?;
        self.tracks.lock().await.put(id.clone(), track.clone());
        Ok(track)
    }

    async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> Result<Vec<Track>> {
        let tracks = self.inner.fetch_tracks_for(kind, id).await?;

        let mut cache = self.tracks.lock().await;
        for track in &tracks {
            cache.put(track.id.clone(), track.clone());
        }
        Ok(tracks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::CatalogError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        track_calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogResolver for Counting {
        async fn fetch_track(&self, id: &TrackId) -> Result<Track> {
            self.track_calls.fetch_add(1, Ordering::SeqCst);
            if id.as_str() == "missing" {
                return Err(CatalogError::not_found("Track", id.as_str()));
            }
            Ok(Track::new(id.clone(), format!("Title {}", id), "Artist"))
        }

        async fn fetch_tracks_for(&self, _kind: SourceKind, id: &str) -> Result<Vec<Track>> {
            Ok((1..=3)
                .map(|n| Track::new(TrackId::new(format!("{}-{}", id, n)), "Song", "Artist"))
                .collect())
        }
    }

    fn cached(capacity: usize) -> CachedResolver<Counting> {
        CachedResolver::new(Counting::default(), NonZeroUsize::new(capacity).unwrap())
    }

    #[tokio::test]
    async fn second_lookup_is_served_from_cache() {
        let resolver = cached(8);
        let id = TrackId::new("t1");

        let first = resolver.fetch_track(&id).await.unwrap();
        let second = resolver.fetch_track(&id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(resolver.inner().track_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn collections_populate_the_cache() {
        let resolver = cached(8);
        let tracks = resolver.fetch_tracks_for(SourceKind::Album, "al").await.unwrap();
        assert_eq!(tracks.len(), 3);
        assert_eq!(resolver.len().await, 3);

        let hit = resolver.fetch_track(&TrackId::new("al-2")).await.unwrap();
        assert_eq!(hit.id.as_str(), "al-2");
        assert_eq!(resolver.inner().track_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let resolver = cached(8);
        let id = TrackId::new("missing");

        assert!(resolver.fetch_track(&id).await.is_err());
        assert!(resolver.fetch_track(&id).await.is_err());
        assert!(resolver.is_empty().await);
        assert_eq!(resolver.inner().track_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn least_recently_used_is_evicted() {
        let resolver = cached(2);
        for id in ["a", "b", "c"] {
            resolver.fetch_track(&TrackId::new(id)).await.unwrap();
        }
        assert_eq!(resolver.len().await, 2);

        resolver.fetch_track(&TrackId::new("a")).await.unwrap();
        assert_eq!(resolver.inner().track_calls.load(Ordering::SeqCst), 4);

        resolver.clear().await;
        assert!(resolver.is_empty().await);
    }
}
