//! Library item dispatch
//!
//! What happens when the user taps a row in a library list or picks an
//! option from a track's action sheet. Search results are pressed the same
//! way, and are remembered in a search history first.

use crate::engine::QueueEngine;
use crate::error::Result;
use crate::types::MutationOutcome;
use encore_core::{AlbumId, ArtistId, ItemKind, LibraryItem, PlaylistId, TrackId};
use std::future::Future;

/// Screen to open for a collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Album(AlbumId),
    Playlist(PlaylistId),
    Artist(ArtistId),
}

/// Result of pressing a library item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// A track was handed to the queue
    Played(MutationOutcome),

    /// A collection was pressed; the caller should navigate
    Navigate(Route),
}

/// Action sheet options for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetAction {
    /// Insert right after the current entry
    PlayNext,

    /// Append to the end of the queue
    AddToQueue,
}

/// A pressed search result, as kept in the search history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistoryEntry {
    pub kind: ItemKind,
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover_art: String,
}

impl From<&LibraryItem> for SearchHistoryEntry {
    fn from(item: &LibraryItem) -> Self {
        Self {
            kind: item.kind,
            id: item.id.clone(),
            name: item.title.clone(),
            description: item.subtitle.clone().unwrap_or_default(),
            cover_art: item.cover_art.clone().unwrap_or_default(),
        }
    }
}

/// Store for recently pressed search results
///
/// The implementation owns timestamps and persistence.
pub trait SearchHistory: Send + Sync {
    fn record(&self, entry: SearchHistoryEntry);
}

/// Options for pressing a search result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPressOptions {
    /// Record the item in the search history (default `true`)
    pub add_to_history: bool,
}

impl Default for SearchPressOptions {
    fn default() -> Self {
        Self { add_to_history: true }
    }
}

enum Pressed<F> {
    Play(F),
    Navigate(Route),
}

impl QueueEngine {
    /// Handle a tap on a library item
    ///
    /// A track press takes its place in call order immediately.
    pub fn press(&self, item: &LibraryItem) -> impl Future<Output = Result<PressOutcome>> + '_ {
        let id = item.id.as_str();

        let pressed = match item.kind {
            ItemKind::Track => Pressed::Play(self.play_track_now(&TrackId::new(id))),
            ItemKind::Album => Pressed::Navigate(Route::Album(AlbumId::new(id))),
            ItemKind::Playlist => Pressed::Navigate(Route::Playlist(PlaylistId::new(id))),
            ItemKind::Artist => Pressed::Navigate(Route::Artist(ArtistId::new(id))),
        };

        async move {
            match pressed {
                Pressed::Play(play) => play.await.map(PressOutcome::Played),
                Pressed::Navigate(route) => Ok(PressOutcome::Navigate(route)),
            }
        }
    }

    /// Handle a tap on a search result
    ///
    /// Records the item in `history` (unless disabled), then behaves like
    /// [`press`](Self::press).
    pub fn press_search_result(
        &self,
        item: &LibraryItem,
        history: &dyn SearchHistory,
        options: SearchPressOptions,
    ) -> impl Future<Output = Result<PressOutcome>> + '_ {
        if options.add_to_history {
            history.record(SearchHistoryEntry::from(item));
        }
        self.press(item)
    }

    /// Run an action sheet option on a track
    pub fn sheet_action(
        &self,
        track_id: &TrackId,
        action: SheetAction,
    ) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        let track_id = track_id.clone();

        async move {
            match action {
                SheetAction::PlayNext => self.play_next_seq(seq, track_id).await,
                SheetAction::AddToQueue => self.add_seq(seq, track_id).await,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::NullBridge;
    use async_trait::async_trait;
    use encore_core::{CatalogError, CatalogResolver, SourceKind, Track};
    use std::sync::Arc;

    /// Knows every track id, no collections
    struct AnyTrack;

    #[async_trait]
    impl CatalogResolver for AnyTrack {
        async fn fetch_track(&self, id: &TrackId) -> encore_core::Result<Track> {
            Ok(Track::new(id.clone(), "Song", "Artist"))
        }

        async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> encore_core::Result<Vec<Track>> {
            Err(CatalogError::not_found(kind.entity_name(), id))
        }
    }

    fn engine() -> QueueEngine {
        QueueEngine::new(Arc::new(AnyTrack), Arc::new(NullBridge))
    }

    #[tokio::test]
    async fn pressing_a_track_plays_it() {
        let engine = engine();
        let item = LibraryItem::new(ItemKind::Track, "tr-5", "Song");

        let outcome = engine.press(&item).await.unwrap();
        assert_eq!(outcome, PressOutcome::Played(MutationOutcome::Applied));
        assert_eq!(engine.snapshot().now_playing.unwrap().id.as_str(), "tr-5");
    }

    #[tokio::test]
    async fn pressing_collections_navigates() {
        let engine = engine();

        let cases = [
            (ItemKind::Album, PressOutcome::Navigate(Route::Album(AlbumId::new("x")))),
            (ItemKind::Playlist, PressOutcome::Navigate(Route::Playlist(PlaylistId::new("x")))),
            (ItemKind::Artist, PressOutcome::Navigate(Route::Artist(ArtistId::new("x")))),
        ];
        for (kind, expected) in cases {
            let item = LibraryItem::new(kind, "x", "Collection");
            assert_eq!(engine.press(&item).await.unwrap(), expected);
        }

        assert!(engine.snapshot().is_empty());
    }

    #[tokio::test]
    async fn sheet_actions_map_to_mutations() {
        let engine = engine();
        engine.press(&LibraryItem::new(ItemKind::Track, "a", "A")).await.unwrap();

        engine
            .sheet_action(&TrackId::new("end"), SheetAction::AddToQueue)
            .await
            .unwrap();
        engine
            .sheet_action(&TrackId::new("next"), SheetAction::PlayNext)
            .await
            .unwrap();

        let ids: Vec<String> = engine
            .snapshot()
            .entries
            .iter()
            .map(|e| e.track.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "next", "end"]);
    }

    #[derive(Default)]
    struct RecordedHistory(std::sync::Mutex<Vec<SearchHistoryEntry>>);

    impl SearchHistory for RecordedHistory {
        fn record(&self, entry: SearchHistoryEntry) {
            self.0.lock().unwrap().push(entry);
        }
    }

    #[tokio::test]
    async fn search_press_records_history_then_dispatches() {
        let engine = engine();
        let history = RecordedHistory::default();

        let mut album = LibraryItem::new(ItemKind::Album, "al-1", "Debut");
        album.subtitle = Some("The Band".into());
        let outcome = engine
            .press_search_result(&album, &history, SearchPressOptions::default())
            .await
            .unwrap();
        assert_eq!(outcome, PressOutcome::Navigate(Route::Album(AlbumId::new("al-1"))));

        let track = LibraryItem::new(ItemKind::Track, "tr-1", "Intro");
        engine
            .press_search_result(&track, &history, SearchPressOptions::default())
            .await
            .unwrap();
        assert_eq!(engine.snapshot().now_playing.unwrap().id.as_str(), "tr-1");

        let recorded = history.0.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].kind, ItemKind::Album);
        assert_eq!(recorded[0].name, "Debut");
        assert_eq!(recorded[0].description, "The Band");
        assert_eq!(recorded[0].cover_art, "");
        assert_eq!(recorded[1].id, "tr-1");
    }

    #[tokio::test]
    async fn search_press_can_skip_history() {
        let engine = engine();
        let history = RecordedHistory::default();
        let item = LibraryItem::new(ItemKind::Track, "tr-1", "Intro");

        engine
            .press_search_result(&item, &history, SearchPressOptions { add_to_history: false })
            .await
            .unwrap();

        assert!(history.0.lock().unwrap().is_empty());
        assert!(!engine.snapshot().is_empty());
    }

    #[tokio::test]
    async fn sheet_action_takes_its_place_at_call_time() {
        let engine = engine();
        engine.press(&LibraryItem::new(ItemKind::Track, "a", "A")).await.unwrap();

        // Created first, awaited last: still ordered before the add
        let next = engine.sheet_action(&TrackId::new("next"), SheetAction::PlayNext);
        let add = engine.sheet_action(&TrackId::new("end"), SheetAction::AddToQueue);

        assert_eq!(add.await.unwrap(), MutationOutcome::Applied);
        assert_eq!(next.await.unwrap(), MutationOutcome::Superseded);
    }
}
