//! Encore - Playback Queue Engine
//!
//! The queue behind a streaming client's "now playing" screen.
//!
//! This crate provides:
//! - A queue store with canonical and active (shuffled) orders
//! - Shuffle that keeps the chosen track first
//! - Mutations (`replace`, `add`, `play_next`, `play_track_now`, ...) that
//!   resolve tracks through a [`CatalogResolver`](encore_core::CatalogResolver)
//! - Call-order commits: a slow mutation never overwrites a newer one
//! - Bounded navigation (no repeat, no wrap-around)
//! - Snapshots and playback status over `tokio::sync::watch`
//!
//! # Architecture
//!
//! `encore-queue` never talks to the network or to audio hardware:
//! - Tracks come in through `CatalogResolver`
//! - Directives go out through [`PlaybackBridge`]
//! - Player feedback comes back as [`BridgeEvent`]s
//!
//! # Example
//!
//! ```rust
//! use encore_core::{CatalogError, CatalogResolver, SourceKind, Track, TrackId};
//! use encore_queue::{NullBridge, QueueEngine};
//! use std::sync::Arc;
//!
//! struct Catalog;
//!
//! #[async_trait::async_trait]
//! impl CatalogResolver for Catalog {
//!     async fn fetch_track(&self, id: &TrackId) -> encore_core::Result<Track> {
//!         Ok(Track::new(id.clone(), "Song", "Artist"))
//!     }
//!
//!     async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> encore_core::Result<Vec<Track>> {
//!         Err(CatalogError::not_found(kind.entity_name(), id))
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let engine = QueueEngine::new(Arc::new(Catalog), Arc::new(NullBridge));
//!
//! engine.add(&TrackId::new("tr-1")).await.unwrap();
//! engine.play_next(&TrackId::new("tr-2")).await.unwrap();
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.now_playing.unwrap().id.as_str(), "tr-1");
//! assert!(snapshot.can_go_forward);
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod actions;
pub mod bridge;
pub mod engine;
pub mod error;
pub mod events;
pub mod navigation;
pub mod queue;
pub mod shuffle;
pub mod snapshot;
pub mod types;

pub use actions::{
    PressOutcome, Route, SearchHistory, SearchHistoryEntry, SearchPressOptions, SheetAction,
};
pub use bridge::{NullBridge, PlaybackBridge};
pub use engine::QueueEngine;
pub use error::{QueueError, Result};
pub use events::BridgeEvent;
pub use queue::{Change, QueueState};
pub use snapshot::QueueSnapshot;
pub use types::{
    EngineConfig, EntryId, MutationOutcome, PlaybackFailure, PlaybackState, PlaybackStatus,
    QueueEntry, ReplaceOptions,
};
