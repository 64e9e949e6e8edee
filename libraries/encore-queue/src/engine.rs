//! Queue engine - mutation API and orchestration
//!
//! Coordinates the catalog resolver, the queue store and the playback bridge.
//!
//! Every mutation draws a sequence number when it is called, resolves its
//! tracks without holding the store, then commits under the store lock. A
//! commit whose sequence number is not newer than the last committed one is
//! discarded, so mutations land in call order even when their resolutions
//! finish out of order.

use crate::bridge::PlaybackBridge;
use crate::error::{QueueError, Result};
use crate::events::BridgeEvent;
use crate::queue::{Change, QueueState};
use crate::snapshot::QueueSnapshot;
use crate::types::{EngineConfig, EntryId, MutationOutcome, PlaybackState, PlaybackStatus, ReplaceOptions};
use encore_core::{CatalogError, CatalogResolver, SourceDescriptor, SourceKind, Track, TrackId};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Playback queue engine
///
/// A cheaply cloneable handle; every clone drives the same queue.
#[derive(Clone)]
pub struct QueueEngine {
    inner: Arc<Inner>,
}

struct Inner {
    resolver: Arc<dyn CatalogResolver>,
    bridge: Arc<dyn PlaybackBridge>,
    state: Mutex<QueueState>,
    next_seq: AtomicU64,
    snapshot_tx: watch::Sender<QueueSnapshot>,
    playback_tx: watch::Sender<PlaybackStatus>,
    config: EngineConfig,
}

impl QueueEngine {
    /// Create an engine with default configuration
    pub fn new(resolver: Arc<dyn CatalogResolver>, bridge: Arc<dyn PlaybackBridge>) -> Self {
        Self::with_config(resolver, bridge, EngineConfig::default())
    }

    /// Create an engine
    pub fn with_config(
        resolver: Arc<dyn CatalogResolver>,
        bridge: Arc<dyn PlaybackBridge>,
        config: EngineConfig,
    ) -> Self {
        let (snapshot_tx, _) = watch::channel(QueueSnapshot::default());
        let (playback_tx, _) = watch::channel(PlaybackStatus::default());

        Self {
            inner: Arc::new(Inner {
                resolver,
                bridge,
                state: Mutex::new(QueueState::new()),
                next_seq: AtomicU64::new(0),
                snapshot_tx,
                playback_tx,
                config,
            }),
        }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.inner.config
    }

    // ===== Subscribers =====

    /// Receive a snapshot after every commit
    pub fn subscribe(&self) -> watch::Receiver<QueueSnapshot> {
        self.inner.snapshot_tx.subscribe()
    }

    /// Latest committed snapshot
    pub fn snapshot(&self) -> QueueSnapshot {
        self.inner.snapshot_tx.borrow().clone()
    }

    /// Receive playback status updates
    pub fn subscribe_playback(&self) -> watch::Receiver<PlaybackStatus> {
        self.inner.playback_tx.subscribe()
    }

    /// Latest playback status
    pub fn playback(&self) -> PlaybackStatus {
        self.inner.playback_tx.borrow().clone()
    }

    // ===== Mutations =====

    // Each entry point draws its sequence number before returning the future.

    /// Replace the whole queue with already resolved tracks
    pub fn replace(
        &self,
        tracks: Vec<Track>,
        options: ReplaceOptions,
    ) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        async move {
            self.commit(seq, "replace", |state| state.replace(tracks, &options))
                .await
        }
    }

    /// Resolve a collection and replace the queue with it, starting at its
    /// first track
    pub fn play_collection(
        &self,
        kind: SourceKind,
        id: &str,
        name: &str,
        shuffle: bool,
    ) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        self.play_collection_seq(seq, kind, id.to_string(), name.to_string(), shuffle)
    }

    /// `play_collection` on a detached task
    ///
    /// The sequence number is drawn now, so the mutation keeps its place in
    /// call order even though it runs later.
    pub fn spawn_play_collection(
        &self,
        kind: SourceKind,
        id: impl Into<String>,
        name: impl Into<String>,
        shuffle: bool,
    ) -> JoinHandle<Result<MutationOutcome>> {
        let seq = self.next_seq();
        let engine = self.clone();
        let (id, name) = (id.into(), name.into());

        tokio::spawn(async move { engine.play_collection_seq(seq, kind, id, name, shuffle).await })
    }

    /// Append a track to the end of the queue
    pub fn add(&self, track_id: &TrackId) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        self.add_seq(seq, track_id.clone())
    }

    /// `add` on a detached task
    pub fn spawn_add(&self, track_id: TrackId) -> JoinHandle<Result<MutationOutcome>> {
        let seq = self.next_seq();
        let engine = self.clone();

        tokio::spawn(async move { engine.add_seq(seq, track_id).await })
    }

    /// Insert a track right after the current one
    pub fn play_next(&self, track_id: &TrackId) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        self.play_next_seq(seq, track_id.clone())
    }

    /// Play a track immediately
    ///
    /// Jumps to the first queued occurrence if there is one, without asking
    /// the catalog. Otherwise the track is resolved, inserted after the
    /// current entry and played.
    pub fn play_track_now(&self, track_id: &TrackId) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        let track_id = track_id.clone();

        async move {
            {
                let mut state = self.inner.state.lock().await;
                if let Some(position) = state.position_of_track(&track_id) {
                    return self.commit_locked(&mut state, seq, "play_track_now", |state| {
                        state.jump_to(position)
                    });
                }
            }

            let track = self.resolve_track(&track_id).await?;

            self.commit(seq, "play_track_now", |state| {
                match state.position_of_track(&track.id) {
                    Some(position) => state.jump_to(position),
                    None => Ok(state.play_now(track)),
                }
            })
            .await
        }
    }

    /// Turn shuffle on or off, keeping the current entry playing
    pub fn set_shuffle(&self, enabled: bool) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        async move {
            self.commit(seq, "set_shuffle", |state| Ok(state.set_shuffle(enabled)))
                .await
        }
    }

    /// Remove one entry
    pub fn remove(&self, entry_id: EntryId) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        async move { self.commit(seq, "remove", |state| state.remove(entry_id)).await }
    }

    /// Play a specific queued entry
    pub fn jump_to(&self, entry_id: EntryId) -> impl Future<Output = Result<MutationOutcome>> + '_ {
        let seq = self.next_seq();
        async move {
            self.commit(seq, "jump_to", |state| state.jump_to_entry(entry_id))
                .await
        }
    }

    /// Tear down the session
    ///
    /// Empties the queue, stops the bridge and supersedes every mutation
    /// still resolving, including those called earlier but not yet polled.
    pub fn reset(&self) -> impl Future<Output = ()> + '_ {
        let seq = self.next_seq();
        async move {
            let outcome = self
                .commit(seq, "reset", |state| Ok(state.clear()))
                .await;
            if let Err(e) = outcome {
                warn!(seq, "Reset failed: {}", e);
            }

            self.inner.playback_tx.send_replace(PlaybackStatus::default());
            info!(seq, "Queue reset");
        }
    }

    // ===== Navigation =====

    /// Advance to the next entry; no-op at the end
    pub async fn skip_forward(&self) {
        let mut state = self.inner.state.lock().await;
        let change = state.skip_forward();
        self.apply_change(&state, change, "skip_forward");
    }

    /// Go back to the previous entry; no-op at the start
    pub async fn skip_backward(&self) {
        let mut state = self.inner.state.lock().await;
        let change = state.skip_backward();
        self.apply_change(&state, change, "skip_backward");
    }

    // ===== Transport =====

    /// Pause playback
    pub async fn pause(&self) {
        let _state = self.inner.state.lock().await;
        self.inner.bridge.pause();
    }

    /// Resume playback
    pub async fn resume(&self) {
        let _state = self.inner.state.lock().await;
        self.inner.bridge.resume();
    }

    /// Seek within the current entry
    pub async fn seek_to(&self, position: Duration) {
        let _state = self.inner.state.lock().await;
        self.inner.bridge.seek_to(position);
    }

    /// Pause when playing, otherwise (re)start the current entry
    pub async fn toggle_playback(&self) {
        let state = self.inner.state.lock().await;
        let playback = self.playback().state;

        match playback {
            PlaybackState::Playing | PlaybackState::Loading => self.inner.bridge.pause(),
            PlaybackState::Paused => self.inner.bridge.resume(),
            PlaybackState::Stopped | PlaybackState::Ended => {
                if let Some(position) = state.position() {
                    self.inner.bridge.play_at(position);
                }
            }
        }
    }

    // ===== Bridge events =====

    /// Fold bridge events into the playback status until the channel closes
    pub fn attach_bridge_events(&self, mut events: mpsc::Receiver<BridgeEvent>) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match &event {
                    BridgeEvent::Error { entry_id, message } => {
                        warn!(entry_id = %entry_id, "Playback failed: {}", message);
                    }
                    BridgeEvent::TrackEnded { entry_id } => {
                        debug!(entry_id = %entry_id, "Track ended");
                    }
                    _ => {}
                }
                inner.playback_tx.send_modify(|status| status.apply(&event));
            }
            debug!("Bridge event channel closed");
        })
    }

    /// Create a bridge event channel and attach it
    ///
    /// Hand the sender to the native player. The pump stops once every
    /// sender is dropped.
    pub fn bridge_event_channel(&self) -> mpsc::Sender<BridgeEvent> {
        let (tx, rx) = mpsc::channel(self.inner.config.bridge_event_buffer.max(1));
        self.attach_bridge_events(rx);
        tx
    }

    // ===== Internals =====

    pub(crate) fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) async fn add_seq(&self, seq: u64, track_id: TrackId) -> Result<MutationOutcome> {
        let track = self.resolve_track(&track_id).await?;

        self.commit(seq, "add", |state| Ok(state.append(track)))
            .await
    }

    pub(crate) async fn play_next_seq(&self, seq: u64, track_id: TrackId) -> Result<MutationOutcome> {
        let track = self.resolve_track(&track_id).await?;

        self.commit(seq, "play_next", |state| Ok(state.insert_next(track)))
            .await
    }

    async fn play_collection_seq(
        &self,
        seq: u64,
        kind: SourceKind,
        id: String,
        name: String,
        shuffle: bool,
    ) -> Result<MutationOutcome> {
        let tracks = self
            .resolve(self.inner.resolver.fetch_tracks_for(kind, &id))
            .await?;
        debug!(seq, kind = ?kind, id = %id, count = tracks.len(), "Resolved collection");

        let options = ReplaceOptions::new(0, SourceDescriptor::new(kind, id, name)).shuffled(shuffle);
        self.commit(seq, "play_collection", |state| state.replace(tracks, &options))
            .await
    }

    async fn resolve_track(&self, track_id: &TrackId) -> Result<Track> {
        self.resolve(self.inner.resolver.fetch_track(track_id))
            .await
    }

    async fn resolve<T, F>(&self, fetch: F) -> Result<T>
    where
        F: Future<Output = encore_core::Result<T>>,
    {
        let result = match self.inner.config.resolve_timeout() {
            Some(limit) => match tokio::time::timeout(limit, fetch).await {
                Ok(result) => result,
                Err(_) => Err(CatalogError::network(format!(
                    "catalog did not respond within {:?}",
                    limit
                ))),
            },
            None => fetch.await,
        };

        result.map_err(|e| {
            debug!("Resolution failed: {}", e);
            QueueError::from(e)
        })
    }

    async fn commit<F>(&self, seq: u64, op: &'static str, apply: F) -> Result<MutationOutcome>
    where
        F: FnOnce(&mut QueueState) -> Result<Change>,
    {
        let mut state = self.inner.state.lock().await;
        self.commit_locked(&mut state, seq, op, apply)
    }

    fn commit_locked<F>(
        &self,
        state: &mut QueueState,
        seq: u64,
        op: &'static str,
        apply: F,
    ) -> Result<MutationOutcome>
    where
        F: FnOnce(&mut QueueState) -> Result<Change>,
    {
        let latest = state.last_committed_seq();
        if seq <= latest {
            warn!(seq, latest, op, "{}", QueueError::StaleMutation { seq, latest });
            return Ok(MutationOutcome::Superseded);
        }

        let change = apply(state)?;
        state.mark_committed(seq);
        debug_assert!(state.check_invariants().is_ok());

        debug!(seq, op, change = ?change, len = state.len(), position = ?state.position(), "Committed");
        self.apply_change(state, change, op);

        Ok(MutationOutcome::Applied)
    }

    fn apply_change(&self, state: &QueueState, change: Change, op: &'static str) {
        let bridge = &self.inner.bridge;

        match (change, state.position()) {
            (Change::Unchanged, _) => return,
            (Change::Loaded, Some(position)) => {
                info!(op, len = state.len(), position, "Loading queue");
                bridge.load(&state.active_entries(), position);
            }
            (Change::Moved, Some(position)) => bridge.play_at(position),
            (Change::Reordered, Some(position)) => {
                bridge.update_queue(&state.active_entries(), position);
            }
            (Change::Cleared, _) | (_, None) => {
                info!(op, "Queue emptied, stopping playback");
                bridge.stop();
            }
        }

        self.inner.snapshot_tx.send_replace(QueueSnapshot::capture(state));
    }
}

impl std::fmt::Debug for QueueEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueueEngine")
            .field("next_seq", &self.inner.next_seq.load(Ordering::Relaxed))
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
