//! Shared fixtures for engine integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use encore_core::{CatalogError, CatalogResolver, SourceKind, Track, TrackId};
use encore_queue::{PlaybackBridge, QueueEntry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// Install a test subscriber once; later calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn track(id: &str) -> Track {
    Track::new(TrackId::new(id), format!("Song {}", id), "Test Artist")
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

pub fn ids(entries: &[QueueEntry]) -> Vec<String> {
    entries.iter().map(|e| e.track.id.to_string()).collect()
}

// ===== Scripted resolver =====

type Reply<T> = oneshot::Receiver<encore_core::Result<T>>;

/// Resolver whose answers are released by the test
///
/// Every scripted key answers exactly once, when the test sends on the
/// matching gate. Unscripted track ids resolve immediately.
#[derive(Default)]
pub struct ScriptedResolver {
    tracks: Mutex<HashMap<String, Reply<Track>>>,
    collections: Mutex<HashMap<String, Reply<Vec<Track>>>>,
}

/// Sender half of a scripted answer
pub struct Gate<T>(oneshot::Sender<encore_core::Result<T>>);

impl<T> Gate<T> {
    pub fn release(self, answer: encore_core::Result<T>) {
        let _ = self.0.send(answer);
    }
}

impl ScriptedResolver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn script_track(&self, id: &str) -> Gate<Track> {
        let (tx, rx) = oneshot::channel();
        self.tracks.lock().unwrap().insert(id.to_string(), rx);
        Gate(tx)
    }

    pub fn script_collection(&self, id: &str) -> Gate<Vec<Track>> {
        let (tx, rx) = oneshot::channel();
        self.collections.lock().unwrap().insert(id.to_string(), rx);
        Gate(tx)
    }
}

#[async_trait]
impl CatalogResolver for ScriptedResolver {
    async fn fetch_track(&self, id: &TrackId) -> encore_core::Result<Track> {
        let pending = self.tracks.lock().unwrap().remove(id.as_str());
        match pending {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(CatalogError::network("gate dropped"))),
            None => Ok(track(id.as_str())),
        }
    }

    async fn fetch_tracks_for(&self, kind: SourceKind, id: &str) -> encore_core::Result<Vec<Track>> {
        let pending = self.collections.lock().unwrap().remove(id);
        match pending {
            Some(reply) => reply
                .await
                .unwrap_or_else(|_| Err(CatalogError::network("gate dropped"))),
            None => Err(CatalogError::not_found(kind.entity_name(), id)),
        }
    }
}

// ===== Recording bridge =====

#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    Load { tracks: Vec<String>, start: usize },
    UpdateQueue { tracks: Vec<String>, current: usize },
    PlayAt(usize),
    Pause,
    Resume,
    SeekTo(Duration),
    Stop,
}

/// Bridge that remembers every directive in order
#[derive(Default)]
pub struct RecordingBridge {
    directives: Mutex<Vec<Directive>>,
}

impl RecordingBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<Directive> {
        std::mem::take(&mut *self.directives.lock().unwrap())
    }

    fn record(&self, directive: Directive) {
        self.directives.lock().unwrap().push(directive);
    }
}

impl PlaybackBridge for RecordingBridge {
    fn load(&self, entries: &[QueueEntry], start_index: usize) {
        self.record(Directive::Load {
            tracks: ids(entries),
            start: start_index,
        });
    }

    fn update_queue(&self, entries: &[QueueEntry], current_index: usize) {
        self.record(Directive::UpdateQueue {
            tracks: ids(entries),
            current: current_index,
        });
    }

    fn play_at(&self, index: usize) {
        self.record(Directive::PlayAt(index));
    }

    fn pause(&self) {
        self.record(Directive::Pause);
    }

    fn resume(&self) {
        self.record(Directive::Resume);
    }

    fn seek_to(&self, position: Duration) {
        self.record(Directive::SeekTo(position));
    }

    fn stop(&self) {
        self.record(Directive::Stop);
    }
}
