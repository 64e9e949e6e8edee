//! Core types for queue management

use encore_core::{SourceDescriptor, Track};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Queue-local identity of one occurrence of a track
///
/// Issued from a counter owned by the queue, so ids are never reused for the
/// lifetime of the engine, across replaces and reshuffles alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw counter value
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One occurrence of a track within the queue
#[derive(Debug, Clone, PartialEq)]
pub struct QueueEntry {
    /// Queue-local identity
    pub entry_id: EntryId,

    /// Track Reference snapshot
    pub track: Arc<Track>,

    /// Position in canonical (insertion) order
    pub canonical_index: usize,
}

/// Options for `replace`
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOptions {
    /// Track to start on, as an index into the supplied list
    pub initial_index: usize,

    /// Provenance of the new queue
    pub source: SourceDescriptor,

    /// Start in shuffled mode, pinning the initial track first
    pub shuffle: bool,
}

impl ReplaceOptions {
    /// Start at `initial_index` of `source`, unshuffled
    pub fn new(initial_index: usize, source: SourceDescriptor) -> Self {
        Self {
            initial_index,
            source,
            shuffle: false,
        }
    }

    /// Single ad-hoc track, the shape used when a queue starts from empty
    pub fn adhoc() -> Self {
        Self::new(0, SourceDescriptor::adhoc())
    }

    /// Set shuffle mode
    pub fn shuffled(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

/// Result of a mutation that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Committed to the store
    Applied,

    /// A mutation issued later committed first; this one was dropped
    Superseded,
}

impl MutationOutcome {
    /// Whether the mutation reached the store
    pub fn is_applied(self) -> bool {
        self == MutationOutcome::Applied
    }
}

/// Playback state reported by the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded
    Stopped,

    /// Connecting or buffering
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,

    /// Current track reached its end; the queue does not advance on its own
    Ended,
}

/// A playback failure reported by the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackFailure {
    /// Entry that failed to stream or decode
    pub entry_id: EntryId,

    /// Bridge-supplied description
    pub message: String,
}

/// Latest playback status, folded from bridge events
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackStatus {
    pub state: PlaybackState,
    pub position: Duration,
    pub duration: Duration,
    pub last_error: Option<PlaybackFailure>,
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            state: PlaybackState::Stopped,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            last_error: None,
        }
    }
}

/// Configuration for the queue engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Upper bound on catalog resolution inside a mutation, in milliseconds
    /// (default: 30000, `None` waits indefinitely)
    pub resolve_timeout_ms: Option<u64>,

    /// Capacity of the bridge event channel (default: 64)
    pub bridge_event_buffer: usize,
}

impl EngineConfig {
    /// Resolution timeout as a `Duration`
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            resolve_timeout_ms: Some(30_000),
            bridge_event_buffer: 64,
        }
    }
}
