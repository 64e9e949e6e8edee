//! Queue snapshots
//!
//! Immutable views of the store, published after every commit.

use crate::queue::QueueState;
use crate::types::{EntryId, QueueEntry};
use encore_core::{SourceDescriptor, Track};
use std::sync::Arc;

/// Read-only view of the queue at one commit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueueSnapshot {
    /// Entries in active order
    pub entries: Vec<QueueEntry>,

    /// Cursor into `entries`
    pub position: Option<usize>,

    /// Track under the cursor
    pub now_playing: Option<Arc<Track>>,

    /// Entry under the cursor
    pub now_playing_entry: Option<EntryId>,

    pub can_go_forward: bool,
    pub can_go_backward: bool,

    /// Provenance of the queue
    pub source: Option<SourceDescriptor>,

    pub shuffled: bool,

    /// Lowest position visited since the last replace
    pub history_bound: Option<usize>,
}

impl QueueSnapshot {
    /// Capture the current store
    pub fn capture(state: &QueueState) -> Self {
        Self {
            entries: state.active_entries(),
            position: state.position(),
            now_playing: state.now_playing(),
            now_playing_entry: state.current_entry_id(),
            can_go_forward: state.can_go_forward(),
            can_go_backward: state.can_go_backward(),
            source: state.source().cloned(),
            shuffled: state.is_shuffled(),
            history_bound: state.history_bound(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries between the history bound and the cursor, oldest first
    pub fn history(&self) -> &[QueueEntry] {
        match (self.history_bound, self.position) {
            (Some(bound), Some(position)) if bound <= position => &self.entries[bound..position],
            _ => &[],
        }
    }

    /// Entries after the cursor
    pub fn upcoming(&self) -> &[QueueEntry] {
        match self.position {
            Some(position) => &self.entries[position + 1..],
            None => &[],
        }
    }
}
