//! Queue state store
//!
//! Holds the canonical order, the active (possibly shuffled) order, the
//! cursor and the provenance of the queue.
//!
//! ```text
//! canonical:  [A₀ B₁ C₂ D₃]          entries in insertion order
//! active:     [2  0  3  1]           canonical indices in play order
//! position:    ^                      cursor into `active` (C is playing)
//! ```
//!
//! `active` stores canonical indices rather than entries, so it is a
//! permutation of `canonical` by construction. Every operation validates
//! first and mutates after, so a failed operation leaves the state as it was.

use crate::error::{QueueError, Result};
use crate::shuffle::shuffle_pinned;
use crate::types::{EntryId, QueueEntry, ReplaceOptions};
use encore_core::{SourceDescriptor, Track, TrackId};
use std::sync::Arc;

/// What a committed operation means for the playback bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Active order changed under a new current entry: reload and start at
    /// the cursor
    Loaded,

    /// The cursor moved to a different entry: play it
    Moved,

    /// Entries changed around an unchanged current entry: refresh lookahead
    Reordered,

    /// The queue is now empty: stop
    Cleared,

    /// Nothing observable changed
    Unchanged,
}

#[derive(Debug, Clone)]
struct Slot {
    entry_id: EntryId,
    track: Arc<Track>,
}

/// The queue aggregate
#[derive(Debug, Clone, Default)]
pub struct QueueState {
    canonical: Vec<Slot>,
    active: Vec<usize>,
    position: Option<usize>,
    shuffled: bool,
    source: Option<SourceDescriptor>,
    history_bound: Option<usize>,
    next_entry_id: u64,
    last_committed: u64,
}

impl QueueState {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Reads =====

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Cursor into active order, `None` when empty
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Whether active order is a shuffle of canonical order
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Provenance of the queue content
    pub fn source(&self) -> Option<&SourceDescriptor> {
        self.source.as_ref()
    }

    /// Lowest position visited since the queue was last replaced
    pub fn history_bound(&self) -> Option<usize> {
        self.history_bound
    }

    /// The track under the cursor
    pub fn now_playing(&self) -> Option<Arc<Track>> {
        self.current_slot().map(|slot| Arc::clone(&slot.track))
    }

    /// Entry id under the cursor
    pub fn current_entry_id(&self) -> Option<EntryId> {
        self.current_slot().map(|slot| slot.entry_id)
    }

    /// Entry at a position in active order
    pub fn entry_at(&self, position: usize) -> Option<QueueEntry> {
        let canonical_index = *self.active.get(position)?;
        Some(self.entry(canonical_index))
    }

    /// Entries in play order
    pub fn active_entries(&self) -> Vec<QueueEntry> {
        self.active.iter().map(|&index| self.entry(index)).collect()
    }

    /// Entries in insertion order
    pub fn canonical_entries(&self) -> Vec<QueueEntry> {
        (0..self.canonical.len()).map(|index| self.entry(index)).collect()
    }

    /// First position in active order holding this track
    pub fn position_of_track(&self, track_id: &TrackId) -> Option<usize> {
        self.active
            .iter()
            .position(|&index| self.canonical[index].track.id == *track_id)
    }

    /// Position in active order of this entry
    pub fn position_of_entry(&self, entry_id: EntryId) -> Option<usize> {
        self.active
            .iter()
            .position(|&index| self.canonical[index].entry_id == entry_id)
    }

    /// Sequence number of the last committed mutation
    pub fn last_committed_seq(&self) -> u64 {
        self.last_committed
    }

    pub(crate) fn mark_committed(&mut self, seq: u64) {
        self.last_committed = seq;
    }

    // ===== Writes =====

    /// Replace the whole queue
    ///
    /// # Errors
    /// `EmptyQueue` if `tracks` is empty, `IndexOutOfRange` if
    /// `options.initial_index` is not a valid index into `tracks`
    pub fn replace(&mut self, tracks: Vec<Track>, options: &ReplaceOptions) -> Result<Change> {
        if tracks.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        if options.initial_index >= tracks.len() {
            return Err(QueueError::IndexOutOfRange {
                index: options.initial_index,
                len: tracks.len(),
            });
        }

        let canonical: Vec<Slot> = tracks.into_iter().map(|track| self.issue(track)).collect();
        let identity: Vec<usize> = (0..canonical.len()).collect();

        let (active, position) = if options.shuffle {
            (shuffle_pinned(&identity, Some(&options.initial_index)), 0)
        } else {
            (identity, options.initial_index)
        };

        self.canonical = canonical;
        self.active = active;
        self.position = Some(position);
        self.shuffled = options.shuffle;
        self.source = Some(options.source.clone());
        self.history_bound = Some(position);

        Ok(Change::Loaded)
    }

    /// Append a track to the tail of both orders
    ///
    /// On an empty queue this starts an ad-hoc single-track queue.
    pub fn append(&mut self, track: Track) -> Change {
        if self.is_empty() {
            return self.start_adhoc(track);
        }

        let slot = self.issue(track);
        self.canonical.push(slot);
        self.active.push(self.canonical.len() - 1);
        Change::Reordered
    }

    /// Insert a track right after the cursor
    ///
    /// Unshuffled, the canonical insertion point mirrors the active one.
    /// Shuffled, the entry is appended to canonical order.
    pub fn insert_next(&mut self, track: Track) -> Change {
        let Some(position) = self.position else {
            return self.start_adhoc(track);
        };

        self.insert_after(position, track);
        Change::Reordered
    }

    /// Insert a track right after the cursor and move onto it
    pub fn play_now(&mut self, track: Track) -> Change {
        let Some(position) = self.position else {
            return self.start_adhoc(track);
        };

        self.insert_after(position, track);
        self.move_cursor(position + 1);
        Change::Loaded
    }

    /// Move the cursor to a position in active order
    ///
    /// # Errors
    /// `IndexOutOfRange` if `position` is past the end of the queue
    pub fn jump_to(&mut self, position: usize) -> Result<Change> {
        if position >= self.len() {
            return Err(QueueError::IndexOutOfRange {
                index: position,
                len: self.len(),
            });
        }

        self.move_cursor(position);
        Ok(Change::Moved)
    }

    /// Move the cursor to an entry
    ///
    /// # Errors
    /// `UnknownEntry` if no such entry is queued
    pub fn jump_to_entry(&mut self, entry_id: EntryId) -> Result<Change> {
        let position = self
            .position_of_entry(entry_id)
            .ok_or(QueueError::UnknownEntry(entry_id))?;
        self.jump_to(position)
    }

    /// Remove one entry from both orders
    ///
    /// Removing the current entry keeps the cursor index (clamped to the new
    /// tail), so the following entry becomes current.
    ///
    /// # Errors
    /// `UnknownEntry` if no such entry is queued
    pub fn remove(&mut self, entry_id: EntryId) -> Result<Change> {
        let removed_at = self
            .position_of_entry(entry_id)
            .ok_or(QueueError::UnknownEntry(entry_id))?;
        let Some(position) = self.position else {
            return Err(QueueError::UnknownEntry(entry_id));
        };

        if self.len() == 1 {
            return Ok(self.clear());
        }

        let canonical_index = self.active.remove(removed_at);
        self.canonical.remove(canonical_index);
        for index in &mut self.active {
            if *index > canonical_index {
                *index -= 1;
            }
        }

        if let Some(bound) = self.history_bound {
            if bound > removed_at {
                self.history_bound = Some(bound - 1);
            }
        }

        if removed_at < position {
            self.position = Some(position - 1);
            Ok(Change::Reordered)
        } else if removed_at == position {
            self.move_cursor(position.min(self.len() - 1));
            Ok(Change::Loaded)
        } else {
            Ok(Change::Reordered)
        }
    }

    /// Turn shuffle on or off, keeping the current entry current
    ///
    /// On: the current entry is pinned first and the cursor goes to 0.
    /// Off: canonical order is restored and the cursor follows the entry.
    pub fn set_shuffle(&mut self, enabled: bool) -> Change {
        let Some(position) = self.position else {
            self.shuffled = enabled;
            return Change::Unchanged;
        };
        if enabled == self.shuffled {
            return Change::Unchanged;
        }

        let current = self.active[position];
        let identity: Vec<usize> = (0..self.canonical.len()).collect();

        if enabled {
            self.active = shuffle_pinned(&identity, Some(&current));
            self.position = Some(0);
        } else {
            self.active = identity;
            self.position = Some(current);
        }
        self.shuffled = enabled;
        self.history_bound = self.position;

        Change::Reordered
    }

    /// Empty the queue and forget its provenance
    ///
    /// The entry id counter and commit sequence survive, so ids stay unique.
    pub fn clear(&mut self) -> Change {
        if self.is_empty() && self.source.is_none() {
            return Change::Unchanged;
        }

        self.canonical.clear();
        self.active.clear();
        self.position = None;
        self.shuffled = false;
        self.source = None;
        self.history_bound = None;
        Change::Cleared
    }

    /// Check the structural invariants
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        if self.active.len() != self.canonical.len() {
            return Err(format!(
                "active has {} entries, canonical has {}",
                self.active.len(),
                self.canonical.len()
            ));
        }

        let mut seen = vec![false; self.canonical.len()];
        for &index in &self.active {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("canonical index {} repeated in active", index)),
                None => return Err(format!("canonical index {} out of range", index)),
            }
        }

        match self.position {
            None if !self.is_empty() => return Err("non-empty queue without a cursor".into()),
            Some(position) if position >= self.len() => {
                return Err(format!("cursor {} past end of {}", position, self.len()))
            }
            _ => {}
        }

        if !self.shuffled && self.active.iter().enumerate().any(|(i, &index)| i != index) {
            return Err("unshuffled active order differs from canonical".into());
        }

        let mut ids: Vec<u64> = self.canonical.iter().map(|slot| slot.entry_id.get()).collect();
        ids.sort_unstable();
        ids.dedup();
        if ids.len() != self.canonical.len() {
            return Err("duplicate entry id".into());
        }

        Ok(())
    }

    // ===== Internals =====

    fn issue(&mut self, track: Track) -> Slot {
        self.next_entry_id += 1;
        Slot {
            entry_id: EntryId::new(self.next_entry_id),
            track: Arc::new(track),
        }
    }

    fn entry(&self, canonical_index: usize) -> QueueEntry {
        let slot = &self.canonical[canonical_index];
        QueueEntry {
            entry_id: slot.entry_id,
            track: Arc::clone(&slot.track),
            canonical_index,
        }
    }

    fn current_slot(&self) -> Option<&Slot> {
        let position = self.position?;
        self.active.get(position).map(|&index| &self.canonical[index])
    }

    fn start_adhoc(&mut self, track: Track) -> Change {
        let slot = self.issue(track);
        self.canonical = vec![slot];
        self.active = vec![0];
        self.position = Some(0);
        self.shuffled = false;
        self.source = Some(SourceDescriptor::adhoc());
        self.history_bound = Some(0);
        Change::Loaded
    }

    fn insert_after(&mut self, position: usize, track: Track) {
        let slot = self.issue(track);
        let canonical_index = if self.shuffled {
            self.canonical.len()
        } else {
            self.active[position] + 1
        };

        for index in &mut self.active {
            if *index >= canonical_index {
                *index += 1;
            }
        }
        self.canonical.insert(canonical_index, slot);
        self.active.insert(position + 1, canonical_index);
    }

    pub(crate) fn move_cursor(&mut self, position: usize) {
        self.position = Some(position);
        self.history_bound = Some(self.history_bound.map_or(position, |bound| bound.min(position)));
    }
}
