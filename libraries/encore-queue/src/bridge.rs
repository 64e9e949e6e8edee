//! Playback bridge
//!
//! Abstracts the native player that actually streams audio. The engine
//! drives it with fire-and-forget directives; everything the player wants to
//! say back arrives as a [`BridgeEvent`](crate::events::BridgeEvent).

use crate::types::QueueEntry;
use std::time::Duration;

/// Native player handle
///
/// Directives are issued while the engine holds its store lock, in commit
/// order, so an implementation only needs to forward them. Implementations
/// must not call back into the engine from these methods.
#[cfg_attr(test, mockall::automock)]
pub trait PlaybackBridge: Send + Sync {
    /// Load a whole new queue (in active order) and start at `start_index`
    fn load(&self, entries: &[QueueEntry], start_index: usize);

    /// Refresh the upcoming entries without interrupting the current one
    fn update_queue(&self, entries: &[QueueEntry], current_index: usize);

    /// Start playing the loaded entry at `index`
    fn play_at(&self, index: usize);

    /// Pause the current entry
    fn pause(&self);

    /// Resume the current entry
    fn resume(&self);

    /// Seek within the current entry
    fn seek_to(&self, position: Duration);

    /// Stop and unload everything
    fn stop(&self);
}

/// Bridge that drops every directive
///
/// Useful for running the engine headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBridge;

impl PlaybackBridge for NullBridge {
    fn load(&self, _entries: &[QueueEntry], _start_index: usize) {}
    fn update_queue(&self, _entries: &[QueueEntry], _current_index: usize) {}
    fn play_at(&self, _index: usize) {}
    fn pause(&self) {}
    fn resume(&self) {}
    fn seek_to(&self, _position: Duration) {}
    fn stop(&self) {}
}
