//! Bridge events
//!
//! Events flow from the native player back into the engine:
//! - Position updates (periodic)
//! - State changes (loading, playing, paused, ...)
//! - End of track
//! - Stream or decode failures
//!
//! Events only ever change [`PlaybackStatus`]. The queue never advances
//! because of an event; end-of-track handling belongs to the player, which
//! already holds the lookahead entries.

use crate::types::{EntryId, PlaybackFailure, PlaybackState, PlaybackStatus};
use std::time::Duration;

/// Events emitted by the playback bridge
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// Position update
    Progress {
        /// Current position in the track
        position: Duration,
        /// Total track duration
        duration: Duration,
    },

    /// Player state changed
    StateChanged(PlaybackState),

    /// The entry reached its natural end
    TrackEnded {
        /// Entry that finished
        entry_id: EntryId,
    },

    /// The entry could not be streamed or decoded
    Error {
        /// Entry that failed
        entry_id: EntryId,
        /// Player-supplied description
        message: String,
    },
}

impl PlaybackStatus {
    /// Fold one event into the status
    pub fn apply(&mut self, event: &BridgeEvent) {
        match event {
            BridgeEvent::Progress { position, duration } => {
                self.position = *position;
                self.duration = *duration;
            }
            BridgeEvent::StateChanged(state) => {
                if matches!(state, PlaybackState::Loading | PlaybackState::Playing) {
                    self.last_error = None;
                }
                if *state == PlaybackState::Stopped {
                    self.position = Duration::ZERO;
                }
                self.state = *state;
            }
            BridgeEvent::TrackEnded { .. } => {
                self.state = PlaybackState::Ended;
                self.position = self.duration;
            }
            BridgeEvent::Error { entry_id, message } => {
                self.state = PlaybackState::Stopped;
                self.last_error = Some(PlaybackFailure {
                    entry_id: *entry_id,
                    message: message.clone(),
                });
            }
        }
    }
}
