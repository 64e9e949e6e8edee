//! Error types for queue management

use crate::types::EntryId;
use encore_core::CatalogError;
use thiserror::Error;

/// Queue errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// `replace` was given no tracks
    #[error("Queue is empty")]
    EmptyQueue,

    /// Initial index outside the supplied track list
    #[error("Index {index} out of range for queue of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The catalog could not supply the tracks for this mutation
    #[error("Could not resolve tracks: {0}")]
    Resolution(#[from] CatalogError),

    /// No entry with this id is queued
    #[error("Unknown queue entry: {0}")]
    UnknownEntry(EntryId),

    /// A newer mutation committed first; never returned from the public API
    #[error("Mutation {seq} superseded by {latest}")]
    StaleMutation { seq: u64, latest: u64 },
}

impl QueueError {
    /// Whether the failure came from the catalog rather than the queue
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution(_))
    }
}

/// Result type for queue operations
pub type Result<T> = std::result::Result<T, QueueError>;
