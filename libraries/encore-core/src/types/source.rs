//! Queue provenance
//!
//! Records which collection the active queue was built from so the UI can
//! offer "go to album/artist" for the whole queue context.

use serde::{Deserialize, Serialize};

/// Kind of collection a queue was built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Album,
    Artist,
    Playlist,
    Search,
    /// Single tracks queued with no surrounding collection
    Adhoc,
}

impl SourceKind {
    /// Human-readable entity name, used in not-found errors
    pub fn entity_name(self) -> &'static str {
        match self {
            SourceKind::Album => "Album",
            SourceKind::Artist => "Artist",
            SourceKind::Playlist => "Playlist",
            SourceKind::Search => "Search",
            SourceKind::Adhoc => "Collection",
        }
    }
}

/// Provenance of the active queue content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub kind: SourceKind,
    pub source_id: String,
    pub source_name: String,
}

impl SourceDescriptor {
    /// Create a descriptor for a named collection
    pub fn new(kind: SourceKind, source_id: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            kind,
            source_id: source_id.into(),
            source_name: source_name.into(),
        }
    }

    /// Descriptor used when a queue is started from a single track
    pub fn adhoc() -> Self {
        Self {
            kind: SourceKind::Adhoc,
            source_id: String::new(),
            source_name: String::new(),
        }
    }

    /// Whether this is the ad-hoc descriptor
    pub fn is_adhoc(&self) -> bool {
        self.kind == SourceKind::Adhoc
    }
}
