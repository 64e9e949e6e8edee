//! Pressable library items
//!
//! Search results, home rows and pins all carry a kind tag. Handlers match
//! on `ItemKind` exhaustively so a new kind cannot be silently ignored.

use serde::{Deserialize, Serialize};

/// Kind of a library item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Track,
    Album,
    Playlist,
    Artist,
}

/// A row the user can press or long-press
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub kind: ItemKind,
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
}

impl LibraryItem {
    /// Create an item with no subtitle or artwork
    pub fn new(kind: ItemKind, id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            title: title.into(),
            subtitle: None,
            cover_art: None,
        }
    }
}
