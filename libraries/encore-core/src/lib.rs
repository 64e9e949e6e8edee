//! Encore Core
//!
//! Catalog-facing building blocks shared by the queue engine and the
//! catalog client.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track` (a catalog Track Reference), id newtypes,
//!   `SourceDescriptor` and the `LibraryItem` variants the UI presses on
//! - **Core Traits**: `CatalogResolver`, the only way tracks enter a queue
//! - **Error Handling**: `CatalogError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use encore_core::{SourceDescriptor, SourceKind, Track, TrackId};
//! use std::time::Duration;
//!
//! let track = Track::new(TrackId::new("tr-1"), "Intro", "The Band")
//!     .with_duration(Duration::from_secs(212));
//!
//! let source = SourceDescriptor::new(SourceKind::Album, "al-9", "Debut");
//! assert_eq!(source.kind, SourceKind::Album);
//! assert_eq!(track.id.as_str(), "tr-1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CatalogError, Result};
pub use traits::CatalogResolver;

pub use types::{
    AlbumId, ArtistId, ItemKind, LibraryItem, PlaylistId, SourceDescriptor, SourceKind, Track,
    TrackId,
};
