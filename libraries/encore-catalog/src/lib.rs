//! Encore Catalog
//!
//! Subsonic client that supplies tracks to the queue engine.
//!
//! # Features
//!
//! - **Authentication**: salted `md5` tokens, a fresh salt per request
//! - **Browsing**: songs, albums, artists, playlists and `search3`
//! - **Resolution**: `CatalogResolver` for `SubsonicClient`, including the
//!   concurrent album fan-out behind an artist's "Play" button
//! - **Caching**: `CachedResolver` keeps recently seen tracks in an LRU
//! - **Settings**: `encore.toml` plus `ENCORE_*` environment overrides
//!
//! # Example
//!
//! ```ignore
//! use encore_catalog::{CachedResolver, ClientSettings, SubsonicClient};
//! use encore_queue::{NullBridge, QueueEngine};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ClientSettings::load()?;
//!     let client = SubsonicClient::from_settings(&settings)?;
//!     client.ping().await?;
//!
//!     let resolver = CachedResolver::new(client, settings.cache_capacity());
//!     let engine = QueueEngine::new(Arc::new(resolver), Arc::new(NullBridge));
//!
//!     engine
//!         .play_collection(encore_core::SourceKind::Album, "al-1", "Debut", false)
//!         .await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod auth;
mod cache;
mod client;
mod config;
mod error;
mod library;
mod resolver;
mod types;

pub use auth::{token, AuthParams, API_VERSION};
pub use cache::CachedResolver;
pub use client::SubsonicClient;
pub use config::{CacheSettings, ClientIdentity, ClientSettings, TimeoutSettings};
pub use error::{ClientError, Result, SUBSONIC_NOT_FOUND};
pub use resolver::SEARCH_LIMIT;
pub use types::{
    AlbumSummary, AlbumWithSongs, ArtistWithAlbums, PlaylistWithEntries, SearchResult3,
    ServerConfig, Song, SubsonicEnvelope, SubsonicError, SubsonicResponse,
};
