mod ids;
mod item;
mod source;
mod track;

pub use ids::{AlbumId, ArtistId, PlaylistId, TrackId};
pub use item::{ItemKind, LibraryItem};
pub use source::{SourceDescriptor, SourceKind};
pub use track::Track;
