/// Catalog resolution errors
use thiserror::Error;

/// Result type alias using `CatalogError`
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Why a catalog lookup could not supply tracks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has no entity with this id
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Transport failure, timeout, or an unusable server response
    #[error("Network error: {0}")]
    Network(String),
}

impl CatalogError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Whether the catalog positively reported the entity as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
