//! Favorites repository trait.

use async_trait::async_trait;

use super::model::FavoritesSet;
use crate::error::Result;

/// Repository trait for favorites persistence.
///
/// The manager reads once at startup and rewrites the whole set after every
/// mutation.
#[async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Loads the stored favorites.
    /// Returns an empty set if nothing has been stored yet.
    async fn load(&self) -> Result<FavoritesSet>;

    /// Replaces the stored favorites with `favorites`.
    async fn save(&self, favorites: &FavoritesSet) -> Result<()>;
}
