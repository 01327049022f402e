//! Favorites manager.
//!
//! Keeps the favorites list in memory and rewrites the whole list to the
//! repository after every mutation. Storage failures are logged and never
//! surfaced; the in-memory list stays authoritative for the session.

use std::sync::Arc;

use namesmith_core::favorites::{FavoriteToggle, FavoritesRepository, FavoritesSet};
use namesmith_core::name::NameRecord;

pub struct FavoritesManager {
    repository: Arc<dyn FavoritesRepository>,
    favorites: FavoritesSet,
}

impl FavoritesManager {
    /// Rehydrates favorites from the repository.
    ///
    /// Unreadable or corrupt data yields an empty list.
    pub async fn load(repository: Arc<dyn FavoritesRepository>) -> Self {
        let favorites = match repository.load().await {
            Ok(favorites) => {
                tracing::info!("[Favorites] Loaded {} favorites", favorites.len());
                favorites
            }
            Err(e) => {
                tracing::warn!("[Favorites] Discarding unreadable favorites: {}", e);
                FavoritesSet::default()
            }
        };

        Self {
            repository,
            favorites,
        }
    }

    pub fn records(&self) -> &[NameRecord] {
        self.favorites.records()
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    pub fn is_favorite(&self, transliteration: &str) -> bool {
        self.favorites.contains(transliteration)
    }

    /// Stars or unstars a record, matched by transliteration.
    pub async fn toggle(&mut self, record: NameRecord) -> FavoriteToggle {
        let transliteration = record.transliteration.clone();
        let outcome = self.favorites.toggle(record);
        tracing::debug!("[Favorites] {:?} '{}'", outcome, transliteration);
        self.persist().await;
        outcome
    }

    /// Removes a favorite by transliteration. Returns false if it was absent.
    pub async fn remove(&mut self, transliteration: &str) -> bool {
        let removed = self.favorites.remove(transliteration);
        if removed {
            self.persist().await;
        }
        removed
    }

    pub async fn clear(&mut self) {
        self.favorites.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        if let Err(e) = self.repository.save(&self.favorites).await {
            tracing::error!("[Favorites] Failed to save favorites: {}", e);
        }
    }
}
