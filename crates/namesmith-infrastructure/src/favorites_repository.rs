//! Favorites repository implementations.
//!
//! File location: `{config_dir}/favorites.json`, a plain JSON array of name
//! records.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Mutex;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use namesmith_core::NamesmithError;
use namesmith_core::error::Result;
use namesmith_core::favorites::{FavoritesRepository, FavoritesSet};

use crate::paths::NamesmithPaths;
use crate::storage::atomic_file::temp_path_for;

/// File-based favorites repository.
///
/// Every save rewrites the whole file through a synced temp file + rename.
pub struct JsonFavoritesRepository {
    path: PathBuf,
}

impl JsonFavoritesRepository {
    /// Creates a repository at the default favorites location.
    pub fn new(paths: &NamesmithPaths) -> Result<Self> {
        let path = paths
            .favorites_file()
            .map_err(|e| NamesmithError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates a repository backed by an explicit file (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl FavoritesRepository for JsonFavoritesRepository {
    async fn load(&self) -> Result<FavoritesSet> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(FavoritesSet::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| NamesmithError::io(format!("Failed to read favorites: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(FavoritesSet::default());
        }

        let favorites: FavoritesSet = serde_json::from_str(&content)?;
        Ok(favorites)
    }

    async fn save(&self, favorites: &FavoritesSet) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| NamesmithError::io(format!("Failed to create directory: {}", e)))?;
        }

        let serialized = serde_json::to_string_pretty(favorites)?;
        let tmp_path = temp_path_for(&self.path)?;

        let mut tmp_file = fs::File::create(&tmp_path)
            .await
            .map_err(|e| NamesmithError::io(format!("Failed to create temp file: {}", e)))?;
        tmp_file
            .write_all(serialized.as_bytes())
            .await
            .map_err(|e| NamesmithError::io(format!("Failed to write favorites: {}", e)))?;
        tmp_file
            .sync_all()
            .await
            .map_err(|e| NamesmithError::io(format!("Failed to sync favorites: {}", e)))?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| NamesmithError::io(format!("Failed to replace favorites: {}", e)))?;

        Ok(())
    }
}

/// Process-local repository used by `--ephemeral` runs and tests.
#[derive(Default)]
pub struct InMemoryFavoritesRepository {
    stored: Mutex<Option<FavoritesSet>>,
}

impl InMemoryFavoritesRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_favorites(favorites: FavoritesSet) -> Self {
        Self {
            stored: Mutex::new(Some(favorites)),
        }
    }

    /// Returns the last saved set, if any save has happened.
    pub fn snapshot(&self) -> Option<FavoritesSet> {
        self.stored.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl FavoritesRepository for InMemoryFavoritesRepository {
    async fn load(&self) -> Result<FavoritesSet> {
        let guard = self
            .stored
            .lock()
            .map_err(|e| NamesmithError::internal(format!("Favorites lock poisoned: {}", e)))?;
        Ok(guard.clone().unwrap_or_default())
    }

    async fn save(&self, favorites: &FavoritesSet) -> Result<()> {
        let mut guard = self
            .stored
            .lock()
            .map_err(|e| NamesmithError::internal(format!("Favorites lock poisoned: {}", e)))?;
        *guard = Some(favorites.clone());
        Ok(())
    }
}
