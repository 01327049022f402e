//! Path management for namesmith configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/namesmith/          # Config directory (dirs::config_dir)
//! ├── config.toml               # Application configuration
//! ├── secret.json               # API key fallback when GEMINI_API_KEY is unset
//! └── favorites.json            # Persisted favorites
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves file locations, optionally under an explicit base directory.
#[derive(Debug, Clone, Default)]
pub struct NamesmithPaths {
    base: Option<PathBuf>,
}

impl NamesmithPaths {
    const APP_DIR: &'static str = "namesmith";
    const CONFIG_FILE: &'static str = "config.toml";
    const SECRET_FILE: &'static str = "secret.json";
    const FAVORITES_FILE: &'static str = "favorites.json";

    /// Creates a resolver. `base` replaces the platform config directory
    /// (used by `--config-dir` and tests).
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the namesmith configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(Self::APP_DIR))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::CONFIG_FILE))
    }

    /// Returns the path to the secrets file.
    ///
    /// Keep this file at 600 permissions; it holds the API key.
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::SECRET_FILE))
    }

    pub fn favorites_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(Self::FAVORITES_FILE))
    }
}
