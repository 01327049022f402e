//! Configuration service implementation.
//!
//! Loads `config.toml` from the namesmith config directory, writing a default
//! file on first run so users have something to edit.

use namesmith_core::NamesmithError;
use namesmith_core::config::AppConfig;
use namesmith_core::error::Result;

use crate::paths::NamesmithPaths;
use crate::storage::{AtomicFile, FileFormat};

/// Loads the root configuration file.
pub struct ConfigService {
    file: AtomicFile<AppConfig>,
}

impl ConfigService {
    pub fn new(paths: &NamesmithPaths) -> Result<Self> {
        let path = paths
            .config_file()
            .map_err(|e| NamesmithError::config(e.to_string()))?;

        Ok(Self {
            file: AtomicFile::new(path, FileFormat::Toml),
        })
    }

    /// Returns the stored configuration, creating the file with defaults if
    /// it does not exist yet.
    ///
    /// A file that exists but does not parse is reported as a config error
    /// rather than silently replaced.
    pub fn load_or_init(&self) -> Result<AppConfig> {
        match self.file.load() {
            Ok(Some(config)) => Ok(config),
            Ok(None) => {
                let config = AppConfig::default();
                if let Err(e) = self.file.save(&config) {
                    tracing::warn!(
                        "[Config] Could not write default config to {:?}: {}",
                        self.file.path(),
                        e
                    );
                } else {
                    tracing::info!("[Config] Wrote default config to {:?}", self.file.path());
                }
                Ok(config)
            }
            Err(e) => Err(NamesmithError::config(format!(
                "Failed to load {:?}: {}",
                self.file.path(),
                e
            ))),
        }
    }
}
