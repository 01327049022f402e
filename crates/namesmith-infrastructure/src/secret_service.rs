//! Secret service implementation.
//!
//! Resolves the generation-service API key from the environment, falling back
//! to `secret.json` in the config directory.

use std::path::PathBuf;

use namesmith_core::NamesmithError;
use namesmith_core::config::SecretConfig;
use namesmith_core::error::Result;

use crate::paths::NamesmithPaths;
use crate::storage::{AtomicFile, FileFormat};

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Looks up the API key.
///
/// Secrets are never logged; error messages only name the source.
pub struct SecretService {
    file: AtomicFile<SecretConfig>,
}

impl SecretService {
    pub fn new(paths: &NamesmithPaths) -> Result<Self> {
        let path = paths
            .secret_file()
            .map_err(|e| NamesmithError::config(e.to_string()))?;

        Ok(Self::with_file(path))
    }

    pub fn with_file(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json),
        }
    }

    /// Returns the Gemini API key from `GEMINI_API_KEY` or `secret.json`.
    pub fn gemini_api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(GEMINI_API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("[Secret] Using API key from {}", GEMINI_API_KEY_ENV);
            return Some(key.trim().to_string());
        }

        match self.file.load() {
            Ok(Some(secret)) => secret
                .gemini
                .map(|g| g.api_key.trim().to_string())
                .filter(|k| !k.is_empty()),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("[Secret] Ignoring unreadable {:?}: {}", self.file.path(), e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_value_wins() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini":{"api_key":"from-file"}}"#).unwrap();
        let service = SecretService::with_file(path);

        assert_eq!(
            service.resolve_api_key(Some(" from-env ".into())),
            Some("from-env".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        std::fs::write(&path, r#"{"gemini":{"api_key":"from-file"}}"#).unwrap();
        let service = SecretService::with_file(path);

        assert_eq!(
            service.resolve_api_key(Some("   ".into())),
            Some("from-file".to_string())
        );
    }

    #[test]
    fn test_missing_or_corrupt_file_yields_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        let service = SecretService::with_file(path.clone());
        assert_eq!(service.resolve_api_key(None), None);

        std::fs::write(&path, "not json").unwrap();
        assert_eq!(service.resolve_api_key(None), None);
    }
}
