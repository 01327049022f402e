//! Atomic file operations for small JSON/TOML documents.
//!
//! Writes go to a hidden temp file in the same directory, are fsynced, then
//! renamed over the target so readers never see a half-written document.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use namesmith_core::NamesmithError;
use namesmith_core::error::Result;

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn encode<T: Serialize>(self, data: &T) -> Result<String> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A handle to a document that is replaced atomically on every save.
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is blank
    /// - `Err`: Failed to read or decode the file
    pub fn load(&self) -> Result<Option<T>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Encodes `data` and replaces the file atomically.
    pub fn save(&self, data: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        let tmp_path = temp_path_for(&self.path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

/// Returns `<dir>/.<file_name>.tmp` for `path`.
pub(crate) fn temp_path_for(path: &Path) -> Result<PathBuf> {
    let parent = path
        .parent()
        .ok_or_else(|| NamesmithError::io("Path has no parent directory"))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| NamesmithError::io("Path has no file name"))?;

    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(parent.join(tmp_name))
}
