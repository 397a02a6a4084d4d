//! Flat-file storage backend.
//!
//! Each key maps to one file directly under the root directory. Values are
//! written wholesale with a single `write` call; readers never observe an
//! append format. There is no cross-process locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{StorageBackend, StorageError};

/// A storage backend that keeps one file per key under a root directory.
///
/// # Examples
///
/// ```no_run
/// # use dringo_storage::FileBackend;
/// let backend = FileBackend::open("./data").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open a file backend rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Open`] if the directory cannot be created.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref();
        std::fs::create_dir_all(root).map_err(|e| StorageError::Open {
            path: root.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// The directory this backend stores its files in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its file path. Keys must be a single path component.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let invalid = |reason: &str| StorageError::InvalidKey {
            key: key.to_owned(),
            reason: reason.to_owned(),
        };

        if key.is_empty() {
            return Err(invalid("key is empty"));
        }
        if key == "." || key == ".." {
            return Err(invalid("key refers to a directory"));
        }
        if key.contains(['/', '\\', '\0']) {
            return Err(invalid("key must not contain path separators"));
        }

        Ok(self.root.join(key))
    }
}

#[async_trait::async_trait]
impl StorageBackend for FileBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read {
                key: key.to_owned(),
                reason: e.to_string(),
            }),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| StorageError::Write {
                key: key.to_owned(),
                reason: e.to_string(),
            })?;

        tracing::trace!(key, bytes = value.len(), "value written");
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| StorageError::Read {
                key: key.to_owned(),
                reason: e.to_string(),
            })
    }
}
