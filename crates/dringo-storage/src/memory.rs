//! In-memory storage backend.
//!
//! Holds values in a map shared by every clone. The browser workflow uses it
//! in place of `localStorage`; everything else uses it in tests.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{StorageBackend, StorageError};

/// Shared, process-local key-value store. Never fails.
///
/// # Examples
///
/// ```
/// # use dringo_storage::{MemoryBackend, StorageBackend};
/// # #[tokio::main]
/// # async fn main() {
/// let page_storage = MemoryBackend::new();
/// page_storage.put("dringo-theme", b"dark").await.unwrap();
/// assert_eq!(page_storage.get("dringo-theme").await.unwrap(), Some(b"dark".to_vec()));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    values: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl StorageBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.values.write().await.insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.values.read().await.contains_key(key))
    }
}
