//! Storage backends
//!
//! The persistent collaborator exposes get-all / set-all semantics: one
//! serialized mapping per storage key, replaced wholesale on write.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{Result, StoreError};

/// Persistent key-value collaborator.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Fetch the serialized mapping for `key`, if any.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Persist the serialized mapping for `key`, replacing any prior value.
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-per-key backend under a data directory.
pub struct JsonFileBackend {
    root: PathBuf,
}

impl JsonFileBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Backend rooted at the platform data directory.
    pub fn default_dir() -> Result<Self> {
        let dirs = directories::ProjectDirs::from("com", "copyguard", "copyguard")
            .ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    fn path_for_key(&self, key: &str) -> PathBuf {
        // Keys may carry characters that are awkward in file names (":").
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for_key(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.path_for_key(key), value).await?;
        Ok(())
    }
}

/// In-memory backend for tests and ephemeral runs. Clones share state.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
