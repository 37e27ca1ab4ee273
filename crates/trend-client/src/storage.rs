use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key the session token lives under.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Persistent string key-value store, kept as a flat JSON object on disk.
/// ```json
/// { "authToken": "eyJhbGciOi..." }
/// ```
/// A missing file reads as an empty store; the file (and its parent
/// directory) is created on the first write.
#[derive(Debug, Clone)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut entries = self.read().await?;
        Ok(entries.remove(key))
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.read().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries).await
    }

    /// Returns whether the key was present.
    pub async fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let mut entries = self.read().await?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write(&entries).await?;
        }
        Ok(existed)
    }

    async fn read(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        // ensure the directory exists
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let json = serde_json::to_vec_pretty(entries).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|source| self.io_error(source))
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
