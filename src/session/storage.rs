//! Session Storage Backends
//!
//! String key/value stores with the same shape as browser storage.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::error::{SessionError, SessionResult};

/// Durable string key/value store
pub trait Storage: Send {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()>;

    fn remove_item(&mut self, key: &str) -> SessionResult<()>;
}

/// In-process store, lost on exit
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> SessionResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// JSON object file on disk, rewritten on every mutation
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store at `path`. A missing or corrupt file is an empty
    /// store, replaced on the next write; an unreadable one is an error.
    pub fn open(path: impl Into<PathBuf>) -> SessionResult<Self> {
        let path = path.into();

        let items = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => match serde_json::from_str(&content) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(path = ?path, "Discarding corrupt session file: {}", e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(SessionError::Io {
                    path,
                    error: e.to_string(),
                })
            }
        };

        tracing::debug!(path = ?path, keys = items.len(), "Opened session storage");

        Ok(Self { path, items })
    }

    /// Empty store bound to `path`, without reading it
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            items: BTreeMap::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> SessionResult<()> {
        let io_err = |e: std::io::Error| SessionError::Io {
            path: self.path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let content = serde_json::to_string_pretty(&self.items)?;
        std::fs::write(&self.path, content).map_err(io_err)
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> SessionResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove_item(&mut self, key: &str) -> SessionResult<()> {
        self.items.remove(key);
        self.persist()
    }
}
