//! Named documents kept on the local machine.
//!
//! The store is one JSON object mapping document names to serialized
//! documents. Without a backing file it lives in memory only.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use sketchkit_core::{Result, StorageError};

#[derive(Debug, Clone, Default)]
pub struct LocalStore {
    path: Option<PathBuf>,
    documents: BTreeMap<String, String>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Opens a file-backed store. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let documents = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)
                    .map_err(|e| StorageError::Corrupted(format!("{}: {}", path.display(), e)))?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(
            "Opened local store {} with {} document(s)",
            path.display(),
            documents.len()
        );
        Ok(Self {
            path: Some(path),
            documents,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stores `text` under `name`, replacing any previous version.
    pub fn save(&mut self, name: &str, text: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::EmptyName.into());
        }
        self.documents.insert(name.to_string(), text.to_string());
        self.persist()
    }

    /// Document names in sorted order.
    pub fn list(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    pub fn load(&self, name: &str) -> Result<String> {
        self.documents
            .get(name.trim())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()).into())
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        if self.documents.remove(name.trim()).is_none() {
            return Err(StorageError::NotFound(name.to_string()).into());
        }
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.documents)?)?;
        Ok(())
    }
}
