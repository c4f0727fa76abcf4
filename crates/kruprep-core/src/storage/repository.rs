//! The persistence seam: a keyed text-blob repository.
//!
//! The bank persists whole JSON blobs under fixed keys, so the storage
//! boundary is just `get`/`put` over strings. Frontends inject whichever
//! implementation fits their platform; [`MemoryRepository`] backs tests and
//! ephemeral sessions, [`FileRepository`] is the default on disk.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::StoreError;

/// Keyed text-blob persistence. Object-safe; [`QuestionStore`] owns a
/// `Box<dyn BlobRepository>`.
///
/// [`QuestionStore`]: crate::storage::QuestionStore
pub trait BlobRepository {
    /// Returns the blob stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores `value` under `key`, replacing any previous blob.
    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory repository.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    blobs: HashMap<String, String>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobRepository for MemoryRepository {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed repository mapping each key to `<root>/<key>.json`.
#[derive(Debug)]
pub struct FileRepository {
    root: PathBuf,
}

impl FileRepository {
    /// Opens the repository under the default [`data_dir`](super::data_dir).
    pub fn open() -> Self {
        Self {
            root: super::data_dir(),
        }
    }

    /// Opens the repository under an explicit root directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl BlobRepository for FileRepository {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }
}
