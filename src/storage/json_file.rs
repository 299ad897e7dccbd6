//! Directory-backed blob store
//!
//! Each blob is one pretty-printed JSON file named after its key.

use std::path::{Path, PathBuf};

use super::file_io::{read_text, write_text_atomic};
use super::{BlobKey, BlobStore};
use crate::error::FinanceResult;

/// Blob store that keeps one JSON file per key under a directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &BlobKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl BlobStore for JsonFileStore {
    fn get(&self, key: &BlobKey) -> FinanceResult<Option<String>> {
        let path = self.path_for(key);
        let contents = read_text(&path)?;
        tracing::debug!(path = %path.display(), found = contents.is_some(), "blob read");
        Ok(contents)
    }

    fn put(&self, key: &BlobKey, contents: &str) -> FinanceResult<()> {
        write_text_atomic(self.path_for(key), contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::BlobKind;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        let key = BlobKey::for_user(BlobKind::Expenses, "alice");
        assert!(store.get(&key).unwrap().is_none());
    }

    #[test]
    fn test_put_writes_named_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path().join("data"));
        let key = BlobKey::for_user(BlobKind::Budgets, "alice");

        store.put(&key, "[]").unwrap();

        let path = temp_dir.path().join("data").join("budgets_alice.json");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "[]");
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_put_replaces_whole_blob() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(temp_dir.path());
        let key = BlobKey::global(BlobKind::Users);

        store.put(&key, "{\"a\": 1, \"b\": 2}").unwrap();
        store.put(&key, "{}").unwrap();
        assert_eq!(store.get(&key).unwrap().as_deref(), Some("{}"));
    }
}
