//! Storage layer for the finance tracker
//!
//! Every store persists its whole collection as one JSON document (a blob)
//! addressed by a [`BlobKey`]. The [`BlobStore`] trait is the port the stores
//! talk to; [`JsonFileStore`] keeps blobs as files in the data directory and
//! [`MemoryStore`] keeps them in process.

pub mod file_io;
pub mod json_file;
pub mod memory;

pub use file_io::{read_text, write_text_atomic};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{FinanceError, FinanceResult};

/// What a blob holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobKind {
    Expenses,
    Income,
    Budgets,
    Users,
}

impl BlobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expenses => "expenses",
            Self::Income => "income",
            Self::Budgets => "budgets",
            Self::Users => "users",
        }
    }
}

/// Address of one blob: its kind, namespaced by user id where it is per-user
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlobKey {
    pub kind: BlobKind,
    pub user_id: Option<String>,
}

impl BlobKey {
    pub fn for_user(kind: BlobKind, user_id: &str) -> Self {
        Self {
            kind,
            user_id: Some(user_id.to_string()),
        }
    }

    pub fn global(kind: BlobKind) -> Self {
        Self {
            kind,
            user_id: None,
        }
    }

    /// File name of the blob, e.g. `expenses_alice.json`
    pub fn file_name(&self) -> String {
        match &self.user_id {
            Some(user) => format!("{}_{}.json", self.kind.as_str(), user),
            None => format!("{}.json", self.kind.as_str()),
        }
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name())
    }
}

/// Key-value blob storage port
///
/// A missing blob reads as `None`. `put` replaces the whole blob.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &BlobKey) -> FinanceResult<Option<String>>;

    fn put(&self, key: &BlobKey, contents: &str) -> FinanceResult<()>;
}

/// Shared handle to a blob store
pub type SharedStore = Arc<dyn BlobStore>;

/// Load and deserialize a blob, `T::default()` when it does not exist
pub fn load_blob<T>(store: &dyn BlobStore, key: &BlobKey) -> FinanceResult<T>
where
    T: DeserializeOwned + Default,
{
    match store.get(key)? {
        Some(contents) => serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Storage(format!("Failed to parse {}: {}", key, e))),
        None => Ok(T::default()),
    }
}

/// Serialize a value as pretty JSON and write it as the whole blob
pub fn save_blob<T: Serialize + ?Sized>(
    store: &dyn BlobStore,
    key: &BlobKey,
    value: &T,
) -> FinanceResult<()> {
    let contents = serde_json::to_string_pretty(value)
        .map_err(|e| FinanceError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
    store.put(key, &contents)?;
    tracing::debug!(blob = %key, bytes = contents.len(), "blob saved");
    Ok(())
}
