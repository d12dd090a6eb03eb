//! Key-value storage standing in for the browser's storage areas.
//!
//! The portal keeps two stores: a session-scoped one holding the login
//! session, and a local one holding the record lists. Values are strings
//! containing JSON, in the same shape the portal pages write.
//!
//! # Keys
//!
//! - [`keys::SESSION`] - current [`Session`](deer_hub_core::Session) (session store)
//! - [`keys::LEAVE_REQUESTS`] - submitted leave requests, newest first
//! - [`keys::LEAVE_DRAFT`] - the single saved leave draft
//! - [`keys::DOCUMENTS`] - uploaded documents, newest first

pub mod file;
pub mod memory;

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys used by the portal.
pub mod keys {
    /// Key for the current login session.
    pub const SESSION: &str = "deerHubSession";

    /// Key for the submitted leave request list.
    pub const LEAVE_REQUESTS: &str = "leaveRequests";

    /// Key for the saved leave request draft.
    pub const LEAVE_DRAFT: &str = "leaveRequestDraft";

    /// Key for the uploaded document list.
    pub const DOCUMENTS: &str = "documents";
}

/// Errors that can occur while reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing the value would exceed the store's quota.
    #[error("quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Bytes the store would hold after the write.
        needed: usize,
        /// Configured limit in bytes.
        limit: usize,
    },

    /// Key is not usable by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A string key-value store.
///
/// Mirrors the browser storage API: values are opaque strings, missing keys
/// read as `None`, and removing a missing key is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written or is full.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Read and decode a JSON value.
///
/// # Errors
///
/// Returns an error if the backend fails or the stored value is malformed.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StorageError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    store
        .get_item(key)?
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(StorageError::from)
}

/// Encode and write a JSON value.
///
/// # Errors
///
/// Returns an error if encoding or the write fails.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}

/// An append-only, newest-first list of records persisted under one key.
///
/// Reads never fail: a missing or malformed value reads as an empty list and
/// records that do not decode are skipped, both with a warning. Writes keep
/// every stored entry, decodable or not, and refuse to touch a value that is
/// not a JSON array.
pub struct RecordList<T, S> {
    store: S,
    key: &'static str,
    _record: PhantomData<fn() -> T>,
}

impl<T, S> RecordList<T, S>
where
    T: Serialize + DeserializeOwned,
    S: KeyValueStore,
{
    /// Create a list view over `key` in `store`.
    #[must_use]
    pub const fn new(store: S, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    /// Storage key of this list.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Load all records, newest first.
    pub fn load(&self) -> Vec<T> {
        let entries = match self.raw_entries() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    key = self.key,
                    error = %e,
                    "Treating unreadable record list as empty"
                );
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(key = self.key, index, error = %e, "Skipping unreadable record");
                    None
                }
            })
            .collect()
    }

    /// Load at most `limit` of the newest records.
    pub fn recent(&self, limit: usize) -> Vec<T> {
        let mut records = self.load();
        records.truncate(limit);
        records
    }

    /// Insert `records` at the front of the list, keeping their order.
    ///
    /// Stored entries are carried over as raw JSON, so records this version
    /// cannot decode survive the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored value is not a JSON array, in which
    /// case it is left untouched, or if the updated list cannot be written.
    pub fn prepend(&self, records: Vec<T>) -> Result<usize, StorageError> {
        let existing = self.raw_entries()?;
        let added = records.len();

        let mut all = records
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<_>, _>>()?;
        all.extend(existing);

        write_json(&self.store, self.key, &all)?;
        tracing::debug!(key = self.key, added, total = all.len(), "Record list updated");
        Ok(added)
    }

    /// Stored entries as raw JSON; a missing key is an empty list.
    fn raw_entries(&self) -> Result<Vec<Value>, StorageError> {
        Ok(read_json::<Vec<Value>, _>(&self.store, self.key)?.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_read_json_missing_key() {
        let store = MemoryStore::new();
        let value: Option<Vec<u32>> = read_json(&store, "missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_read_json_malformed_value() {
        let store = MemoryStore::new();
        store.set_item("broken", "{not json").unwrap();
        let result: Result<Option<Vec<u32>>, _> = read_json(&store, "broken");
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }

    #[test]
    fn test_record_list_prepends_newest_first() {
        let list: RecordList<u32, _> = RecordList::new(MemoryStore::new(), "numbers");
        list.prepend(vec![1]).unwrap();
        list.prepend(vec![3, 2]).unwrap();
        assert_eq!(list.load(), vec![3, 2, 1]);
        assert_eq!(list.recent(2), vec![3, 2]);
    }

    #[test]
    fn test_record_list_tolerates_malformed_value() {
        let store = Arc::new(MemoryStore::new());
        store.set_item(keys::DOCUMENTS, "\"oops\"").unwrap();
        let list: RecordList<u32, _> = RecordList::new(Arc::clone(&store), keys::DOCUMENTS);
        assert!(list.load().is_empty());

        // The write is refused and the stored value survives.
        let result = list.prepend(vec![7]);
        assert!(matches!(result, Err(StorageError::Serialization(_))));
        assert_eq!(
            store.get_item(keys::DOCUMENTS).unwrap().as_deref(),
            Some("\"oops\"")
        );
    }

    #[test]
    fn test_record_list_keeps_undecodable_entries() {
        let store = Arc::new(MemoryStore::new());
        store
            .set_item(keys::LEAVE_REQUESTS, r#"[2,"legacy",{"id":1}]"#)
            .unwrap();
        let list: RecordList<u32, _> = RecordList::new(Arc::clone(&store), keys::LEAVE_REQUESTS);
        assert_eq!(list.load(), vec![2]);

        list.prepend(vec![9, 8]).unwrap();
        assert_eq!(list.load(), vec![9, 8, 2]);
        assert_eq!(
            store.get_item(keys::LEAVE_REQUESTS).unwrap().as_deref(),
            Some(r#"[9,8,2,"legacy",{"id":1}]"#)
        );
    }

    #[test]
    fn test_record_list_reports_write_failure() {
        let list: RecordList<String, _> =
            RecordList::new(MemoryStore::with_quota(8), keys::LEAVE_REQUESTS);
        let result = list.prepend(vec!["far too long for the quota".to_owned()]);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert!(list.load().is_empty());
    }
}
