//! # Analyzer
//!
//! The core facade: analyze values into records and answer lookups and
//! filtered listings over any [`RecordStore`].
//!
//! "Already exists" is reported as `StrandError::Duplicate` whether the
//! pre-check finds the value or the store's own uniqueness check rejects
//! the write.

use crate::store::{RecordStore, StoreBackend};
use crate::{FilterPredicate, StrandError, StringRecord};
use chrono::Utc;
use std::path::Path;

/// Analyzes strings and queries the records produced.
#[derive(Debug, Default)]
pub struct Analyzer<S: RecordStore = StoreBackend> {
    store: S,
}

impl Analyzer<StoreBackend> {
    /// Analyzer over a volatile in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Analyzer over a redb database at `path`.
    pub fn with_redb(path: impl AsRef<Path>) -> Result<Self, StrandError> {
        let store = crate::storage::RedbStore::open(path)?;
        Ok(Self::new(StoreBackend::Persistent(store)))
    }

    /// Short name of the active backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.store.name()
    }
}

impl<S: RecordStore> Analyzer<S> {
    /// Wrap a record store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Analyze `value` and persist the record.
    ///
    /// Fails with `Duplicate` if the value was analyzed before.
    pub fn analyze(&mut self, value: &str) -> Result<StringRecord, StrandError> {
        if self.store.find_one(value)?.is_some() {
            return Err(StrandError::Duplicate);
        }
        self.store.insert(StringRecord::new(value, Utc::now()))
    }

    /// The record for exactly `value`.
    pub fn get(&self, value: &str) -> Result<StringRecord, StrandError> {
        self.store.find_one(value)?.ok_or(StrandError::NotFound)
    }

    /// All records matching `predicate`.
    pub fn list(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>, StrandError> {
        self.store.find(predicate)
    }

    /// Remove the record for exactly `value`, returning it.
    pub fn delete(&mut self, value: &str) -> Result<StringRecord, StrandError> {
        self.store.delete_one(value)?.ok_or(StrandError::NotFound)
    }

    /// Number of stored records.
    pub fn count(&self) -> Result<usize, StrandError> {
        self.store.count()
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

// =============================================================================
// TESTS
// =============================================================================
