//! # Record Store
//!
//! The boundary between the analysis engine and persistence.
//!
//! This module defines the `RecordStore` trait and the in-memory
//! `MemoryStore`. The disk-backed implementation lives in
//! [`crate::storage::RedbStore`]. `StoreBackend` lets callers pick one at
//! runtime.
//!
//! Records are keyed by their content-derived id, so a lookup by value is a
//! lookup by `RecordId::for_value(value)`.

use crate::storage::RedbStore;
use crate::{FilterPredicate, RecordId, StrandError, StringRecord};
use std::collections::BTreeMap;

// =============================================================================
// RECORDSTORE TRAIT
// =============================================================================

/// Storage operations the analyzer relies on.
///
/// Implementations must enforce uniqueness of ids at write time: `insert`
/// of an id that already exists fails with `StrandError::Duplicate` and
/// leaves the stored record untouched.
pub trait RecordStore {
    /// All records matching `predicate`, ordered by creation time, then id.
    fn find(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>, StrandError>;

    /// The record whose value is exactly `value`.
    fn find_one(&self, value: &str) -> Result<Option<StringRecord>, StrandError>;

    /// Persist a fully formed record.
    fn insert(&mut self, record: StringRecord) -> Result<StringRecord, StrandError>;

    /// Remove and return the record whose value is exactly `value`.
    fn delete_one(&mut self, value: &str) -> Result<Option<StringRecord>, StrandError>;

    /// Number of stored records.
    fn count(&self) -> Result<usize, StrandError>;
}

/// Order records by creation time, breaking ties by id.
pub(crate) fn sort_records(records: &mut [StringRecord]) {
    records.sort_by(|a, b| {
        a.created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(b.id()))
    });
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Volatile record store.
///
/// Uses `BTreeMap` for deterministic iteration.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<RecordId, StringRecord>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn find(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>, StrandError> {
        let mut found: Vec<StringRecord> = self
            .records
            .values()
            .filter(|record| predicate.matches(record))
            .cloned()
            .collect();
        sort_records(&mut found);
        Ok(found)
    }

    fn find_one(&self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        Ok(self.records.get(&RecordId::for_value(value)).cloned())
    }

    fn insert(&mut self, record: StringRecord) -> Result<StringRecord, StrandError> {
        if self.records.contains_key(record.id()) {
            return Err(StrandError::Duplicate);
        }
        self.records.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn delete_one(&mut self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        Ok(self.records.remove(&RecordId::for_value(value)))
    }

    fn count(&self) -> Result<usize, StrandError> {
        Ok(self.records.len())
    }
}

// =============================================================================
// STORE BACKEND
// =============================================================================

/// Runtime choice of record store.
#[derive(Debug)]
pub enum StoreBackend {
    /// In-memory store (fast, volatile).
    InMemory(MemoryStore),
    /// Disk-backed store using redb (ACID, persistent).
    Persistent(RedbStore),
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::InMemory(MemoryStore::new())
    }
}

impl StoreBackend {
    /// Short name of the backend, for status output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InMemory(_) => "memory",
            Self::Persistent(_) => "redb",
        }
    }
}

impl RecordStore for StoreBackend {
    fn find(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>, StrandError> {
        match self {
            Self::InMemory(store) => store.find(predicate),
            Self::Persistent(store) => store.find(predicate),
        }
    }

    fn find_one(&self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        match self {
            Self::InMemory(store) => store.find_one(value),
            Self::Persistent(store) => store.find_one(value),
        }
    }

    fn insert(&mut self, record: StringRecord) -> Result<StringRecord, StrandError> {
        match self {
            Self::InMemory(store) => store.insert(record),
            Self::Persistent(store) => store.insert(record),
        }
    }

    fn delete_one(&mut self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        match self {
            Self::InMemory(store) => store.delete_one(value),
            Self::Persistent(store) => store.delete_one(value),
        }
    }

    fn count(&self) -> Result<usize, StrandError> {
        match self {
            Self::InMemory(store) => store.count(),
            Self::Persistent(store) => store.count(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
