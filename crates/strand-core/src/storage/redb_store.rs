//! # redb-backed Record Storage
//!
//! A disk-backed record store using the redb embedded database.
//!
//! - ACID transactions: a record is written whole or not at all
//! - Uniqueness is checked inside the write transaction, so two racing
//!   inserts of the same value cannot both succeed
//! - MVCC: concurrent readers, single writer
//!
//! ## Layout
//!
//! One table, `records`: id hex string -> postcard-encoded record body.
//! The creation time is stored as epoch milliseconds.

use crate::primitives::RECORDS_TABLE;
use crate::store::{RecordStore, sort_records};
use crate::{FilterPredicate, Properties, RecordId, StrandError, StringRecord};
use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Table for records: RecordId hex -> serialized `StoredRecord` bytes
const RECORDS: TableDefinition<&str, &[u8]> = TableDefinition::new(RECORDS_TABLE);

/// On-disk body of a record. The id is the table key.
#[derive(Serialize, Deserialize)]
struct StoredRecord {
    value: String,
    properties: Properties,
    created_at_ms: i64,
}

fn storage_err(e: impl std::fmt::Display) -> StrandError {
    StrandError::Storage(e.to_string())
}

fn encode(record: &StringRecord) -> Result<Vec<u8>, StrandError> {
    let stored = StoredRecord {
        value: record.value().to_string(),
        properties: record.properties().clone(),
        created_at_ms: record.created_at().timestamp_millis(),
    };
    postcard::to_allocvec(&stored).map_err(|e| StrandError::Serialization(e.to_string()))
}

fn decode(id: &str, bytes: &[u8]) -> Result<StringRecord, StrandError> {
    let stored: StoredRecord =
        postcard::from_bytes(bytes).map_err(|e| StrandError::Serialization(e.to_string()))?;

    if stored.properties.hash != id {
        return Err(StrandError::Serialization(format!(
            "record {} does not match its content hash",
            id
        )));
    }

    let created_at: DateTime<Utc> = DateTime::from_timestamp_millis(stored.created_at_ms)
        .ok_or_else(|| {
            StrandError::Serialization(format!(
                "record {} has an out-of-range timestamp {}",
                id, stored.created_at_ms
            ))
        })?;

    Ok(StringRecord::from_parts(
        RecordId::from_properties(&stored.properties),
        stored.value,
        stored.properties,
        created_at,
    ))
}

/// A disk-backed record store using redb.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open or create a record database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StrandError> {
        let db = Database::create(path.as_ref()).map_err(storage_err)?;

        // Initialize the table if it doesn't exist
        {
            let write_txn = db.begin_write().map_err(storage_err)?;
            let _ = write_txn.open_table(RECORDS).map_err(storage_err)?;
            write_txn.commit().map_err(storage_err)?;
        }

        Ok(Self { db })
    }
}

// =============================================================================
// RECORDSTORE TRAIT IMPLEMENTATION
// =============================================================================

impl RecordStore for RedbStore {
    fn find(&self, predicate: &FilterPredicate) -> Result<Vec<StringRecord>, StrandError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(RECORDS).map_err(storage_err)?;

        let mut found = Vec::new();
        for entry in table.iter().map_err(storage_err)? {
            let (key, value) = entry.map_err(storage_err)?;
            let record = decode(key.value(), value.value())?;
            if predicate.matches(&record) {
                found.push(record);
            }
        }
        sort_records(&mut found);
        Ok(found)
    }

    fn find_one(&self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        let id = RecordId::for_value(value);
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(RECORDS).map_err(storage_err)?;

        match table.get(id.as_str()).map_err(storage_err)? {
            Some(data) => Ok(Some(decode(id.as_str(), data.value())?)),
            None => Ok(None),
        }
    }

    fn insert(&mut self, record: StringRecord) -> Result<StringRecord, StrandError> {
        let bytes = encode(&record)?;
        let key = record.id().as_str();

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let inserted = {
            let mut table = write_txn.open_table(RECORDS).map_err(storage_err)?;
            let exists = table.get(key).map_err(storage_err)?.is_some();
            if !exists {
                table.insert(key, bytes.as_slice()).map_err(storage_err)?;
            }
            !exists
        };

        if !inserted {
            write_txn.abort().map_err(storage_err)?;
            return Err(StrandError::Duplicate);
        }
        write_txn.commit().map_err(storage_err)?;

        Ok(record)
    }

    fn delete_one(&mut self, value: &str) -> Result<Option<StringRecord>, StrandError> {
        let id = RecordId::for_value(value);

        let write_txn = self.db.begin_write().map_err(storage_err)?;
        let removed = {
            let mut table = write_txn.open_table(RECORDS).map_err(storage_err)?;
            match table.remove(id.as_str()).map_err(storage_err)? {
                Some(data) => Some(decode(id.as_str(), data.value())?),
                None => None,
            }
        };
        write_txn.commit().map_err(storage_err)?;

        Ok(removed)
    }

    fn count(&self) -> Result<usize, StrandError> {
        let read_txn = self.db.begin_read().map_err(storage_err)?;
        let table = read_txn.open_table(RECORDS).map_err(storage_err)?;
        Ok(table.len().map_err(storage_err)? as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
