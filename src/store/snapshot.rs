//! Request snapshot
//!
//! All table reads for one request are taken once, up front, and reused by
//! every transformer invoked for that request. This keeps a multi-row
//! operation from observing rows at different points in time.

use std::collections::HashMap;

use log::debug;

use crate::error::{Result, XlateError};

use super::{Row, StoreAccessor, TableData};

/// Consistent view of the tables one request touches
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    tables: HashMap<String, TableData>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Snapshot::default()
    }

    /// Read the given tables from the store in full
    ///
    /// Any accessor failure aborts the whole load; a half-populated
    /// snapshot is never returned.
    pub fn load(store: &dyn StoreAccessor, tables: &[&str]) -> Result<Self> {
        let mut snapshot = Snapshot::new();
        for table in tables {
            let mut rows = TableData::new();
            for key in store.get_keys(table)? {
                let row = store.get_entry(table, &key)?;
                rows.insert(key, row);
            }
            debug!("snapshot: loaded {} rows from {}", rows.len(), table);
            snapshot.tables.insert(table.to_string(), rows);
        }
        Ok(snapshot)
    }

    /// Insert a table's rows directly, for hosts that pre-fetch
    pub fn insert_table(&mut self, table: &str, rows: TableData) {
        self.tables.insert(table.to_string(), rows);
    }

    /// All rows of one table, or `None` if the table was never loaded
    pub fn table(&self, table: &str) -> Option<&TableData> {
        self.tables.get(table)
    }

    /// One row, distinguishing table absence from row absence
    pub fn entry(&self, table: &str, key: &str) -> Result<&Row> {
        let rows = self
            .tables
            .get(table)
            .ok_or_else(|| XlateError::TableNotFound(table.to_string()))?;
        rows.get(key).ok_or_else(|| XlateError::EntryNotFound {
            table: table.to_string(),
            key: key.to_string(),
        })
    }
}
