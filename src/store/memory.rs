//! In-memory store
//!
//! A [`StoreAccessor`] backed by nested maps, used by hosts that stage
//! configuration in memory and by this crate's tests.

use std::collections::HashMap;

use crate::error::{Result, XlateError};

use super::{Row, StoreAccessor, TableData};

/// In-memory table store
#[derive(Debug, Clone, Default)]
pub struct MemStore {
    tables: HashMap<String, TableData>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        MemStore::default()
    }

    /// Insert or replace one row
    pub fn set_entry(&mut self, table: &str, key: &str, row: Row) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .insert(key.to_string(), row);
    }

    /// Remove one row, returning it if it was present
    pub fn delete_entry(&mut self, table: &str, key: &str) -> Option<Row> {
        self.tables.get_mut(table).and_then(|rows| rows.remove(key))
    }

    /// Apply a staged write set as one batch
    ///
    /// Staged fields merge into any existing row, so a row staged with
    /// only its membership list keeps fields it did not restate. Rows
    /// with an empty field set delete the target row, matching the
    /// convention transformers use to stage deletions.
    pub fn commit(&mut self, staged: &crate::store::TableDataMap) {
        for (table, rows) in staged {
            for (key, row) in rows {
                if row.is_empty() {
                    self.delete_entry(table, key);
                } else {
                    let entry = self
                        .tables
                        .entry(table.to_string())
                        .or_default()
                        .entry(key.to_string())
                        .or_default();
                    for (name, value) in &row.fields {
                        entry.set(name, value);
                    }
                }
            }
        }
    }
}

impl StoreAccessor for MemStore {
    fn get_keys(&self, table: &str) -> Result<Vec<String>> {
        Ok(self
            .tables
            .get(table)
            .map(|rows| rows.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn get_entry(&self, table: &str, key: &str) -> Result<Row> {
        self.tables
            .get(table)
            .and_then(|rows| rows.get(key))
            .cloned()
            .ok_or_else(|| XlateError::EntryNotFound {
                table: table.to_string(),
                key: key.to_string(),
            })
    }
}
