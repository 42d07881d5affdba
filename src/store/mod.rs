//! Flat table store model
//!
//! This module provides the row/table data structures and the minimal
//! accessor contract the engine consumes. The storage engine itself,
//! including persistence and transactions, lives in the host runtime.

pub mod memory;
pub mod snapshot;

pub use memory::MemStore;
pub use snapshot::Snapshot;

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Debug, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Marker appended to a field name to denote a multi-valued field
pub const LIST_MARKER: &str = "@";

/// Separator joining the elements of a multi-valued field
pub const LIST_SEPARATOR: &str = ",";

/// Rows of one table, keyed by row key
pub type TableData = BTreeMap<String, Row>;

/// Staged write set: table name to row key to row
pub type TableDataMap = HashMap<String, TableData>;

/// A row in a store table
///
/// Field values are scalar strings; multi-valued fields are stored under
/// `<name>@` with elements joined by `,`. `get_list`/`set_list` hide that
/// convention from callers.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Field name to field value
    pub fields: HashMap<String, String>,
}

impl Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut sorted: Vec<_> = self.fields.iter().collect();
        sorted.sort();
        write!(f, "Row {{ ")?;
        for (name, value) in sorted {
            write!(f, "{}={:?} ", name, value)?;
        }
        write!(f, "}}")
    }
}

impl Row {
    /// Create an empty row
    pub fn new() -> Self {
        Row::default()
    }

    /// Create a row from a single scalar field
    pub fn with_field(name: &str, value: &str) -> Self {
        let mut row = Row::new();
        row.set(name, value);
        row
    }

    /// Whether the row carries no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get a scalar field value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Set a scalar field value
    pub fn set(&mut self, name: &str, value: &str) {
        self.fields.insert(name.to_string(), value.to_string());
    }

    /// Whether a scalar field is present
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Get a multi-valued field
    ///
    /// Reads `<name>@`. An absent field and an empty list are both `vec![]`.
    pub fn get_list(&self, name: &str) -> Vec<String> {
        match self.fields.get(&format!("{}{}", name, LIST_MARKER)) {
            Some(joined) => joined
                .split(LIST_SEPARATOR)
                .filter(|element| !element.is_empty())
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Replace a multi-valued field with the given elements
    pub fn set_list(&mut self, name: &str, elements: &[String]) {
        self.fields.insert(
            format!("{}{}", name, LIST_MARKER),
            elements.join(LIST_SEPARATOR),
        );
    }
}

/// Read contract the engine consumes from the store
///
/// Writes are never issued by the engine; transformers stage a
/// [`TableDataMap`] and the host commits it as one batch.
pub trait StoreAccessor {
    /// List the row keys of a table
    fn get_keys(&self, table: &str) -> Result<Vec<String>>;

    /// Fetch one row; absence is [`crate::XlateError::EntryNotFound`]
    fn get_entry(&self, table: &str, key: &str) -> Result<Row>;
}
