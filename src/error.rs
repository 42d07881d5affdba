//! Error types for the translation engine
//!
//! This module provides the error taxonomy shared by every transformer.
//! "Not found" is deliberately split into three granularities (table, row,
//! field) because callers degrade differently for each.

use thiserror::Error;

/// Result type for the translation engine
pub type Result<T> = std::result::Result<T, XlateError>;

/// Error type for the translation engine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum XlateError {
    /// A composite row key could not be decoded
    #[error("Malformed key {key:?}: {reason}")]
    MalformedKey {
        /// The offending row key
        key: String,
        /// Why decoding failed
        reason: String,
    },

    /// A discriminant matched no recognized category
    #[error("Unsupported category {0:?}: key not supported")]
    UnsupportedCategory(String),

    /// A required path variable was absent
    #[error("Missing path variable {0:?}")]
    MissingPathVariable(&'static str),

    /// Table absent from the request snapshot
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Row absent from a table present in the snapshot
    #[error("Table instance not found: {table}|{key}")]
    EntryNotFound {
        /// Table searched
        table: String,
        /// Row key searched for
        key: String,
    },

    /// Expected field absent from an existing row
    #[error("Resource not found: field {field:?} in {table}|{key}")]
    FieldNotFound {
        /// Table the row belongs to
        table: String,
        /// Row key
        key: String,
        /// Field searched for
        field: String,
    },

    /// Delete targeted a relation membership that does not exist
    #[error("Binding not found for test set {set_name:?} on {interface:?}")]
    BindingNotFound {
        /// Rule-set name component
        set_name: String,
        /// Interface the binding was expected on
        interface: String,
    },

    /// A store-side code matched no enumeration member
    #[error("Unknown enumeration code {0:?}")]
    UnknownEnumCode(String),

    /// A leaf value had the wrong shape for the transformer
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Store accessor failure
    #[error("Store error: {0}")]
    Store(String),

    /// A handler name was bound twice in one transformer set
    #[error("Duplicate handler registration: {0}")]
    DuplicateHandler(String),
}
