//! Transformer callbacks
//!
//! The translation contracts between the tree and the store: key, field,
//! table, and subtree transformers, plus the subscription descriptor and
//! the per-request hooks. The host invokes these through a
//! [`crate::registry::TransformerSet`].

pub mod field;
pub mod hooks;
pub mod key;
pub mod subscribe;
pub mod subtree;
pub mod table;

pub use field::{
    exclude_filter_derive, exclude_filter_recover, sensor_group_id_recover, sensor_type_recover,
    test_set_name_recover, test_set_type_derive, test_set_type_recover,
};
pub use hooks::{post_request, pre_request};
pub use key::{
    sensor_key_derive, sensor_key_recover, test_set_key_derive, test_set_key_recover,
};
pub use subscribe::{port_bindings_subscribe, SubscribeInfo};
pub use subtree::{
    port_bindings_read, port_bindings_write, SubtreeReadInput, SubtreeWriteInput,
    SubtreeWriteResult,
};
pub use table::sensor_table_select;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::TestSetType;

/// Operation kind of the request being translated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Read
    Get,
    /// Create new entries
    Create,
    /// Update existing entries
    Update,
    /// Replace entries wholesale
    Replace,
    /// Delete entries
    Delete,
}

impl Operation {
    /// Whether this operation supplies new content (create, update,
    /// replace); reads and deletes resolve their targets by fan-out
    /// instead of requiring one
    pub fn is_content_write(self) -> bool {
        matches!(self, Operation::Create | Operation::Update | Operation::Replace)
    }
}

/// Path variables recovered from a row key, keyed by variable name
pub type PathVars = HashMap<String, String>;

/// Field assignments produced by a tree-to-store field transformer
pub type FieldMap = HashMap<String, String>;

/// Tree leaf values produced by a store-to-tree field transformer
pub type LeafMap = HashMap<String, String>;

/// A tree leaf value handed to a tree-to-store field transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LeafValue {
    /// Plain string leaf
    Str(String),
    /// Rule-set type leaf
    SetType(TestSetType),
}
