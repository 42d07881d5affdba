//! Transformer set
//!
//! An explicitly constructed name → handler map the host consults at the
//! appropriate points of a request's lifecycle. There is no process-wide
//! mutable registry: a host builds a [`TransformerSet`] (usually via
//! [`TransformerSet::builtin`]) at startup and passes it around as a
//! value, which keeps registration testable in isolation.

use std::collections::HashMap;

use crate::error::{Result, XlateError};
use crate::model::TestRoot;
use crate::path::PathInfo;
use crate::store::{Snapshot, TableDataMap};
use crate::xlate::{
    self, FieldMap, LeafMap, LeafValue, Operation, PathVars, SubscribeInfo, SubtreeReadInput,
    SubtreeWriteInput, SubtreeWriteResult,
};

/// Derive a row key from path variables
pub type KeyDeriveFn = fn(&PathInfo) -> Result<String>;

/// Recover path variables from a row key and the request snapshot
pub type KeyRecoverFn = fn(&str, &Snapshot) -> Result<PathVars>;

/// Derive field assignments from one tree leaf
pub type FieldDeriveFn = fn(Option<&LeafValue>) -> Result<FieldMap>;

/// Recover tree leaves from the request snapshot
pub type FieldRecoverFn = fn(&PathInfo, &str, &Snapshot) -> Result<LeafMap>;

/// Select the tables relevant to a request
pub type TableSelectFn = fn(&PathInfo, Operation) -> Result<Vec<String>>;

/// Reconcile a tree subtree into staged rows
pub type SubtreeWriteFn = fn(&SubtreeWriteInput<'_>) -> Result<SubtreeWriteResult>;

/// Populate a tree subtree from store rows
pub type SubtreeReadFn = fn(&mut TestRoot, &SubtreeReadInput<'_>) -> Result<()>;

/// Describe a subtree to the notification subsystem
pub type SubscribeFn = fn(&PathInfo) -> Result<SubscribeInfo>;

/// Observe a request before any per-entity transformer
pub type PreHookFn = fn(&PathInfo) -> Result<()>;

/// Adjust the full staged write set after all per-row assignments
pub type PostHookFn = fn(&PathInfo, &TableDataMap) -> Result<TableDataMap>;

/// A registered transformer callback
#[derive(Debug, Clone, Copy)]
pub enum Handler {
    /// Key derivation (tree to store)
    KeyDerive(KeyDeriveFn),
    /// Key recovery (store to tree)
    KeyRecover(KeyRecoverFn),
    /// Field derivation (tree to store)
    FieldDerive(FieldDeriveFn),
    /// Field recovery (store to tree)
    FieldRecover(FieldRecoverFn),
    /// Table selection
    TableSelect(TableSelectFn),
    /// Subtree write direction
    SubtreeWrite(SubtreeWriteFn),
    /// Subtree read direction
    SubtreeRead(SubtreeReadFn),
    /// Subscription descriptor
    Subscribe(SubscribeFn),
    /// Pre-request hook
    PreHook(PreHookFn),
    /// Post-request hook
    PostHook(PostHookFn),
}

/// Name → handler map for one schema's transformers
#[derive(Debug, Clone, Default)]
pub struct TransformerSet {
    handlers: HashMap<String, Handler>,
}

macro_rules! typed_getter {
    ($(#[$doc:meta])* $name:ident, $variant:ident, $ty:ty) => {
        $(#[$doc])*
        pub fn $name(&self, name: &str) -> Option<$ty> {
            match self.handlers.get(name) {
                Some(Handler::$variant(handler)) => Some(*handler),
                _ => None,
            }
        }
    };
}

impl TransformerSet {
    /// Create an empty set
    pub fn new() -> Self {
        TransformerSet::default()
    }

    /// Bind a handler under a unique name
    pub fn bind(&mut self, name: &str, handler: Handler) -> Result<()> {
        if self.handlers.contains_key(name) {
            return Err(XlateError::DuplicateHandler(name.to_string()));
        }
        self.handlers.insert(name.to_string(), handler);
        Ok(())
    }

    /// Whether any handler is bound under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of bound handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    typed_getter!(
        /// Look up a key-derive handler
        key_derive, KeyDerive, KeyDeriveFn
    );
    typed_getter!(
        /// Look up a key-recover handler
        key_recover, KeyRecover, KeyRecoverFn
    );
    typed_getter!(
        /// Look up a field-derive handler
        field_derive, FieldDerive, FieldDeriveFn
    );
    typed_getter!(
        /// Look up a field-recover handler
        field_recover, FieldRecover, FieldRecoverFn
    );
    typed_getter!(
        /// Look up a table-select handler
        table_select, TableSelect, TableSelectFn
    );
    typed_getter!(
        /// Look up a subtree-write handler
        subtree_write, SubtreeWrite, SubtreeWriteFn
    );
    typed_getter!(
        /// Look up a subtree-read handler
        subtree_read, SubtreeRead, SubtreeReadFn
    );
    typed_getter!(
        /// Look up a subscription handler
        subscribe, Subscribe, SubscribeFn
    );
    typed_getter!(
        /// Look up a pre-request hook
        pre_hook, PreHook, PreHookFn
    );
    typed_getter!(
        /// Look up a post-request hook
        post_hook, PostHook, PostHookFn
    );

    /// The full transformer set implemented by this crate
    pub fn builtin() -> Self {
        let mut set = TransformerSet::new();
        let bindings: &[(&str, Handler)] = &[
            ("test_pre", Handler::PreHook(xlate::pre_request)),
            ("test_post", Handler::PostHook(xlate::post_request)),
            ("sensor_type_table", Handler::TableSelect(xlate::sensor_table_select)),
            ("sensor_type_key_derive", Handler::KeyDerive(xlate::sensor_key_derive)),
            ("sensor_type_key_recover", Handler::KeyRecover(sensor_key_recover_cb)),
            ("test_set_key_derive", Handler::KeyDerive(xlate::test_set_key_derive)),
            ("test_set_key_recover", Handler::KeyRecover(xlate::test_set_key_recover)),
            ("sensor_group_id_recover", Handler::FieldRecover(sensor_group_id_recover_cb)),
            ("sensor_type_recover", Handler::FieldRecover(sensor_type_recover_cb)),
            ("test_set_name_recover", Handler::FieldRecover(test_set_name_recover_cb)),
            ("exclude_filter_derive", Handler::FieldDerive(xlate::exclude_filter_derive)),
            ("exclude_filter_recover", Handler::FieldRecover(xlate::exclude_filter_recover)),
            ("test_set_type_derive", Handler::FieldDerive(xlate::test_set_type_derive)),
            ("test_set_type_recover", Handler::FieldRecover(test_set_type_recover_cb)),
            ("port_bindings_write", Handler::SubtreeWrite(xlate::port_bindings_write)),
            ("port_bindings_read", Handler::SubtreeRead(xlate::port_bindings_read)),
            ("port_bindings_subscribe", Handler::Subscribe(xlate::port_bindings_subscribe)),
        ];
        for (name, handler) in bindings {
            set.bind(name, *handler)
                .unwrap_or_else(|_| unreachable!("builtin names are unique"));
        }
        set
    }
}

// Uniform-signature adapters for handlers that ignore part of the input.

fn sensor_key_recover_cb(key: &str, _snapshot: &Snapshot) -> Result<PathVars> {
    xlate::sensor_key_recover(key)
}

fn sensor_group_id_recover_cb(_path: &PathInfo, key: &str, _snapshot: &Snapshot) -> Result<LeafMap> {
    xlate::sensor_group_id_recover(key)
}

fn sensor_type_recover_cb(path: &PathInfo, _key: &str, _snapshot: &Snapshot) -> Result<LeafMap> {
    xlate::sensor_type_recover(path)
}

fn test_set_name_recover_cb(path: &PathInfo, _key: &str, _snapshot: &Snapshot) -> Result<LeafMap> {
    xlate::test_set_name_recover(path)
}

fn test_set_type_recover_cb(_path: &PathInfo, key: &str, snapshot: &Snapshot) -> Result<LeafMap> {
    xlate::test_set_type_recover(key, snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_covers_every_kind() {
        let set = TransformerSet::builtin();
        assert!(set.pre_hook("test_pre").is_some());
        assert!(set.post_hook("test_post").is_some());
        assert!(set.table_select("sensor_type_table").is_some());
        assert!(set.key_derive("sensor_type_key_derive").is_some());
        assert!(set.key_recover("sensor_type_key_recover").is_some());
        assert!(set.key_derive("test_set_key_derive").is_some());
        assert!(set.key_recover("test_set_key_recover").is_some());
        assert!(set.field_derive("exclude_filter_derive").is_some());
        assert!(set.field_recover("exclude_filter_recover").is_some());
        assert!(set.field_derive("test_set_type_derive").is_some());
        assert!(set.field_recover("test_set_type_recover").is_some());
        assert!(set.field_recover("sensor_group_id_recover").is_some());
        assert!(set.field_recover("sensor_type_recover").is_some());
        assert!(set.field_recover("test_set_name_recover").is_some());
        assert!(set.subtree_write("port_bindings_write").is_some());
        assert!(set.subtree_read("port_bindings_read").is_some());
        assert!(set.subscribe("port_bindings_subscribe").is_some());
        assert_eq!(set.len(), 17);
    }

    #[test]
    fn lookup_is_kind_checked() {
        let set = TransformerSet::builtin();
        // Bound under a different kind: the typed getter refuses it.
        assert!(set.key_derive("port_bindings_write").is_none());
        assert!(set.subtree_write("sensor_type_key_derive").is_none());
        // Unbound name.
        assert!(set.key_derive("nonexistent").is_none());
    }

    #[test]
    fn duplicate_bind_is_rejected() {
        let mut set = TransformerSet::new();
        set.bind("h", Handler::PreHook(xlate::pre_request)).unwrap();
        let err = set.bind("h", Handler::PreHook(xlate::pre_request)).unwrap_err();
        assert_eq!(err, XlateError::DuplicateHandler("h".to_string()));
    }

    #[test]
    fn handlers_invoke_through_the_set() {
        let set = TransformerSet::builtin();
        let derive = set.key_derive("sensor_type_key_derive").unwrap();
        let path = PathInfo::new("/test-xfmr/test-sensor-groups/test-sensor-group")
            .with_var("id", "g1")
            .with_var("type", "sensora_temp");
        assert_eq!(derive(&path).unwrap(), "g1|sensor_type_a_temp");
    }
}
