//! Typed tree nodes
//!
//! Explicit node types for the subtree this engine translates, replacing
//! reflective field walks with typed accessors. Keyed collections are
//! `BTreeMap`s so traversal order is deterministic across requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::types::TestSetType;

/// Materialize a node's zero-value children before population
pub trait BuildEmpty {
    /// Create every optional child as an empty node
    fn build_empty(&mut self);
}

/// Root of the translated tree region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestRoot {
    /// Interface collection; `None` when the request never touched it
    pub interfaces: Option<Interfaces>,
}

impl TestRoot {
    /// Create an empty root
    pub fn new() -> Self {
        TestRoot::default()
    }

    /// The interface collection, created on first use
    pub fn interfaces_mut(&mut self) -> &mut Interfaces {
        self.interfaces.get_or_insert_with(Interfaces::default)
    }
}

/// Keyed list of interfaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interfaces {
    /// Interface id to node
    pub interface: BTreeMap<String, Interface>,
}

impl Interfaces {
    /// Whether no interface node is present
    pub fn is_empty(&self) -> bool {
        self.interface.is_empty()
    }

    /// The node for `id`, created empty if absent
    pub fn entry_or_create(&mut self, id: &str) -> &mut Interface {
        self.interface
            .entry(id.to_string())
            .or_insert_with(|| Interface::new(id))
    }
}

/// One interface node
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// Interface identifier (list key)
    pub id: String,
    /// Read-write mirror container
    pub config: Option<InterfaceMirror>,
    /// Read-only mirror container
    pub state: Option<InterfaceMirror>,
    /// Rule-set memberships declared on this interface
    pub ingress_test_sets: Option<IngressTestSets>,
}

impl Interface {
    /// Create a bare interface node
    pub fn new(id: &str) -> Self {
        Interface {
            id: id.to_string(),
            ..Interface::default()
        }
    }

    /// Explicit membership entries, empty slice view when none declared
    pub fn declared_test_sets(&self) -> Vec<&IngressTestSetKey> {
        match &self.ingress_test_sets {
            Some(sets) => sets.ingress_test_set.keys().collect(),
            None => Vec::new(),
        }
    }
}

impl BuildEmpty for Interface {
    fn build_empty(&mut self) {
        self.config.get_or_insert_with(InterfaceMirror::default);
        self.state.get_or_insert_with(InterfaceMirror::default);
        self.ingress_test_sets
            .get_or_insert_with(IngressTestSets::default);
    }
}

/// Config/state mirror of an interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterfaceMirror {
    /// Mirrored interface identifier
    pub id: Option<String>,
}

/// Keyed list of rule-set memberships on one interface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressTestSets {
    /// Membership entries keyed by (name, type)
    pub ingress_test_set: BTreeMap<IngressTestSetKey, IngressTestSet>,
}

impl IngressTestSets {
    /// Whether no membership entry is present
    pub fn is_empty(&self) -> bool {
        self.ingress_test_set.is_empty()
    }

    /// The entry for `key`, created empty if absent
    pub fn entry_or_create(&mut self, key: &IngressTestSetKey) -> &mut IngressTestSet {
        self.ingress_test_set
            .entry(key.clone())
            .or_insert_with(|| IngressTestSet::new(key))
    }
}

/// Composite list key of a rule-set membership
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IngressTestSetKey {
    /// Rule-set name
    pub set_name: String,
    /// Rule-set type
    pub set_type: TestSetType,
}

impl IngressTestSetKey {
    /// Create a membership key
    pub fn new(set_name: &str, set_type: TestSetType) -> Self {
        IngressTestSetKey {
            set_name: set_name.to_string(),
            set_type,
        }
    }
}

/// One rule-set membership entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressTestSet {
    /// Rule-set name (list key)
    pub set_name: String,
    /// Rule-set type (list key); `None` only on a bare pre-population node
    pub set_type: Option<TestSetType>,
    /// Read-write mirror
    pub config: Option<TestSetMirror>,
    /// Read-only mirror
    pub state: Option<TestSetMirror>,
}

impl IngressTestSet {
    /// Create an entry carrying its canonical key fields
    pub fn new(key: &IngressTestSetKey) -> Self {
        IngressTestSet {
            set_name: key.set_name.clone(),
            set_type: Some(key.set_type),
            ..IngressTestSet::default()
        }
    }
}

impl BuildEmpty for IngressTestSet {
    fn build_empty(&mut self) {
        self.config.get_or_insert_with(TestSetMirror::default);
        self.state.get_or_insert_with(TestSetMirror::default);
    }
}

/// Config/state mirror of a rule-set membership
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestSetMirror {
    /// Mirrored rule-set name
    pub set_name: Option<String>,
    /// Mirrored rule-set type
    pub set_type: Option<TestSetType>,
}
