//! Port-binding subtree transformer
//!
//! The interface ↔ rule-set relation spans a collection of tree nodes and
//! a collection of store rows at once, so it cannot be expressed as one
//! key/field mapping. Both directions work from a single snapshot of the
//! relation table taken at the start of the request.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};

use crate::error::{Result, XlateError};
use crate::keys;
use crate::model::{BuildEmpty, IngressTestSetKey, TestRoot, TestSetType};
use crate::path::{is_subtree_request, PathInfo};
use crate::store::{Row, Snapshot, StoreAccessor, TableData, TableDataMap};
use crate::xlate::key::{TEST_SET_TABLE, TEST_SET_TYPE_FIELD};
use crate::xlate::Operation;

/// List-valued membership field on a rule-set row
pub const TEST_SET_PORTS_FIELD: &str = "ports";

/// Canonical path of the interface collection
pub const INTERFACES_PATH: &str = "/test-xfmr/interfaces";

/// Canonical path of one interface list entry
pub const INTERFACE_PATH: &str = "/test-xfmr/interfaces/interface";

/// Canonical path of one membership list entry
pub const INGRESS_TEST_SET_PATH: &str =
    "/test-xfmr/interfaces/interface/ingress-test-sets/ingress-test-set";

/// Input to the tree-to-store direction
pub struct SubtreeWriteInput<'a> {
    /// Requested operation
    pub op: Operation,
    /// Resolved request path
    pub path: &'a PathInfo,
    /// Tree carrying the interfaces under mutation
    pub root: &'a TestRoot,
    /// Store the snapshot is taken from
    pub store: &'a dyn StoreAccessor,
}

/// Staged result of the tree-to-store direction
#[derive(Debug)]
pub struct SubtreeWriteResult {
    /// Staged table writes, committed by the host as one batch
    pub data: TableDataMap,
    /// The call covered the full interface collection; the host must not
    /// re-invoke it per interface
    pub covers_collection: bool,
}

/// Input to the store-to-tree direction
pub struct SubtreeReadInput<'a> {
    /// Resolved request path
    pub path: &'a PathInfo,
    /// Store the snapshot is taken from
    pub store: &'a dyn StoreAccessor,
}

/// Reconcile tree-side memberships into staged rule-set rows
///
/// Rows are only fully determined after every interface is visited, so the
/// result's `covers_collection` tells the host this single call already
/// handled the whole collection.
///
/// Membership lists are written replace-in-full: each target row's
/// `ports@` is overwritten with the complete collected member list, never
/// merged, so stale members cannot survive a partial update.
pub fn port_bindings_write(input: &SubtreeWriteInput<'_>) -> Result<SubtreeWriteResult> {
    let mut result = SubtreeWriteResult {
        data: TableDataMap::new(),
        covers_collection: true,
    };
    debug!("port_bindings_write: {} op {:?}", input.path.path(), input.op);
    let Some(interfaces) = &input.root.interfaces else {
        return Ok(result);
    };

    // One consistent view of the relation table for the whole request.
    let snapshot = Snapshot::load(input.store, &[TEST_SET_TABLE])?;
    let existing = snapshot.table(TEST_SET_TABLE).cloned().unwrap_or_default();

    let mut staged = TableData::new();
    let mut members: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (intf_id, intf) in &interfaces.interface {
        let declared = intf
            .ingress_test_sets
            .as_ref()
            .filter(|sets| !sets.is_empty());
        match declared {
            Some(sets) => {
                for set_key in sets.ingress_test_set.keys() {
                    let row_key =
                        keys::encode_suffixed(&set_key.set_name, set_key.set_type.key_suffix());
                    if input.op == Operation::Delete && !existing.contains_key(&row_key) {
                        return Err(XlateError::BindingNotFound {
                            set_name: set_key.set_name.clone(),
                            interface: intf_id.clone(),
                        });
                    }
                    members.entry(row_key.clone()).or_default().push(intf_id.clone());
                    if input.op == Operation::Delete {
                        // Membership-only row: the field set stays empty so
                        // only the ports list is touched.
                        staged.insert(row_key, Row::new());
                    } else {
                        staged.insert(
                            row_key,
                            Row::with_field(TEST_SET_TYPE_FIELD, set_key.set_type.store_code()),
                        );
                    }
                }
            }
            None => {
                // No explicit declarations: this interface does not modify
                // the relation, but any implicit membership already in the
                // store must survive the rewrite of the member lists.
                for (row_key, row) in &existing {
                    if row.get_list(TEST_SET_PORTS_FIELD).iter().any(|port| port == intf_id) {
                        members.entry(row_key.clone()).or_default().push(intf_id.clone());
                        staged.entry(row_key.clone()).or_insert_with(Row::new);
                    }
                }
            }
        }
    }

    for (row_key, member_list) in &members {
        let row = staged.entry(row_key.clone()).or_insert_with(Row::new);
        row.set_list(TEST_SET_PORTS_FIELD, member_list);
    }

    info!(
        "port_bindings_write: staged {} rule-set rows for {:?}",
        staged.len(),
        input.op
    );
    result.data.insert(TEST_SET_TABLE.to_string(), staged);
    Ok(result)
}

/// Populate the interface subtree from the rule-set rows
///
/// A generic request (no interface addressed) discovers the interface set
/// from every row's membership list; an empty relation table yields an
/// empty result, not an error. Rows whose discriminant fails to decode are
/// excluded from synthesis rather than aborting the read.
pub fn port_bindings_read(root: &mut TestRoot, input: &SubtreeReadInput<'_>) -> Result<()> {
    if !is_subtree_request(input.path.path(), INTERFACES_PATH) {
        return Ok(());
    }

    let snapshot = Snapshot::load(input.store, &[TEST_SET_TABLE])?;
    let test_sets = snapshot.table(TEST_SET_TABLE).cloned().unwrap_or_default();

    // Generic request: synthesize interface nodes from the membership lists.
    let generic_request = root.interfaces.as_ref().map_or(true, |i| i.is_empty());
    if generic_request {
        let mut bound: BTreeSet<String> = BTreeSet::new();
        for row in test_sets.values() {
            bound.extend(row.get_list(TEST_SET_PORTS_FIELD));
        }
        if bound.is_empty() {
            debug!("port_bindings_read: no bindings present, returning empty result");
            return Ok(());
        }
        let interfaces = root.interfaces_mut();
        for intf_id in &bound {
            interfaces.entry_or_create(intf_id).build_empty();
        }
    } else if input.path.path() == INTERFACE_PATH && input.path.targets_list_entry() {
        // A specific interface was requested as a list entry; materialize
        // its children before population.
        if let Some(interfaces) = root.interfaces.as_mut() {
            for intf in interfaces.interface.values_mut() {
                intf.build_empty();
            }
        }
    }

    let Some(interfaces) = root.interfaces.as_mut() else {
        return Ok(());
    };

    for (intf_id, intf) in interfaces.interface.iter_mut() {
        debug!("port_bindings_read: processing interface {}", intf_id);
        if let Some(config) = intf.config.as_mut() {
            config.id = Some(intf.id.clone());
        }
        if let Some(state) = intf.state.as_mut() {
            state.id = Some(intf.id.clone());
        }

        let Some(sets) = intf.ingress_test_sets.as_mut() else {
            continue;
        };

        let discover_sets = sets.is_empty();
        if discover_sets {
            for (row_key, row) in &test_sets {
                if !row.get_list(TEST_SET_PORTS_FIELD).iter().any(|port| port == intf_id) {
                    continue;
                }
                let code = row.get(TEST_SET_TYPE_FIELD).unwrap_or_default();
                let Some(set_type) = TestSetType::from_store_code(code) else {
                    warn!(
                        "port_bindings_read: excluding {} with unknown type code {:?}",
                        row_key, code
                    );
                    continue;
                };
                let Ok((set_name, _)) = keys::split_known_suffix(row_key, &[set_type.key_suffix()])
                else {
                    warn!("port_bindings_read: excluding undecodable row key {}", row_key);
                    continue;
                };
                let set_key = IngressTestSetKey::new(set_name, set_type);
                sets.entry_or_create(&set_key).build_empty();
            }
        } else if input.path.path() == INGRESS_TEST_SET_PATH && input.path.targets_list_entry() {
            for entry in sets.ingress_test_set.values_mut() {
                entry.build_empty();
            }
        }

        // Populate the config/state mirrors by copying from the canonical
        // fields, never by deriving them a second time.
        for (set_key, entry) in sets.ingress_test_set.iter_mut() {
            let row_key = keys::encode_suffixed(&set_key.set_name, set_key.set_type.key_suffix());
            let bound = test_sets
                .get(&row_key)
                .map(|row| row.get_list(TEST_SET_PORTS_FIELD).iter().any(|port| port == intf_id))
                .unwrap_or(false);
            if !bound {
                continue;
            }
            entry.set_name = set_key.set_name.clone();
            entry.set_type = Some(set_key.set_type);
            if let Some(config) = entry.config.as_mut() {
                config.set_name = Some(entry.set_name.clone());
                config.set_type = entry.set_type;
            }
            if let Some(state) = entry.state.as_mut() {
                state.set_name = Some(entry.set_name.clone());
                state.set_type = entry.set_type;
            }
        }
    }
    Ok(())
}
