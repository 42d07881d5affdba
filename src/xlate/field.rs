//! Field transformers
//!
//! Map a single tree leaf to one or more store field assignments and back.
//! An absent leaf always yields a defined default assignment (an empty
//! field value), never a skipped write. Optional lookups degrade to "no
//! value contributed"; a missing expected field on an existing row is a
//! hard not-found.

use log::{debug, warn};

use crate::error::{Result, XlateError};
use crate::model::{SensorCategory, TestSetType};
use crate::path::PathInfo;
use crate::store::Snapshot;
use crate::xlate::key::{TEST_SET_TABLE, TEST_SET_TYPE_FIELD};
use crate::xlate::{FieldMap, LeafMap, LeafValue};

/// Store field carrying the exclude filter
pub const EXCLUDE_FILTER_FIELD: &str = "exclude-filter";

/// Marker prefix applied to exclude-filter values on write
const FILTER_MARKER: &str = "filter_";

/// Derive the `exclude-filter` field assignment from a tree leaf
///
/// The marker prefix applied here is stripped by
/// [`exclude_filter_recover`], so a value survives the round trip exactly.
pub fn exclude_filter_derive(value: Option<&LeafValue>) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    match value {
        None => {
            fields.insert(EXCLUDE_FILTER_FIELD.to_string(), String::new());
        }
        Some(LeafValue::Str(filter)) => {
            fields.insert(
                EXCLUDE_FILTER_FIELD.to_string(),
                format!("{}{}", FILTER_MARKER, filter),
            );
        }
        Some(other) => {
            return Err(XlateError::InvalidArgument(format!(
                "exclude-filter expects a string leaf, got {:?}",
                other
            )));
        }
    }
    Ok(fields)
}

/// Recover the `exclude-filter` tree leaf from the active snapshot
///
/// The sensor table is selected from the `type` path variable. An absent
/// table or row contributes nothing; an existing row without the field is
/// a resource-not-found for the caller.
pub fn exclude_filter_recover(path: &PathInfo, key: &str, snapshot: &Snapshot) -> Result<LeafMap> {
    let mut leaves = LeafMap::new();

    let category = match path.var("type").and_then(SensorCategory::from_path_type) {
        Some(category) => category,
        None => {
            debug!("exclude_filter_recover: no recognized sensor category in path");
            return Ok(leaves);
        }
    };

    let table = category.table();
    let row = match snapshot.table(table) {
        Some(rows) => match rows.get(key) {
            Some(row) => row,
            None => {
                debug!("exclude_filter_recover: instance {} absent from {}", key, table);
                return Ok(leaves);
            }
        },
        None => {
            debug!("exclude_filter_recover: table {} absent from snapshot", table);
            return Ok(leaves);
        }
    };

    let stored = row
        .get(EXCLUDE_FILTER_FIELD)
        .ok_or_else(|| XlateError::FieldNotFound {
            table: table.to_string(),
            key: key.to_string(),
            field: EXCLUDE_FILTER_FIELD.to_string(),
        })?;
    let filter = stored.strip_prefix(FILTER_MARKER).unwrap_or(stored);
    leaves.insert(EXCLUDE_FILTER_FIELD.to_string(), filter.to_string());
    Ok(leaves)
}

/// Derive the rule-set `type` field assignment from a tree leaf
pub fn test_set_type_derive(value: Option<&LeafValue>) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    match value {
        None => {
            fields.insert(TEST_SET_TYPE_FIELD.to_string(), String::new());
        }
        Some(LeafValue::SetType(set_type)) => {
            fields.insert(
                TEST_SET_TYPE_FIELD.to_string(),
                set_type.store_code().to_string(),
            );
        }
        Some(other) => {
            return Err(XlateError::InvalidArgument(format!(
                "type expects a rule-set type leaf, got {:?}",
                other
            )));
        }
    }
    Ok(fields)
}

/// Recover the rule-set `type` tree leaf from the active snapshot
///
/// An unknown store code is logged and contributes nothing; reads never
/// fail on a decode anomaly in a single row.
pub fn test_set_type_recover(key: &str, snapshot: &Snapshot) -> Result<LeafMap> {
    let mut leaves = LeafMap::new();

    let row = match snapshot.table(TEST_SET_TABLE).and_then(|rows| rows.get(key)) {
        Some(row) => row,
        None => {
            debug!("test_set_type_recover: {} absent from snapshot", key);
            return Ok(leaves);
        }
    };

    let code = row
        .get(TEST_SET_TYPE_FIELD)
        .ok_or_else(|| XlateError::FieldNotFound {
            table: TEST_SET_TABLE.to_string(),
            key: key.to_string(),
            field: TEST_SET_TYPE_FIELD.to_string(),
        })?;
    match TestSetType::from_store_code(code) {
        Some(set_type) => {
            leaves.insert(TEST_SET_TYPE_FIELD.to_string(), set_type.name().to_string());
        }
        None => {
            warn!("test_set_type_recover: unknown type code {:?} on {}", code, key);
        }
    }
    Ok(leaves)
}

/// Recover the sensor group `id` leaf from its row key
pub fn sensor_group_id_recover(key: &str) -> Result<LeafMap> {
    let mut leaves = LeafMap::new();
    if !key.is_empty() {
        leaves.insert("id".to_string(), key.to_string());
    }
    Ok(leaves)
}

/// Recover the sensor `type` leaf from path variables
pub fn sensor_type_recover(path: &PathInfo) -> Result<LeafMap> {
    let mut leaves = LeafMap::new();
    let (Some(_), Some(sensor_type)) = (path.var("id"), path.var("type")) else {
        return Ok(leaves);
    };
    if SensorCategory::from_path_type(sensor_type).is_none() {
        return Err(XlateError::InvalidArgument(
            "invalid sensor type in uri".to_string(),
        ));
    }
    leaves.insert("type".to_string(), sensor_type.to_string());
    Ok(leaves)
}

/// Recover the rule-set `name` leaf from path variables
pub fn test_set_name_recover(path: &PathInfo) -> Result<LeafMap> {
    let mut leaves = LeafMap::new();
    if let (Some(name), Some(_)) = (path.var("name"), path.var("type")) {
        leaves.insert("name".to_string(), name.to_string());
    }
    Ok(leaves)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemStore, Row};
    use proptest::prelude::*;

    fn snapshot_with(table: &str, key: &str, row: Row) -> Snapshot {
        let mut store = MemStore::new();
        store.set_entry(table, key, row);
        Snapshot::load(&store, &[table]).unwrap()
    }

    fn sensor_a_path() -> PathInfo {
        PathInfo::new("/test-xfmr/test-sensor-groups/test-sensor-group")
            .with_var("id", "g1")
            .with_var("type", "sensora_temp")
    }

    #[test]
    fn absent_leaf_yields_empty_assignment() {
        let fields = exclude_filter_derive(None).unwrap();
        assert_eq!(fields.get(EXCLUDE_FILTER_FIELD).map(String::as_str), Some(""));

        let fields = test_set_type_derive(None).unwrap();
        assert_eq!(fields.get(TEST_SET_TYPE_FIELD).map(String::as_str), Some(""));
    }

    #[test]
    fn exclude_filter_applies_marker() {
        let value = LeafValue::Str("noise".to_string());
        let fields = exclude_filter_derive(Some(&value)).unwrap();
        assert_eq!(
            fields.get(EXCLUDE_FILTER_FIELD).map(String::as_str),
            Some("filter_noise")
        );
    }

    #[test]
    fn exclude_filter_rejects_wrong_leaf_shape() {
        let value = LeafValue::SetType(TestSetType::Ipv4);
        assert!(matches!(
            exclude_filter_derive(Some(&value)).unwrap_err(),
            XlateError::InvalidArgument(_)
        ));
    }

    #[test]
    fn exclude_filter_recover_strips_marker() {
        let snapshot = snapshot_with(
            "TEST_SENSOR_A_TABLE",
            "g1|sensor_type_a_temp",
            Row::with_field(EXCLUDE_FILTER_FIELD, "filter_noise"),
        );
        let leaves =
            exclude_filter_recover(&sensor_a_path(), "g1|sensor_type_a_temp", &snapshot).unwrap();
        assert_eq!(leaves.get(EXCLUDE_FILTER_FIELD).map(String::as_str), Some("noise"));
    }

    #[test]
    fn exclude_filter_missing_field_is_not_found() {
        let snapshot = snapshot_with(
            "TEST_SENSOR_A_TABLE",
            "g1|sensor_type_a_temp",
            Row::with_field("other", "x"),
        );
        let err = exclude_filter_recover(&sensor_a_path(), "g1|sensor_type_a_temp", &snapshot)
            .unwrap_err();
        assert!(matches!(err, XlateError::FieldNotFound { .. }));
    }

    #[test]
    fn exclude_filter_missing_row_or_table_contributes_nothing() {
        // Table loaded, row absent.
        let mut store = MemStore::new();
        store.set_entry("TEST_SENSOR_A_TABLE", "other", Row::with_field("x", "y"));
        let snapshot = Snapshot::load(&store, &["TEST_SENSOR_A_TABLE"]).unwrap();
        let leaves =
            exclude_filter_recover(&sensor_a_path(), "g1|sensor_type_a_temp", &snapshot).unwrap();
        assert!(leaves.is_empty());

        // Table never loaded.
        let leaves = exclude_filter_recover(&sensor_a_path(), "g1|sensor_type_a_temp", &Snapshot::new())
            .unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn test_set_type_round_trips_through_store_code() {
        let value = LeafValue::SetType(TestSetType::Ipv6);
        let fields = test_set_type_derive(Some(&value)).unwrap();
        assert_eq!(fields.get(TEST_SET_TYPE_FIELD).map(String::as_str), Some("L3V6"));

        let snapshot = snapshot_with(
            TEST_SET_TABLE,
            "acl1_TEST_SET_IPV6",
            Row::with_field(TEST_SET_TYPE_FIELD, "L3V6"),
        );
        let leaves = test_set_type_recover("acl1_TEST_SET_IPV6", &snapshot).unwrap();
        assert_eq!(
            leaves.get(TEST_SET_TYPE_FIELD).map(String::as_str),
            Some("TEST_SET_IPV6")
        );
    }

    #[test]
    fn test_set_type_unknown_code_is_excluded_not_fatal() {
        let snapshot = snapshot_with(
            TEST_SET_TABLE,
            "acl1_TEST_SET_IPV4",
            Row::with_field(TEST_SET_TYPE_FIELD, "L2"),
        );
        let leaves = test_set_type_recover("acl1_TEST_SET_IPV4", &snapshot).unwrap();
        assert!(leaves.is_empty());
    }

    #[test]
    fn leafref_recovers_echo_components() {
        let leaves = sensor_group_id_recover("g1").unwrap();
        assert_eq!(leaves.get("id").map(String::as_str), Some("g1"));
        assert!(sensor_group_id_recover("").unwrap().is_empty());

        let leaves = sensor_type_recover(&sensor_a_path()).unwrap();
        assert_eq!(leaves.get("type").map(String::as_str), Some("sensora_temp"));

        let bad = PathInfo::new("/p").with_var("id", "g1").with_var("type", "bogus_temp");
        assert!(matches!(
            sensor_type_recover(&bad).unwrap_err(),
            XlateError::InvalidArgument(_)
        ));

        let path = PathInfo::new("/p").with_var("name", "acl1").with_var("type", "TEST_SET_IPV4");
        let leaves = test_set_name_recover(&path).unwrap();
        assert_eq!(leaves.get("name").map(String::as_str), Some("acl1"));
    }

    proptest! {
        // Round-trip law: recover(derive(v)) == v for any accepted value.
        #[test]
        fn exclude_filter_round_trip(filter in "[a-zA-Z0-9_]{0,24}") {
            let value = LeafValue::Str(filter.clone());
            let fields = exclude_filter_derive(Some(&value)).unwrap();
            let stored = fields.get(EXCLUDE_FILTER_FIELD).unwrap();

            let snapshot = snapshot_with(
                "TEST_SENSOR_A_TABLE",
                "g1|sensor_type_a_temp",
                Row::with_field(EXCLUDE_FILTER_FIELD, stored),
            );
            let leaves = exclude_filter_recover(
                &sensor_a_path(),
                "g1|sensor_type_a_temp",
                &snapshot,
            ).unwrap();
            prop_assert_eq!(leaves.get(EXCLUDE_FILTER_FIELD).map(String::as_str), Some(filter.as_str()));
        }
    }
}
