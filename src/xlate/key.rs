//! Key transformers
//!
//! Derive a store row key from path variables (writes) and recover path
//! variables from a row key (reads). Recovery of an enumerated path
//! variable additionally consults the request snapshot, because the key
//! alone does not always disambiguate the type.

use log::{debug, warn};

use crate::error::{Result, XlateError};
use crate::keys;
use crate::model::{SensorCategory, TestSetType};
use crate::path::PathInfo;
use crate::store::Snapshot;
use crate::xlate::PathVars;

/// Store table holding rule-set rows
pub const TEST_SET_TABLE: &str = "TEST_SET_TABLE";

/// Discriminant field on a rule-set row
pub const TEST_SET_TYPE_FIELD: &str = "type";

/// Derive a sensor row key, `<id>|<store-prefixed type>`, from path variables
///
/// The recognized tree-side category prefix is rewritten to its canonical
/// store-side form; an unrecognized prefix is refused rather than passed
/// through.
pub fn sensor_key_derive(path: &PathInfo) -> Result<String> {
    let group_id = path
        .var("id")
        .ok_or(XlateError::MissingPathVariable("id"))?;
    let sensor_type = path
        .var("type")
        .ok_or(XlateError::MissingPathVariable("type"))?;

    let category = SensorCategory::from_path_type(sensor_type)
        .ok_or_else(|| XlateError::UnsupportedCategory(sensor_type.to_string()))?;
    let store_type = sensor_type.replacen(category.path_prefix(), category.store_prefix(), 1);

    let key = keys::encode_key(&[group_id, &store_type])?;
    debug!("sensor_key_derive: {} -> {}", sensor_type, key);
    Ok(key)
}

/// Recover the `type` path variable from a sensor row key
///
/// Strict inverse of [`sensor_key_derive`]: the canonical store prefix is
/// rewritten back to the tree-side category prefix.
pub fn sensor_key_recover(key: &str) -> Result<PathVars> {
    let parts = keys::decode_key(key, 2)?;
    let store_type = parts[1];

    let category = SensorCategory::from_store_component(store_type)
        .ok_or_else(|| XlateError::UnsupportedCategory(store_type.to_string()))?;
    let sensor_type = store_type.replacen(category.store_prefix(), category.path_prefix(), 1);

    let mut vars = PathVars::new();
    vars.insert("id".to_string(), parts[0].to_string());
    vars.insert("type".to_string(), sensor_type);
    Ok(vars)
}

/// Derive a rule-set row key, `<name>_<TYPE SUFFIX>`, from path variables
pub fn test_set_key_derive(path: &PathInfo) -> Result<String> {
    let set_name = path
        .var("name")
        .ok_or(XlateError::MissingPathVariable("name"))?;
    let set_type = path
        .var("type")
        .ok_or(XlateError::MissingPathVariable("type"))?;

    let set_type = TestSetType::from_name(set_type)
        .ok_or_else(|| XlateError::UnsupportedCategory(set_type.to_string()))?;
    Ok(keys::encode_suffixed(set_name, set_type.key_suffix()))
}

/// Recover the `name` and `type` path variables from a rule-set row key
///
/// The name comes from suffix-anchored decoding; the type is confirmed
/// against the row's discriminant field in the snapshot. The three lookup
/// failures stay distinct: undecodable key, table absent, row absent. A
/// discriminant code outside the enumeration is an error here, never a
/// fallback to some other member.
pub fn test_set_key_recover(key: &str, snapshot: &Snapshot) -> Result<PathVars> {
    let suffixes = TestSetType::key_suffixes();
    let (set_name, _suffix) = keys::split_known_suffix(key, &suffixes)?;

    let row = snapshot.entry(TEST_SET_TABLE, key)?;
    let code = row
        .get(TEST_SET_TYPE_FIELD)
        .ok_or_else(|| XlateError::FieldNotFound {
            table: TEST_SET_TABLE.to_string(),
            key: key.to_string(),
            field: TEST_SET_TYPE_FIELD.to_string(),
        })?;
    let set_type = TestSetType::from_store_code(code).ok_or_else(|| {
        warn!("test_set_key_recover: row {} carries unknown type code {:?}", key, code);
        XlateError::UnknownEnumCode(code.to_string())
    })?;

    let mut vars = PathVars::new();
    vars.insert("name".to_string(), set_name.to_string());
    vars.insert("type".to_string(), set_type.name().to_string());
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemStore, Row};

    fn sensor_path(id: &str, sensor_type: &str) -> PathInfo {
        PathInfo::new("/test-xfmr/test-sensor-groups/test-sensor-group")
            .with_var("id", id)
            .with_var("type", sensor_type)
    }

    // Scenario A from the design notes.
    #[test]
    fn sensor_key_round_trip() {
        let key = sensor_key_derive(&sensor_path("g1", "sensora_temp")).unwrap();
        assert_eq!(key, "g1|sensor_type_a_temp");

        let vars = sensor_key_recover(&key).unwrap();
        assert_eq!(vars.get("id").map(String::as_str), Some("g1"));
        assert_eq!(vars.get("type").map(String::as_str), Some("sensora_temp"));
    }

    #[test]
    fn sensor_key_derive_category_b() {
        let key = sensor_key_derive(&sensor_path("g2", "sensorb_hum")).unwrap();
        assert_eq!(key, "g2|sensor_type_b_hum");
    }

    #[test]
    fn sensor_key_derive_rejects_unknown_category() {
        let err = sensor_key_derive(&sensor_path("g1", "sensorc_x")).unwrap_err();
        assert_eq!(err, XlateError::UnsupportedCategory("sensorc_x".to_string()));
    }

    #[test]
    fn sensor_key_derive_requires_vars() {
        let path = PathInfo::new("/test-xfmr/test-sensor-groups/test-sensor-group")
            .with_var("id", "g1");
        assert_eq!(
            sensor_key_derive(&path).unwrap_err(),
            XlateError::MissingPathVariable("type")
        );
    }

    #[test]
    fn sensor_key_recover_rejects_malformed_and_unknown() {
        assert!(matches!(
            sensor_key_recover("no-delimiter").unwrap_err(),
            XlateError::MalformedKey { .. }
        ));
        assert_eq!(
            sensor_key_recover("g1|oddprefix_temp").unwrap_err(),
            XlateError::UnsupportedCategory("oddprefix_temp".to_string())
        );
    }

    #[test]
    fn test_set_key_derive_composes_suffix() {
        let path = PathInfo::new("/test-xfmr/test-sets/test-set")
            .with_var("name", "acl1")
            .with_var("type", "TEST_SET_IPV4");
        assert_eq!(test_set_key_derive(&path).unwrap(), "acl1_TEST_SET_IPV4");
    }

    #[test]
    fn test_set_key_recover_reads_discriminant_from_snapshot() {
        let mut store = MemStore::new();
        store.set_entry(TEST_SET_TABLE, "acl1_TEST_SET_IPV4", Row::with_field("type", "L3"));
        let snapshot = Snapshot::load(&store, &[TEST_SET_TABLE]).unwrap();

        let vars = test_set_key_recover("acl1_TEST_SET_IPV4", &snapshot).unwrap();
        assert_eq!(vars.get("name").map(String::as_str), Some("acl1"));
        assert_eq!(vars.get("type").map(String::as_str), Some("TEST_SET_IPV4"));
    }

    #[test]
    fn test_set_key_recover_failures_stay_distinct() {
        // Undecodable key.
        let empty = Snapshot::new();
        assert!(matches!(
            test_set_key_recover("garbage", &empty).unwrap_err(),
            XlateError::MalformedKey { .. }
        ));

        // Table absent from the snapshot.
        assert!(matches!(
            test_set_key_recover("acl1_TEST_SET_IPV4", &empty).unwrap_err(),
            XlateError::TableNotFound(_)
        ));

        // Row absent from a loaded table.
        let store = MemStore::new();
        let snapshot = Snapshot::load(&store, &[TEST_SET_TABLE]).unwrap();
        assert!(matches!(
            test_set_key_recover("acl1_TEST_SET_IPV4", &snapshot).unwrap_err(),
            XlateError::EntryNotFound { .. }
        ));
    }

    #[test]
    fn test_set_key_recover_rejects_unknown_code() {
        let mut store = MemStore::new();
        store.set_entry(TEST_SET_TABLE, "acl1_TEST_SET_IPV4", Row::with_field("type", "L2"));
        let snapshot = Snapshot::load(&store, &[TEST_SET_TABLE]).unwrap();

        assert_eq!(
            test_set_key_recover("acl1_TEST_SET_IPV4", &snapshot).unwrap_err(),
            XlateError::UnknownEnumCode("L2".to_string())
        );
    }
}
