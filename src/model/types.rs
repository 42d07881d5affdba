//! Enumeration bridges
//!
//! Each closed enumeration is driven by one authoritative entry table;
//! every forward and reverse lookup goes through that table. Reverse
//! lookups return `Option` — `None` is the explicit "unknown" sentinel and
//! is never silently aliased to a declared member.

use serde::{Deserialize, Serialize};

/// Rule-set type, the discriminant of the test-set relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TestSetType {
    /// IPv4 rule set
    Ipv4,
    /// IPv6 rule set
    Ipv6,
}

/// One entry of the test-set type table
struct TestSetTypeEntry {
    value: TestSetType,
    /// Tree-side symbolic name
    name: &'static str,
    /// Store-side code stored in the `type` field
    code: &'static str,
    /// Row-key suffix for suffix-anchored test-set keys
    suffix: &'static str,
}

/// The single authoritative mapping for [`TestSetType`]
const TEST_SET_TYPES: &[TestSetTypeEntry] = &[
    TestSetTypeEntry {
        value: TestSetType::Ipv4,
        name: "TEST_SET_IPV4",
        code: "L3",
        suffix: "TEST_SET_IPV4",
    },
    TestSetTypeEntry {
        value: TestSetType::Ipv6,
        name: "TEST_SET_IPV6",
        code: "L3V6",
        suffix: "TEST_SET_IPV6",
    },
];

impl TestSetType {
    /// All declared members, in declaration order
    pub fn all() -> impl Iterator<Item = TestSetType> {
        TEST_SET_TYPES.iter().map(|entry| entry.value)
    }

    fn entry(self) -> &'static TestSetTypeEntry {
        TEST_SET_TYPES
            .iter()
            .find(|entry| entry.value == self)
            .unwrap_or_else(|| unreachable!("every member has a table entry"))
    }

    /// Tree-side symbolic name
    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Store-side code written to the `type` field
    pub fn store_code(self) -> &'static str {
        self.entry().code
    }

    /// Row-key suffix for this type
    pub fn key_suffix(self) -> &'static str {
        self.entry().suffix
    }

    /// All recognized row-key suffixes, in declaration order
    pub fn key_suffixes() -> Vec<&'static str> {
        TEST_SET_TYPES.iter().map(|entry| entry.suffix).collect()
    }

    /// Look up by tree-side symbolic name
    pub fn from_name(name: &str) -> Option<TestSetType> {
        TEST_SET_TYPES
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value)
    }

    /// Look up by store-side code; `None` means unknown, not a default
    pub fn from_store_code(code: &str) -> Option<TestSetType> {
        TEST_SET_TYPES
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.value)
    }

    /// Look up by row-key suffix
    pub fn from_key_suffix(suffix: &str) -> Option<TestSetType> {
        TEST_SET_TYPES
            .iter()
            .find(|entry| entry.suffix == suffix)
            .map(|entry| entry.value)
    }
}

/// Sensor category, the discriminant selecting among sensor tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorCategory {
    /// Category A sensors
    A,
    /// Category B sensors
    B,
}

/// One entry of the sensor category table
struct SensorCategoryEntry {
    value: SensorCategory,
    /// Prefix carried by the tree-side `type` path variable
    path_prefix: &'static str,
    /// Canonical store-side prefix in row keys
    store_prefix: &'static str,
    /// Store table holding this category's rows
    table: &'static str,
}

/// The single authoritative mapping for [`SensorCategory`]
const SENSOR_CATEGORIES: &[SensorCategoryEntry] = &[
    SensorCategoryEntry {
        value: SensorCategory::A,
        path_prefix: "sensora_",
        store_prefix: "sensor_type_a_",
        table: "TEST_SENSOR_A_TABLE",
    },
    SensorCategoryEntry {
        value: SensorCategory::B,
        path_prefix: "sensorb_",
        store_prefix: "sensor_type_b_",
        table: "TEST_SENSOR_B_TABLE",
    },
];

impl SensorCategory {
    fn entry(self) -> &'static SensorCategoryEntry {
        SENSOR_CATEGORIES
            .iter()
            .find(|entry| entry.value == self)
            .unwrap_or_else(|| unreachable!("every member has a table entry"))
    }

    /// Tree-side prefix of this category's `type` path variable
    pub fn path_prefix(self) -> &'static str {
        self.entry().path_prefix
    }

    /// Canonical store-side key prefix
    pub fn store_prefix(self) -> &'static str {
        self.entry().store_prefix
    }

    /// Store table holding this category's rows
    pub fn table(self) -> &'static str {
        self.entry().table
    }

    /// Classify a tree-side `type` path variable by its prefix
    pub fn from_path_type(sensor_type: &str) -> Option<SensorCategory> {
        SENSOR_CATEGORIES
            .iter()
            .find(|entry| sensor_type.starts_with(entry.path_prefix))
            .map(|entry| entry.value)
    }

    /// Classify a store-side key component by its prefix
    pub fn from_store_component(component: &str) -> Option<SensorCategory> {
        SENSOR_CATEGORIES
            .iter()
            .find(|entry| component.starts_with(entry.store_prefix))
            .map(|entry| entry.value)
    }

    /// Every category table, in declaration order
    pub fn all_tables() -> Vec<&'static str> {
        SENSOR_CATEGORIES.iter().map(|entry| entry.table).collect()
    }
}
