//! Tree-side model
//!
//! Typed tree nodes for the schema region this engine translates, plus the
//! enumeration bridges between tree-side values and store-side codes.

pub mod tree;
pub mod types;

pub use tree::{
    BuildEmpty, Interface, InterfaceMirror, Interfaces, IngressTestSet, IngressTestSetKey,
    IngressTestSets, TestRoot, TestSetMirror,
};
pub use types::{SensorCategory, TestSetType};
