//! # config-xlate
//!
//! Translation engine between a hierarchical, strongly-typed configuration
//! tree and a flat, string-keyed table store. The engine implements the
//! transformation contracts only: composite key codec, enumeration
//! bridges, key/field/table transformers, the many-to-many port-binding
//! subtree reconciliation, subscription descriptors, and per-request
//! hooks. Schema compilation, persistence, and request routing belong to
//! the host runtime, which consumes the callbacks through a
//! [`registry::TransformerSet`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod keys;
pub mod model;
pub mod path;
pub mod registry;
pub mod store;
pub mod xlate;

pub use error::{Result, XlateError};
pub use model::{TestRoot, TestSetType};
pub use path::PathInfo;
pub use registry::TransformerSet;
pub use store::{MemStore, Row, Snapshot, StoreAccessor};
pub use xlate::Operation;

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
