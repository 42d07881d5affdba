//! Subscription descriptor
//!
//! Tells the host's change-notification subsystem what, if anything, can
//! be watched directly for a subtree. The port-binding subtree is derived
//! from the relation table, so there is no table of its own to watch.

use log::debug;

use crate::error::Result;
use crate::path::PathInfo;

/// What the host may watch for a subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscribeInfo {
    /// The subtree has no directly observable table
    pub virtual_table: bool,
    /// Table to watch when one exists directly
    pub table: Option<String>,
}

/// Describe the port-binding subtree to the notification subsystem
///
/// Always virtual: the host must watch the underlying relation table
/// instead of a table for this subtree.
pub fn port_bindings_subscribe(path: &PathInfo) -> Result<SubscribeInfo> {
    debug!("port_bindings_subscribe: {}", path.path());
    Ok(SubscribeInfo {
        virtual_table: true,
        table: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlate::subtree::INTERFACES_PATH;

    #[test]
    fn port_bindings_are_virtual() {
        let info = port_bindings_subscribe(&PathInfo::new(INTERFACES_PATH)).unwrap();
        assert!(info.virtual_table);
        assert_eq!(info.table, None);
    }
}
