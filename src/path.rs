//! Path-variable set
//!
//! URI parsing itself is the host resolver's job; this module only models
//! its output — a canonical schema path, the raw request URI, and the
//! named variables extracted from the path — read-only to transformers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Resolved path information for one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathInfo {
    path: String,
    request_uri: String,
    vars: HashMap<String, String>,
}

impl PathInfo {
    /// Create path info with no variables
    pub fn new(path: &str) -> Self {
        PathInfo {
            path: path.to_string(),
            request_uri: path.to_string(),
            vars: HashMap::new(),
        }
    }

    /// Attach the raw request URI when it differs from the canonical path
    pub fn with_request_uri(mut self, request_uri: &str) -> Self {
        self.request_uri = request_uri.to_string();
        self
    }

    /// Attach one named path variable
    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    /// Canonical schema path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw request URI
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// A named path variable, if the resolver extracted it
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether the request targets a specific list entry (keyed URI)
    pub fn targets_list_entry(&self) -> bool {
        self.request_uri.ends_with(']')
    }
}

/// Whether `target` addresses `prefix` itself or a node beneath it
pub fn is_subtree_request(target: &str, prefix: &str) -> bool {
    target == prefix || target.starts_with(&format!("{}/", prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vars_are_named_lookups() {
        let path = PathInfo::new("/test-xfmr/test-sensor-groups/test-sensor-group")
            .with_var("id", "g1")
            .with_var("type", "sensora_temp");
        assert_eq!(path.var("id"), Some("g1"));
        assert_eq!(path.var("type"), Some("sensora_temp"));
        assert_eq!(path.var("name"), None);
    }

    #[test]
    fn subtree_matching_is_segment_aware() {
        let prefix = "/test-xfmr/interfaces";
        assert!(is_subtree_request("/test-xfmr/interfaces", prefix));
        assert!(is_subtree_request("/test-xfmr/interfaces/interface", prefix));
        assert!(!is_subtree_request("/test-xfmr/interfaces-extra", prefix));
    }
}
