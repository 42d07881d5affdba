//! Pre/post request hooks
//!
//! Invoked once per request, not per entity. The pre-hook observes the
//! resolved path; the post-hook sees the full staged write set after every
//! per-row assignment and may adjust it request-wide. Identity is the
//! built-in behavior for both.

use log::info;

use crate::error::Result;
use crate::path::PathInfo;
use crate::store::TableDataMap;

/// Observe the request before any per-field/per-key transformer runs
///
/// Takes the path by shared reference: a pre-hook must not mutate the
/// resolved variables.
pub fn pre_request(path: &PathInfo) -> Result<()> {
    info!("pre_request: request uri = {}", path.request_uri());
    Ok(())
}

/// Adjust the staged write set after all per-row assignments
///
/// The built-in behavior passes the staged data through unchanged.
pub fn post_request(path: &PathInfo, staged: &TableDataMap) -> Result<TableDataMap> {
    info!("post_request: request uri = {}", path.request_uri());
    Ok(staged.clone())
}
