//! Table selector
//!
//! Decides which store tables a request touches. Reads and deletes with an
//! unresolved discriminant fan out to every candidate table; writes fail
//! closed instead of guessing.

use log::debug;

use crate::error::{Result, XlateError};
use crate::model::SensorCategory;
use crate::path::PathInfo;
use crate::xlate::Operation;

/// Select the sensor tables relevant to a request
///
/// No `id` variable means the path does not address a sensor group yet;
/// the selection is empty. A present but unrecognized `type` also selects
/// nothing — callers treat emptiness as "no applicable table", not as an
/// error.
pub fn sensor_table_select(path: &PathInfo, op: Operation) -> Result<Vec<String>> {
    let mut tables = Vec::new();

    if path.var("id").map_or(true, str::is_empty) {
        return Ok(tables);
    }

    match path.var("type").filter(|sensor_type| !sensor_type.is_empty()) {
        None => {
            if op.is_content_write() {
                return Err(XlateError::MissingPathVariable("type"));
            }
            // Fan out: the read/delete must cover every category table.
            tables.extend(SensorCategory::all_tables().iter().map(|t| t.to_string()));
        }
        Some(sensor_type) => {
            if let Some(category) = SensorCategory::from_path_type(sensor_type) {
                tables.push(category.table().to_string());
            }
        }
    }

    debug!("sensor_table_select: {:?} -> {:?}", op, tables);
    Ok(tables)
}
