//! Everything around the planner which touches the file system: the instance readers, the
//! stored result files and the error type of the command-line solver.
pub mod parsers;
mod result;
pub mod results_file;

use std::path::Path;

use rnmp_core::instance::Instance;

pub use crate::result::RnmpError;
pub use crate::result::RnmpResult;

/// Reads an instance, choosing the format from the extension: `.json` files are read as JSON,
/// everything else as the text format.
pub fn read_instance(path: impl AsRef<Path>) -> RnmpResult<Instance> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| RnmpError::invalid_instance(path.display()))?;
    let file = std::fs::File::open(path)?;

    let instance = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parsers::json::parse_instance(file, name)?,
        _ => parsers::text::parse_instance(file, name)?,
    };

    Ok(instance)
}
