use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::MetricsOutput;
use crate::error::PersistError;

const INDENT: &[u8] = b"    ";

/// Write `metrics` as 4-space indented JSON to `output.output_dir/output.filename`.
///
/// The directory is created when missing and an existing file is replaced.
/// Returns the path written.
pub fn save_metrics<T>(metrics: &T, output: &MetricsOutput) -> Result<PathBuf, PersistError>
where
    T: Serialize + ?Sized,
{
    fs::create_dir_all(&output.output_dir).map_err(|source| PersistError::CreateDir {
        path: output.output_dir.clone(),
        source,
    })?;

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    metrics.serialize(&mut serializer)?;

    let path = output.path();
    fs::write(&path, buf).map_err(|source| PersistError::Write {
        path: path.clone(),
        source,
    })?;
    log::info!("Saved metrics to {}", path.display());
    Ok(path)
}

/// Read a metrics file written by [`save_metrics`]. The top level must be an object.
pub fn load_metrics(path: impl AsRef<Path>) -> Result<Map<String, Value>, PersistError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}
