//! Serialization of generated operation records to JSON or YAML.

use crate::generator::OperationRecord;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serialize records as a pretty-printed JSON array.
pub fn serialize_json(records: &[OperationRecord]) -> Result<String> {
    debug!("Serializing {} operation records to JSON", records.len());
    serde_json::to_string_pretty(records).context("Failed to serialize operation records to JSON")
}

/// Serialize records as a YAML sequence.
pub fn serialize_yaml(records: &[OperationRecord]) -> Result<String> {
    debug!("Serializing {} operation records to YAML", records.len());
    serde_yaml::to_string(records).context("Failed to serialize operation records to YAML")
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
