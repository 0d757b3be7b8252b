//! Human-readable serializations of a schema document and file output.
//!
//! The compact wire format lives in [`crate::codec`]. Here the same CoreJSON structure is
//! written as indented JSON or as YAML, which is easier to review and diff.

use crate::codec;
use crate::coreapi::Document;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a document's CoreJSON structure to YAML.
///
/// # Example
///
/// ```
/// use coreapi_from_source::coreapi::Document;
/// use coreapi_from_source::serializer::serialize_yaml;
///
/// let yaml = serialize_yaml(&Document::default().with_title("Pets")).unwrap();
/// assert!(yaml.contains("title: Pets"));
/// ```
pub fn serialize_yaml(document: &Document) -> Result<String> {
    debug!("Serializing document to YAML");
    serde_yaml::to_string(&codec::to_value(document))
        .context("Failed to serialize document to YAML")
}

/// Serializes a document's CoreJSON structure to indented JSON.
pub fn serialize_json(document: &Document) -> Result<String> {
    debug!("Serializing document to JSON");
    serde_json::to_string_pretty(&codec::to_value(document))
        .context("Failed to serialize document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if a directory or the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
