//! Output encodings for Swagger documents.
//!
//! The JSON route answers with [`serialize_json`]; the command-line tool can also emit
//! YAML and write either encoding to disk.

use crate::swagger_builder::SwaggerDocument;
use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::Path;

/// Serializes a Swagger document to YAML.
///
/// Key order follows the document: paths appear in the order the routes were walked.
pub fn serialize_yaml(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize Swagger document to YAML")
}

/// Serializes a Swagger document to pretty-printed JSON.
///
/// # Example
///
/// ```
/// use route_swagger::swagger_builder::assemble;
/// use route_swagger::serializer::serialize_json;
///
/// let doc = assemble(&[], "/documentation", "/documentation/json");
/// let json = serialize_json(&doc).unwrap();
/// assert!(json.contains("\"swagger\": \"2.0\""));
/// ```
pub fn serialize_json(doc: &SwaggerDocument) -> Result<String> {
    debug!("Serializing Swagger document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize Swagger document to JSON")
}

/// Writes `content` to `path`, creating missing parent directories.
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
