//! Release metadata stored in a JSON manifest (`package.json` by convention).
//!
//! The manifest is shared with other tooling, so writes go through
//! [`patch_document`]: only the keys present in the patch change, every other
//! key keeps its value and position.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{Result, ToolError};

/// Default manifest file name, resolved against the working directory
pub const DEFAULT_METADATA_FILE: &str = "package.json";

/// The fields of the manifest this tool owns, plus everything else untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseMetadata {
    pub version: String,
    pub previous_version: Option<String>,
    pub extra: Map<String, Value>,
}

/// Typed patch for the two owned keys
#[derive(Debug, Serialize)]
struct VersionPatch<'a> {
    version: &'a str,
    previous_version: &'a str,
}

/// Reads the manifest at `path`.
///
/// # Returns
/// * `Ok(ReleaseMetadata)` - `version` is present and a string
/// * `Err(NotFound)` - `path` does not exist
/// * `Err(Parse)` - invalid JSON, not an object, or `version` missing
pub fn read(path: &Path) -> Result<ReleaseMetadata> {
    let mut document = read_document(path)?;

    let version = match document.remove("version") {
        Some(Value::String(version)) => version,
        Some(_) => return Err(ToolError::parse(path, "`version` is not a string")),
        None => return Err(ToolError::parse(path, "missing `version` field")),
    };

    let previous_version = match document.remove("previous_version") {
        Some(Value::String(previous)) => Some(previous),
        Some(Value::Null) | None => None,
        Some(_) => {
            return Err(ToolError::parse(
                path,
                "`previous_version` is not a string",
            ))
        }
    };

    Ok(ReleaseMetadata {
        version,
        previous_version,
        extra: document,
    })
}

/// Records a new `version` and its `previous_version` in the manifest at `path`.
pub fn write(path: &Path, version: &str, previous_version: &str) -> Result<()> {
    patch_document(
        path,
        &VersionPatch {
            version,
            previous_version,
        },
    )
}

/// Re-reads the JSON object at `path`, overwrites the keys `patch` serializes
/// to, and writes the whole object back with two-space indentation.
///
/// `patch` must serialize to a JSON object.
pub fn patch_document<P: Serialize>(path: &Path, patch: &P) -> Result<()> {
    let mut document = read_document(path)?;

    let patch = match serde_json::to_value(patch) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Err(ToolError::parse(path, "patch is not a JSON object")),
        Err(e) => return Err(ToolError::parse(path, e.to_string())),
    };

    for (key, value) in patch {
        document.insert(key, value);
    }

    let mut rendered = serde_json::to_string_pretty(&Value::Object(document))
        .map_err(|e| ToolError::parse(path, e.to_string()))?;
    rendered.push('\n');

    fs::write(path, rendered).map_err(|source| ToolError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ToolError::NotFound(path.to_path_buf()),
        _ => ToolError::parse(path, e.to_string()),
    })?;

    match serde_json::from_str(&content) {
        Ok(Value::Object(document)) => Ok(document),
        Ok(_) => Err(ToolError::parse(path, "top-level value is not an object")),
        Err(e) => Err(ToolError::parse(path, e.to_string())),
    }
}
