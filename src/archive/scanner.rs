use regex::Regex;
use std::fs;
use std::path::Path;

use crate::error::{Result, ToolError};

/// A file whose name carries a release version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCandidate {
    pub file_name: String,
    pub version: String,
}

/// Compiles an artifact pattern. It must contain exactly one capturing group,
/// which selects the version substring of a file name.
pub fn compile_pattern(pattern: &str) -> Result<Regex> {
    let regex = Regex::new(pattern).map_err(|e| ToolError::pattern(pattern, e.to_string()))?;

    // captures_len counts the implicit whole-match group
    let groups = regex.captures_len() - 1;
    if groups != 1 {
        return Err(ToolError::pattern(
            pattern,
            format!("expected exactly one capturing group, found {}", groups),
        ));
    }

    Ok(regex)
}

/// Extracts the version captured by `regex` from `file_name`.
///
/// Returns `None` when the name does not match or the group captured nothing.
pub fn extract_version(regex: &Regex, file_name: &str) -> Option<String> {
    regex
        .captures(file_name)?
        .get(1)
        .map(|m| m.as_str())
        .filter(|version| !version.is_empty())
        .map(str::to_string)
}

/// Lists the files directly inside `directory` whose names match `pattern`.
///
/// Subdirectories and names that are not valid UTF-8 are skipped. Candidates
/// are sorted by file name.
pub fn scan(directory: &Path, pattern: &str) -> Result<Vec<ArtifactCandidate>> {
    let regex = compile_pattern(pattern)?;
    scan_with(directory, &regex)
}

/// Same as [`scan`] with an already compiled pattern.
pub fn scan_with(directory: &Path, regex: &Regex) -> Result<Vec<ArtifactCandidate>> {
    let read_error = |source: std::io::Error| ToolError::DirectoryRead {
        path: directory.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(directory).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        if entry.file_type().map_err(read_error)?.is_dir() {
            continue;
        }

        let Ok(file_name) = entry.file_name().into_string() else {
            continue;
        };

        if let Some(version) = extract_version(regex, &file_name) {
            candidates.push(ArtifactCandidate { file_name, version });
        }
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}
