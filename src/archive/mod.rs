//! Release archival: find built artifacts and move the stale ones aside.
//!
//! - `scanner` - lists artifacts and extracts the version from each name
//! - `mover` - relocates artifacts older than the current release

pub mod mover;
pub mod scanner;

pub use mover::{ArchiveRun, MovedArtifact, TIMESTAMP_FORMAT};
pub use scanner::{compile_pattern, extract_version, scan, scan_with, ArtifactCandidate};

/// Default artifact pattern: a trailing `-v<major>.<minor>.<patch>` before `.kpz`
pub const DEFAULT_PATTERN: &str = r"^.+-v(\d+\.\d+\.\d+)\.kpz$";

/// Default archive subdirectory, relative to the scanned directory
pub const DEFAULT_ARCHIVE_DIR: &str = "archive";
