use chrono::Local;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::scanner::ArtifactCandidate;
use crate::domain::compare_versions;
use crate::error::{Result, ToolError};
use crate::ui::Reporter;

/// Timestamp layout shared by every file of one run, e.g. `20240115153000`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// A file relocated by an archive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedArtifact {
    pub file_name: String,
    pub destination: PathBuf,
}

/// One archive invocation. Every file it moves gets the same timestamp prefix.
#[derive(Debug, Clone)]
pub struct ArchiveRun {
    timestamp: String,
}

impl ArchiveRun {
    /// Start a run stamped with the current local time
    pub fn now() -> Self {
        ArchiveRun {
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Start a run with a fixed timestamp
    pub fn with_timestamp(timestamp: impl Into<String>) -> Self {
        ArchiveRun {
            timestamp: timestamp.into(),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Name an archived file gets: `<timestamp>_<file_name>`
    pub fn archived_name(&self, file_name: &str) -> String {
        format!("{}_{}", self.timestamp, file_name)
    }

    /// Moves every candidate older than `current_version` from `source_dir`
    /// into `archive_dir`.
    ///
    /// `archive_dir` is created (with parents) before anything is moved. The
    /// first failed rename stops the run; files moved before it stay moved.
    ///
    /// # Returns
    /// * `Ok(moves)` - the files relocated, in candidate order
    /// * `Err(DirectoryCreate)` - `archive_dir` could not be created
    /// * `Err(FileMove)` - a rename failed
    pub fn execute(
        &self,
        current_version: &str,
        candidates: &[ArtifactCandidate],
        source_dir: &Path,
        archive_dir: &Path,
        reporter: &dyn Reporter,
    ) -> Result<Vec<MovedArtifact>> {
        ensure_archive_dir(archive_dir)?;

        let mut moved = Vec::new();
        for candidate in candidates {
            if compare_versions(&candidate.version, current_version) != Ordering::Less {
                continue;
            }

            let source = source_dir.join(&candidate.file_name);
            let destination = archive_dir.join(self.archived_name(&candidate.file_name));

            fs::rename(&source, &destination).map_err(|e| ToolError::FileMove {
                from: source.clone(),
                to: destination.clone(),
                source: e,
            })?;

            reporter.moved(&candidate.file_name, &destination);
            moved.push(MovedArtifact {
                file_name: candidate.file_name.clone(),
                destination,
            });
        }

        Ok(moved)
    }
}

fn ensure_archive_dir(archive_dir: &Path) -> Result<()> {
    fs::create_dir_all(archive_dir).map_err(|source| ToolError::DirectoryCreate {
        path: archive_dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemoryReporter;
    use tempfile::TempDir;

    fn candidate(file_name: &str, version: &str) -> ArtifactCandidate {
        ArtifactCandidate {
            file_name: file_name.to_string(),
            version: version.to_string(),
        }
    }

    #[test]
    fn test_timestamp_shape() {
        let run = ArchiveRun::now();
        assert_eq!(run.timestamp().len(), 14);
        assert!(run.timestamp().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_archived_name() {
        let run = ArchiveRun::with_timestamp("20240115153000");
        assert_eq!(
            run.archived_name("plugin-v1.0.0.kpz"),
            "20240115153000_plugin-v1.0.0.kpz"
        );
    }

    #[test]
    fn test_moves_only_older_candidates() {
        let dir = TempDir::new().unwrap();
        for name in ["plugin-v1.0.0.kpz", "plugin-v2.0.0.kpz", "plugin-v3.0.0.kpz"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let archive = dir.path().join("archive");
        let candidates = vec![
            candidate("plugin-v1.0.0.kpz", "1.0.0"),
            candidate("plugin-v2.0.0.kpz", "2.0.0"),
            candidate("plugin-v3.0.0.kpz", "3.0.0"),
        ];
        let reporter = MemoryReporter::new();

        let run = ArchiveRun::with_timestamp("20240115153000");
        let moved = run
            .execute("2.0.0", &candidates, dir.path(), &archive, &reporter)
            .unwrap();

        assert_eq!(
            moved,
            vec![MovedArtifact {
                file_name: "plugin-v1.0.0.kpz".to_string(),
                destination: archive.join("20240115153000_plugin-v1.0.0.kpz"),
            }]
        );
        assert_eq!(
            fs::read_to_string(archive.join("20240115153000_plugin-v1.0.0.kpz")).unwrap(),
            "plugin-v1.0.0.kpz"
        );
        assert!(dir.path().join("plugin-v2.0.0.kpz").exists());
        assert!(dir.path().join("plugin-v3.0.0.kpz").exists());
        assert_eq!(reporter.moves().len(), 1);
    }

    #[test]
    fn test_creates_archive_dir_even_without_moves() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("nested").join("archive");

        let moved = ArchiveRun::now()
            .execute("1.0.0", &[], dir.path(), &archive, &MemoryReporter::new())
            .unwrap();

        assert!(moved.is_empty());
        assert!(archive.is_dir());
    }

    #[test]
    fn test_archive_dir_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("archive");
        fs::write(&archive, b"not a directory").unwrap();

        let result = ArchiveRun::now().execute(
            "1.0.0",
            &[candidate("plugin-v0.1.0.kpz", "0.1.0")],
            dir.path(),
            &archive,
            &MemoryReporter::new(),
        );
        assert!(matches!(result, Err(ToolError::DirectoryCreate { .. })));
    }

    #[test]
    fn test_stops_at_first_failed_move() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plugin-v0.1.0.kpz"), b"").unwrap();
        fs::write(dir.path().join("plugin-v0.3.0.kpz"), b"").unwrap();
        let archive = dir.path().join("archive");
        let candidates = vec![
            candidate("plugin-v0.1.0.kpz", "0.1.0"),
            candidate("plugin-v0.2.0.kpz", "0.2.0"),
            candidate("plugin-v0.3.0.kpz", "0.3.0"),
        ];
        let reporter = MemoryReporter::new();

        let result = ArchiveRun::with_timestamp("20240115153000").execute(
            "1.0.0",
            &candidates,
            dir.path(),
            &archive,
            &reporter,
        );

        assert!(matches!(result, Err(ToolError::FileMove { .. })));
        assert!(archive.join("20240115153000_plugin-v0.1.0.kpz").exists());
        assert!(dir.path().join("plugin-v0.3.0.kpz").exists());
        assert_eq!(reporter.moves().len(), 1);
    }

    #[test]
    fn test_malformed_versions_count_as_older() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("plugin-vX.kpz"), b"").unwrap();
        let archive = dir.path().join("archive");

        let moved = ArchiveRun::with_timestamp("20240115153000")
            .execute(
                "1.0.0",
                &[candidate("plugin-vX.kpz", "X")],
                dir.path(),
                &archive,
                &MemoryReporter::new(),
            )
            .unwrap();
        assert_eq!(moved.len(), 1);
    }
}
