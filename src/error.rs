use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for ktd-plugin-tools operations
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid version format: '{0}' - expected X.Y.Z")]
    InvalidFormat(String),

    #[error("Invalid update type: '{0}' - expected major, minor or patch")]
    InvalidUpdateType(String),

    #[error("Invalid pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Failed to read directory {}", .path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create archive directory {}", .path.display())]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move {} to {}", .from.display(), .to.display())]
    FileMove {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Command `{command}` failed: {reason}")]
    Command { command: String, reason: String },
}

/// Convenience type alias for Results in ktd-plugin-tools
pub type Result<T> = std::result::Result<T, ToolError>;

impl ToolError {
    /// Create a parse error for the document at `path`
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        ToolError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Create a pattern error with context
    pub fn pattern(pattern: &str, reason: impl Into<String>) -> Self {
        ToolError::Pattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ToolError::Config(msg.into())
    }

    /// Create a command error with context
    pub fn command(command: &str, reason: impl Into<String>) -> Self {
        ToolError::Command {
            command: command.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolError::config("missing ssh host");
        assert_eq!(err.to_string(), "Configuration error: missing ssh host");
    }

    #[test]
    fn test_not_found_names_path() {
        let err = ToolError::NotFound(PathBuf::from("package.json"));
        assert_eq!(err.to_string(), "File not found: package.json");
    }

    #[test]
    fn test_version_errors_carry_offending_input() {
        assert!(ToolError::InvalidFormat("1.2".to_string())
            .to_string()
            .contains("'1.2'"));
        assert!(ToolError::InvalidUpdateType("bogus".to_string())
            .to_string()
            .contains("'bogus'"));
    }

    #[test]
    fn test_pattern_error_names_pattern() {
        let err = ToolError::pattern("(unclosed", "unclosed group");
        let msg = err.to_string();
        assert!(msg.contains("(unclosed"));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn test_file_move_error_names_both_paths() {
        let err = ToolError::FileMove {
            from: PathBuf::from("plugin-v1.0.0.kpz"),
            to: PathBuf::from("archive/20240115153000_plugin-v1.0.0.kpz"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("plugin-v1.0.0.kpz"));
        assert!(msg.contains("archive/20240115153000_plugin-v1.0.0.kpz"));
        assert!(!msg.contains("denied"));
    }

    #[test]
    fn test_io_cause_printed_once_in_chain() {
        let err = ToolError::Write {
            path: PathBuf::from("package.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let chain = format!("{:#}", anyhow::Error::from(err));
        assert_eq!(chain, "Failed to write package.json: denied");
    }

    #[test]
    fn test_io_backed_errors_expose_source() {
        use std::error::Error as _;

        let err = ToolError::DirectoryRead {
            path: PathBuf::from("/nope"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_command_error_display() {
        let err = ToolError::command("docker cp Koha x:/y", "exit status 1");
        assert_eq!(
            err.to_string(),
            "Command `docker cp Koha x:/y` failed: exit status 1"
        );
    }
}
