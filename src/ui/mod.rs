//! User-facing output.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - The [`Reporter`] capability passed into workflows

use std::cell::RefCell;
use std::path::{Path, PathBuf};

pub mod formatter;

pub use formatter::{
    format_bump, format_command, format_error, format_move, format_status, format_success,
    format_warning,
};

/// Sink for operator-visible messages.
///
/// Workflows and the archive mover only talk to this trait, so the output
/// channel can be swapped (terminal, tests, a log file).
pub trait Reporter {
    fn status(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);

    /// A file was relocated by an archive run.
    fn moved(&self, file_name: &str, destination: &Path);

    /// Raw output relayed from a child process.
    fn output(&self, text: &str);
}

/// Colored terminal output: stdout for progress, stderr for problems.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn status(&self, message: &str) {
        println!("{}", format_status(message));
    }

    fn success(&self, message: &str) {
        println!("{}", format_success(message));
    }

    fn warning(&self, message: &str) {
        eprintln!("{}", format_warning(message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", format_error(message));
    }

    fn moved(&self, file_name: &str, destination: &Path) {
        println!("{}", format_move(file_name, destination));
    }

    fn output(&self, text: &str) {
        if !text.is_empty() {
            print!("{}", text);
            if !text.ends_with('\n') {
                println!();
            }
        }
    }
}

/// One message captured by [`MemoryReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Status(String),
    Success(String),
    Warning(String),
    Error(String),
    Moved { file_name: String, destination: PathBuf },
    Output(String),
}

/// Keeps every message in memory instead of printing it.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: RefCell<Vec<Record>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.borrow().clone()
    }

    /// Only the archive move records, in order.
    pub fn moves(&self) -> Vec<(String, PathBuf)> {
        self.records
            .borrow()
            .iter()
            .filter_map(|record| match record {
                Record::Moved {
                    file_name,
                    destination,
                } => Some((file_name.clone(), destination.clone())),
                _ => None,
            })
            .collect()
    }

    fn push(&self, record: Record) {
        self.records.borrow_mut().push(record);
    }
}

impl Reporter for MemoryReporter {
    fn status(&self, message: &str) {
        self.push(Record::Status(message.to_string()));
    }

    fn success(&self, message: &str) {
        self.push(Record::Success(message.to_string()));
    }

    fn warning(&self, message: &str) {
        self.push(Record::Warning(message.to_string()));
    }

    fn error(&self, message: &str) {
        self.push(Record::Error(message.to_string()));
    }

    fn moved(&self, file_name: &str, destination: &Path) {
        self.push(Record::Moved {
            file_name: file_name.to_string(),
            destination: destination.to_path_buf(),
        });
    }

    fn output(&self, text: &str) {
        self.push(Record::Output(text.to_string()));
    }
}
