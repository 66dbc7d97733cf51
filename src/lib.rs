pub mod archive;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod domain;
pub mod error;
pub mod metadata;
pub mod ui;

pub use error::{Result, ToolError};
