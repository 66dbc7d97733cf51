//! CLI adapter: clap parsing in `args`, workflows in `orchestration`.

pub mod args;
pub mod orchestration;

pub use args::{Cli, Commands};
pub use orchestration::{
    run_archive, run_bump, run_deploy, ArchiveArgs, ArchiveSummary, BumpArgs, DeployArgs,
    DeployResult,
};
