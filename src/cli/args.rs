//! Command-line surface. Each subcommand converts into the matching workflow
//! arguments in [`super::orchestration`].

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::archive::DEFAULT_PATTERN;
use crate::cli::orchestration::{ArchiveArgs, BumpArgs, DeployArgs};
use crate::deploy::StepToggles;
use crate::metadata::DEFAULT_METADATA_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "ktd-plugin-tools",
    version,
    about = "A helper for Koha plugin development with koha-testing-docker"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Bump the version recorded in the metadata file
    Bump(BumpCommand),
    /// Move release artifacts older than the current version into an archive folder
    Archive(ArchiveCommand),
    /// Copy, install and restart the plugin in the Koha container
    Deploy(DeployCommand),
}

#[derive(Args, Debug)]
pub struct BumpCommand {
    #[arg(help = "Version component to bump: major, minor or patch")]
    pub kind: String,

    #[arg(short, long, default_value = DEFAULT_METADATA_FILE, help = "Metadata file holding the version")]
    pub metadata: PathBuf,
}

impl From<BumpCommand> for BumpArgs {
    fn from(cmd: BumpCommand) -> Self {
        BumpArgs {
            metadata_path: cmd.metadata,
            kind: cmd.kind,
        }
    }
}

#[derive(Args, Debug)]
pub struct ArchiveCommand {
    #[arg(short, long, default_value = DEFAULT_METADATA_FILE, help = "Metadata file holding the version")]
    pub metadata: PathBuf,

    #[arg(short, long, default_value = ".", help = "Directory scanned for release artifacts")]
    pub dir: PathBuf,

    #[arg(long, help = "Archive directory [default: <dir>/archive]")]
    pub archive_dir: Option<PathBuf>,

    #[arg(short, long, default_value = DEFAULT_PATTERN, help = "Artifact file pattern with one capturing group for the version")]
    pub pattern: String,
}

impl From<ArchiveCommand> for ArchiveArgs {
    fn from(cmd: ArchiveCommand) -> Self {
        ArchiveArgs {
            metadata_path: cmd.metadata,
            directory: cmd.dir,
            archive_dir: cmd.archive_dir,
            pattern: cmd.pattern,
        }
    }
}

#[derive(Args, Debug)]
pub struct DeployCommand {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        help = "Dotenv-style file with deploy settings [default: remote.env when present]"
    )]
    pub env_file: Option<PathBuf>,

    #[arg(long, help = "Skip the copy step")]
    pub no_copy: bool,

    #[arg(long, help = "Skip the install step")]
    pub no_install: bool,

    #[arg(long, help = "Skip the restart step")]
    pub no_restart: bool,

    #[arg(long, env = "COPY_COMMAND", help = "Copy command")]
    pub copy_cmd: Option<String>,

    #[arg(long, env = "INSTALL_COMMAND", help = "Install command")]
    pub install_cmd: Option<String>,

    #[arg(long, env = "RESTART_COMMAND", help = "Restart command")]
    pub restart_cmd: Option<String>,

    #[arg(long, help = "Execute commands on the remote host over ssh")]
    pub remote: bool,

    #[arg(long, env = "REMOTE_SSH_HOST", help = "The SSH host")]
    pub ssh_host: Option<String>,

    #[arg(long, env = "REMOTE_SSH_PORT", help = "The SSH port")]
    pub ssh_port: Option<u16>,

    #[arg(long, env = "REMOTE_SSH_USER", help = "The SSH username")]
    pub username: Option<String>,

    #[arg(long, env = "REMOTE_SSH_KEY_PATH", help = "The path to the SSH private key")]
    pub private_key: Option<String>,

    #[arg(long, env = "REMOTE_SSH_CONF", help = "Host alias from the SSH client config")]
    pub ssh_config_host: Option<String>,
}

impl From<DeployCommand> for DeployArgs {
    fn from(cmd: DeployCommand) -> Self {
        DeployArgs {
            config_path: cmd.config,
            env_file: cmd.env_file,
            toggles: StepToggles {
                copy: !cmd.no_copy,
                install: !cmd.no_install,
                restart: !cmd.no_restart,
            },
            remote: cmd.remote,
            copy_command: cmd.copy_cmd,
            install_command: cmd.install_cmd,
            restart_command: cmd.restart_cmd,
            ssh_host: cmd.ssh_host,
            ssh_port: cmd.ssh_port,
            username: cmd.username,
            private_key: cmd.private_key,
            ssh_config_host: cmd.ssh_config_host,
        }
    }
}
