//! Workflow orchestration for the three commands.
//!
//! Nothing here depends on clap: each workflow takes a plain argument struct
//! and a [`Reporter`], so the engine can be driven from tests or another
//! front end.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::archive::{self, ArchiveRun, MovedArtifact};
use crate::config::{self, Config};
use crate::deploy::{DeployPlan, DeployStep, LocalShell, RemoteShell, RemoteTarget, StepToggles};
use crate::domain::{self, compare_versions, Bump};
use crate::error::Result;
use crate::metadata;
use crate::ui::{format_bump, Reporter};

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpArgs {
    /// Metadata file holding `version`
    pub metadata_path: PathBuf,

    /// `major`, `minor` or `patch`
    pub kind: String,
}

/// Reads the current version, advances it and writes both versions back.
pub fn run_bump(args: &BumpArgs, reporter: &dyn Reporter) -> Result<Bump> {
    let current = metadata::read(&args.metadata_path)?;
    let bump = domain::apply(&current.version, &args.kind)?;
    metadata::write(&args.metadata_path, &bump.next, &bump.previous)?;

    reporter.success(&format_bump(&bump));
    Ok(bump)
}

/// Arguments for the archive workflow
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveArgs {
    pub metadata_path: PathBuf,

    /// Directory scanned for artifacts
    pub directory: PathBuf,

    /// Destination; `<directory>/archive` when not set
    pub archive_dir: Option<PathBuf>,

    /// Artifact pattern with one capturing group for the version
    pub pattern: String,
}

impl Default for ArchiveArgs {
    fn default() -> Self {
        ArchiveArgs {
            metadata_path: PathBuf::from(metadata::DEFAULT_METADATA_FILE),
            directory: PathBuf::from("."),
            archive_dir: None,
            pattern: archive::DEFAULT_PATTERN.to_string(),
        }
    }
}

impl ArchiveArgs {
    pub fn resolved_archive_dir(&self) -> PathBuf {
        self.archive_dir
            .clone()
            .unwrap_or_else(|| self.directory.join(archive::DEFAULT_ARCHIVE_DIR))
    }
}

/// Result of one archive run
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveSummary {
    pub current_version: String,
    pub timestamp: String,
    pub moved: Vec<MovedArtifact>,

    /// Matching artifacts left in place because they are not older
    pub kept: usize,
}

/// Moves artifacts older than the current release into the archive directory.
///
/// The pattern is compiled and the directory listed before anything on disk
/// changes, so a bad pattern leaves the tree untouched.
pub fn run_archive(args: &ArchiveArgs, reporter: &dyn Reporter) -> Result<ArchiveSummary> {
    let current = metadata::read(&args.metadata_path)?;
    let candidates = archive::scan(&args.directory, &args.pattern)?;

    let stale = candidates
        .iter()
        .filter(|c| compare_versions(&c.version, &current.version) == Ordering::Less)
        .count();
    reporter.status(&format!(
        "Current version {}: {} of {} artifacts to archive",
        current.version,
        stale,
        candidates.len()
    ));

    let run = ArchiveRun::now();
    let archive_dir = args.resolved_archive_dir();
    let moved = run.execute(
        &current.version,
        &candidates,
        &args.directory,
        &archive_dir,
        reporter,
    )?;

    if moved.is_empty() {
        reporter.status("Nothing to archive");
    } else {
        reporter.success(&format!(
            "Archived {} artifacts to {}",
            moved.len(),
            archive_dir.display()
        ));
    }

    Ok(ArchiveSummary {
        current_version: current.version,
        timestamp: run.timestamp().to_string(),
        kept: candidates.len() - moved.len(),
        moved,
    })
}

/// Arguments for the deploy workflow. `Some` values override the config file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeployArgs {
    pub config_path: Option<PathBuf>,

    /// Dotenv-style file; `remote.env` is read when present and this is `None`
    pub env_file: Option<PathBuf>,

    pub toggles: StepToggles,
    pub remote: bool,

    pub copy_command: Option<String>,
    pub install_command: Option<String>,
    pub restart_command: Option<String>,

    pub ssh_host: Option<String>,
    pub ssh_port: Option<u16>,
    pub username: Option<String>,
    pub private_key: Option<String>,
    pub ssh_config_host: Option<String>,
}

/// Result of a deploy
#[derive(Debug, Clone, PartialEq)]
pub struct DeployResult {
    pub remote: bool,
    pub completed: Vec<DeployStep>,
}

/// Layers the deploy settings: TOML config, then the env file, then the
/// flag and environment overrides in `args`.
///
/// A copy command override only replaces the local copy command. Remote mode
/// always copies from the upload directory with `[remote] copy`.
pub fn resolve_config(args: &DeployArgs) -> Result<Config> {
    let mut config = config::load_config(args.config_path.as_deref())?;

    match &args.env_file {
        Some(path) => config.apply_env_file(path)?,
        None => {
            let default = Path::new(config::DEFAULT_ENV_FILE);
            if default.exists() {
                config.apply_env_file(default)?;
            }
        }
    }

    if let Some(copy) = &args.copy_command {
        config.commands.copy = copy.clone();
    }
    if let Some(install) = &args.install_command {
        config.commands.install = install.clone();
    }
    if let Some(restart) = &args.restart_command {
        config.commands.restart = restart.clone();
    }

    let remote = &mut config.remote;
    override_with(&mut remote.host, &args.ssh_host);
    override_with(&mut remote.user, &args.username);
    override_with(&mut remote.identity_file, &args.private_key);
    override_with(&mut remote.config_host, &args.ssh_config_host);
    if args.ssh_port.is_some() {
        remote.port = args.ssh_port;
    }

    Ok(config)
}

fn override_with(slot: &mut Option<String>, value: &Option<String>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

/// Builds the deploy plan for the chosen mode.
pub fn build_plan(args: &DeployArgs, config: &Config) -> DeployPlan {
    let copy = if args.remote {
        &config.remote.copy
    } else {
        &config.commands.copy
    };
    DeployPlan::new(
        args.toggles,
        copy,
        &config.commands.install,
        &config.commands.restart,
    )
}

/// Runs copy, install and restart locally or on the remote host.
///
/// In remote mode the plugin directory is uploaded with scp before the copy
/// step, and commands run over ssh.
pub fn run_deploy(args: &DeployArgs, reporter: &dyn Reporter) -> Result<DeployResult> {
    let config = resolve_config(args)?;
    let plan = build_plan(args, &config);

    if plan.is_empty() {
        reporter.warning("No deploy steps enabled");
        return Ok(DeployResult {
            remote: args.remote,
            completed: Vec::new(),
        });
    }

    let completed = if args.remote {
        let shell = RemoteShell::new(RemoteTarget::from_config(&config.remote)?);
        if plan.contains(DeployStep::Copy) {
            shell.upload(&config.remote.plugin_dir, &config.remote.upload_dir, reporter)?;
        }
        plan.execute(&shell, reporter)?
    } else {
        plan.execute(&LocalShell, reporter)?
    };

    Ok(DeployResult {
        remote: args.remote,
        completed,
    })
}
