use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, ToolError};

/// Config file looked up in the working directory and the user config dir
pub const CONFIG_FILE_NAME: &str = "ktd-plugin-tools.toml";

/// Env file read by deploy when present
pub const DEFAULT_ENV_FILE: &str = "remote.env";

/// Represents the complete deploy configuration for ktd-plugin-tools.
///
/// Holds the three deploy commands and the connection settings used in remote mode.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_copy_command() -> String {
    "docker cp Koha koha-koha-1:/var/lib/koha/kohadev/plugins/".to_string()
}

fn default_install_command() -> String {
    "docker exec -ti koha-koha-1 /kohadevbox/koha/misc/devel/install_plugins.pl".to_string()
}

fn default_restart_command() -> String {
    "docker exec -ti koha-koha-1 bash -c 'koha-plack --restart kohadev'".to_string()
}

/// Deploy commands for a koha-testing-docker setup.
///
/// An empty command is skipped.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CommandsConfig {
    #[serde(default = "default_copy_command")]
    pub copy: String,

    #[serde(default = "default_install_command")]
    pub install: String,

    #[serde(default = "default_restart_command")]
    pub restart: String,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        CommandsConfig {
            copy: default_copy_command(),
            install: default_install_command(),
            restart: default_restart_command(),
        }
    }
}

fn default_plugin_dir() -> String {
    "Koha".to_string()
}

fn default_upload_dir() -> String {
    "/tmp/Koha".to_string()
}

fn default_remote_copy_command() -> String {
    "docker cp /tmp/Koha koha-koha-1:/var/lib/koha/kohadev/plugins/".to_string()
}

/// Connection settings for remote deploys.
///
/// Either `config_host` (a `Host` alias from the ssh client config) or both
/// `host` and `user` must be set.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub identity_file: Option<String>,

    #[serde(default)]
    pub config_host: Option<String>,

    /// Local plugin directory uploaded before the copy step
    #[serde(default = "default_plugin_dir")]
    pub plugin_dir: String,

    /// Where the plugin directory lands on the remote host
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,

    /// Copy command run on the remote host in place of `commands.copy`
    #[serde(default = "default_remote_copy_command")]
    pub copy: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            host: None,
            port: None,
            user: None,
            identity_file: None,
            config_host: None,
            plugin_dir: default_plugin_dir(),
            upload_dir: default_upload_dir(),
            copy: default_remote_copy_command(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `ktd-plugin-tools.toml` in current directory
/// 3. `ktd-plugin-tools.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err(Config)` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_path {
        return load_from(path);
    }

    let local = Path::new(CONFIG_FILE_NAME);
    if local.exists() {
        return load_from(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE_NAME);
        if user_config.exists() {
            return load_from(&user_config);
        }
    }

    Ok(Config::default())
}

impl Config {
    /// Applies the values of a dotenv-style file on top of this config.
    ///
    /// Recognized keys: `COPY_COMMAND`, `INSTALL_COMMAND`, `RESTART_COMMAND`,
    /// `REMOTE_SSH_HOST`, `REMOTE_SSH_PORT`, `REMOTE_SSH_USER`,
    /// `REMOTE_SSH_KEY_PATH`, `REMOTE_SSH_CONF`. Other keys are ignored, and
    /// an empty connection value clears the setting. `COPY_COMMAND` only sets
    /// the local copy command; remote mode keeps `[remote] copy`.
    pub fn apply_env_file(&mut self, path: &Path) -> Result<()> {
        let entries = dotenvy::from_path_iter(path).map_err(|e| {
            ToolError::config(format!("cannot read env file {}: {}", path.display(), e))
        })?;

        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                ToolError::config(format!("cannot parse env file {}: {}", path.display(), e))
            })?;
            self.apply_env_value(&key, value)?;
        }

        Ok(())
    }

    fn apply_env_value(&mut self, key: &str, value: String) -> Result<()> {
        let optional = |value: String| (!value.is_empty()).then_some(value);

        match key {
            "COPY_COMMAND" => self.commands.copy = value,
            "INSTALL_COMMAND" => self.commands.install = value,
            "RESTART_COMMAND" => self.commands.restart = value,
            "REMOTE_SSH_HOST" => self.remote.host = optional(value),
            "REMOTE_SSH_USER" => self.remote.user = optional(value),
            "REMOTE_SSH_KEY_PATH" => self.remote.identity_file = optional(value),
            "REMOTE_SSH_CONF" => self.remote.config_host = optional(value),
            "REMOTE_SSH_PORT" if value.is_empty() => self.remote.port = None,
            "REMOTE_SSH_PORT" => {
                let port = value.parse::<u16>().map_err(|_| {
                    ToolError::config(format!("REMOTE_SSH_PORT is not a port number: {}", value))
                })?;
                self.remote.port = Some(port);
            }
            _ => {}
        }

        Ok(())
    }
}

fn load_from(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        ToolError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    toml::from_str(&content)
        .map_err(|e| ToolError::config(format!("cannot parse {}: {}", path.display(), e)))
}
