use std::process::{Command, Output};

use crate::config::RemoteConfig;
use crate::error::{Result, ToolError};
use crate::ui::{format_command, Reporter};

/// Runs deploy command strings somewhere: the local shell or a remote host.
pub trait CommandRunner {
    fn run(&self, command: &str, reporter: &dyn Reporter) -> Result<()>;
}

/// Executes commands through `bash -c` with the terminal attached, so
/// `docker exec -ti` keeps its tty.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalShell;

impl CommandRunner for LocalShell {
    fn run(&self, command: &str, reporter: &dyn Reporter) -> Result<()> {
        reporter.status(&format_command(command));

        let status = Command::new("bash")
            .arg("-c")
            .arg(command)
            .status()
            .map_err(|e| ToolError::command(command, format!("failed to spawn bash: {}", e)))?;

        if !status.success() {
            return Err(ToolError::command(
                command,
                format!("exited with code {}", status.code().unwrap_or(-1)),
            ));
        }

        Ok(())
    }
}

/// Where remote commands go and how to authenticate.
///
/// `destination` is either `user@host` or an ssh config `Host` alias. Host key
/// checking is left to the system `ssh` and its known_hosts file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub destination: String,
    pub port: Option<u16>,
    pub identity_file: Option<String>,
}

impl RemoteTarget {
    /// Resolve a target from remote settings.
    ///
    /// An ssh config alias wins over explicit host and user.
    pub fn from_config(remote: &RemoteConfig) -> Result<Self> {
        let destination = match (&remote.config_host, &remote.host, &remote.user) {
            (Some(alias), _, _) if !alias.is_empty() => alias.clone(),
            (_, Some(host), Some(user)) if !host.is_empty() && !user.is_empty() => {
                format!("{}@{}", user, host)
            }
            _ => {
                return Err(ToolError::config(
                    "remote deploy needs an ssh config host, or both ssh host and username",
                ))
            }
        };

        Ok(RemoteTarget {
            destination,
            port: remote.port,
            identity_file: remote.identity_file.clone(),
        })
    }

    /// Arguments for `ssh` running `command` on this target
    pub fn ssh_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(port) = self.port {
            args.push("-p".to_string());
            args.push(port.to_string());
        }
        if let Some(key) = &self.identity_file {
            args.push("-i".to_string());
            args.push(key.clone());
        }
        args.push(self.destination.clone());
        args.push(command.to_string());
        args
    }

    /// Arguments for `scp` copying `local` recursively to `remote_path`
    pub fn scp_args(&self, local: &str, remote_path: &str) -> Vec<String> {
        let mut args = vec!["-r".to_string()];
        if let Some(port) = self.port {
            args.push("-P".to_string());
            args.push(port.to_string());
        }
        if let Some(key) = &self.identity_file {
            args.push("-i".to_string());
            args.push(key.clone());
        }
        args.push(local.to_string());
        args.push(format!("{}:{}", self.destination, remote_path));
        args
    }
}

/// Executes commands on a remote host through the system `ssh` binary.
#[derive(Debug, Clone)]
pub struct RemoteShell {
    target: RemoteTarget,
}

impl RemoteShell {
    pub fn new(target: RemoteTarget) -> Self {
        RemoteShell { target }
    }

    pub fn target(&self) -> &RemoteTarget {
        &self.target
    }

    /// Copies `local` (file or directory) to `remote_path` with `scp -r`.
    pub fn upload(&self, local: &str, remote_path: &str, reporter: &dyn Reporter) -> Result<()> {
        let args = self.target.scp_args(local, remote_path);
        let display = format!("scp {}", args.join(" "));
        reporter.status(&format_command(&display));

        let output = Command::new("scp")
            .args(&args)
            .output()
            .map_err(|e| ToolError::command(&display, format!("failed to spawn scp: {}", e)))?;
        check_output(&display, &output, reporter)
    }
}

impl CommandRunner for RemoteShell {
    fn run(&self, command: &str, reporter: &dyn Reporter) -> Result<()> {
        reporter.status(&format_command(&format!(
            "{} (on {})",
            command, self.target.destination
        )));

        let output = Command::new("ssh")
            .args(self.target.ssh_args(command))
            .output()
            .map_err(|e| ToolError::command(command, format!("failed to spawn ssh: {}", e)))?;
        check_output(command, &output, reporter)
    }
}

fn check_output(command: &str, output: &Output, reporter: &dyn Reporter) -> Result<()> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        return Err(ToolError::command(
            command,
            format!(
                "exited with code {}\nStdout: {}\nStderr: {}",
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            ),
        ));
    }

    reporter.output(&stdout);
    reporter.output(&stderr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemoryReporter;

    fn remote(host: Option<&str>, user: Option<&str>, alias: Option<&str>) -> RemoteConfig {
        RemoteConfig {
            host: host.map(str::to_string),
            user: user.map(str::to_string),
            config_host: alias.map(str::to_string),
            ..RemoteConfig::default()
        }
    }

    #[test]
    fn test_local_shell_success() {
        let reporter = MemoryReporter::new();
        assert!(LocalShell.run("true", &reporter).is_ok());
        assert_eq!(reporter.records().len(), 1);
    }

    #[test]
    fn test_local_shell_failure_reports_exit_code() {
        let err = LocalShell
            .run("exit 3", &MemoryReporter::new())
            .unwrap_err();
        assert!(matches!(err, ToolError::Command { .. }));
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[test]
    fn test_local_shell_unknown_command_fails() {
        assert!(LocalShell
            .run("definitely_not_a_real_command_ktd", &MemoryReporter::new())
            .is_err());
    }

    #[test]
    fn test_target_from_user_and_host() {
        let target = RemoteTarget::from_config(&remote(Some("koha.test"), Some("dev"), None)).unwrap();
        assert_eq!(target.destination, "dev@koha.test");
    }

    #[test]
    fn test_target_prefers_ssh_config_alias() {
        let target =
            RemoteTarget::from_config(&remote(Some("koha.test"), Some("dev"), Some("kohabox")))
                .unwrap();
        assert_eq!(target.destination, "kohabox");
    }

    #[test]
    fn test_target_requires_user() {
        let err = RemoteTarget::from_config(&remote(Some("koha.test"), None, None)).unwrap_err();
        assert!(matches!(err, ToolError::Config(_)));
    }

    #[test]
    fn test_ssh_args() {
        let target = RemoteTarget {
            destination: "dev@koha.test".to_string(),
            port: Some(2222),
            identity_file: Some("/home/dev/.ssh/id_ed25519".to_string()),
        };
        assert_eq!(
            target.ssh_args("docker ps"),
            vec![
                "-p",
                "2222",
                "-i",
                "/home/dev/.ssh/id_ed25519",
                "dev@koha.test",
                "docker ps"
            ]
        );
    }

    #[test]
    fn test_scp_args_without_port_or_key() {
        let target = RemoteTarget {
            destination: "kohabox".to_string(),
            port: None,
            identity_file: None,
        };
        assert_eq!(
            target.scp_args("Koha", "/tmp/Koha"),
            vec!["-r", "Koha", "kohabox:/tmp/Koha"]
        );
    }
}
