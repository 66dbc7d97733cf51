use anyhow::Result;
use clap::Parser;

use ktd_plugin_tools::cli::{self, Cli, Commands};
use ktd_plugin_tools::ui::{ConsoleReporter, Reporter};

fn main() {
    let args = Cli::parse();
    let reporter = ConsoleReporter;

    if let Err(e) = run(args, &reporter) {
        reporter.error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Cli, reporter: &dyn Reporter) -> Result<()> {
    match args.command {
        Commands::Bump(cmd) => {
            cli::run_bump(&cmd.into(), reporter)?;
        }
        Commands::Archive(cmd) => {
            cli::run_archive(&cmd.into(), reporter)?;
        }
        Commands::Deploy(cmd) => {
            let result = cli::run_deploy(&cmd.into(), reporter)?;
            if !result.completed.is_empty() {
                let target = if result.remote { "remote host" } else { "local container" };
                reporter.success(&format!("Plugin deployed to {}", target));
            }
        }
    }

    Ok(())
}
