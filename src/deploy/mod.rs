//! Plugin deploy: copy, install and restart, in that order.
//!
//! - `executor` - where commands run (local shell or ssh)
//! - This module - which commands run

pub mod executor;

pub use executor::{CommandRunner, LocalShell, RemoteShell, RemoteTarget};

use std::fmt;

use crate::error::Result;
use crate::ui::Reporter;

/// Deploy steps in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployStep {
    Copy,
    Install,
    Restart,
}

impl DeployStep {
    pub fn name(&self) -> &'static str {
        match self {
            DeployStep::Copy => "copy",
            DeployStep::Install => "install",
            DeployStep::Restart => "restart",
        }
    }
}

impl fmt::Display for DeployStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which steps are switched on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepToggles {
    pub copy: bool,
    pub install: bool,
    pub restart: bool,
}

impl Default for StepToggles {
    fn default() -> Self {
        StepToggles {
            copy: true,
            install: true,
            restart: true,
        }
    }
}

/// The commands a deploy will run, already filtered and ordered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeployPlan {
    steps: Vec<(DeployStep, String)>,
}

impl DeployPlan {
    /// Builds the plan from the three commands. Disabled steps and empty
    /// commands are left out.
    pub fn new(toggles: StepToggles, copy: &str, install: &str, restart: &str) -> Self {
        let steps = [
            (DeployStep::Copy, toggles.copy, copy),
            (DeployStep::Install, toggles.install, install),
            (DeployStep::Restart, toggles.restart, restart),
        ]
        .into_iter()
        .filter(|(_, enabled, command)| *enabled && !command.trim().is_empty())
        .map(|(step, _, command)| (step, command.to_string()))
        .collect();

        DeployPlan { steps }
    }

    pub fn steps(&self) -> &[(DeployStep, String)] {
        &self.steps
    }

    pub fn contains(&self, step: DeployStep) -> bool {
        self.steps.iter().any(|(s, _)| *s == step)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Runs every step through `runner`, stopping at the first failure.
    ///
    /// # Returns
    /// * `Ok(steps)` - the steps that ran
    /// * `Err(Command)` - the failing step's error
    pub fn execute(&self, runner: &dyn CommandRunner, reporter: &dyn Reporter) -> Result<Vec<DeployStep>> {
        let mut completed = Vec::new();
        for (step, command) in &self.steps {
            runner.run(command, reporter)?;
            reporter.success(&format!("{} step finished", step));
            completed.push(*step);
        }
        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::ui::MemoryReporter;
    use std::cell::RefCell;

    /// Records commands instead of running them; fails on the configured one.
    #[derive(Default)]
    struct RecordingRunner {
        ran: RefCell<Vec<String>>,
        fail_on: Option<String>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&self, command: &str, _reporter: &dyn Reporter) -> Result<()> {
            if self.fail_on.as_deref() == Some(command) {
                return Err(ToolError::command(command, "exited with code 1"));
            }
            self.ran.borrow_mut().push(command.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_all_steps_run_in_order() {
        let plan = DeployPlan::new(StepToggles::default(), "echo copy", "echo install", "echo restart");
        let runner = RecordingRunner::default();

        let completed = plan.execute(&runner, &MemoryReporter::new()).unwrap();
        assert_eq!(
            completed,
            vec![DeployStep::Copy, DeployStep::Install, DeployStep::Restart]
        );
        assert_eq!(
            *runner.ran.borrow(),
            vec!["echo copy", "echo install", "echo restart"]
        );
    }

    #[test]
    fn test_no_steps_enabled() {
        let toggles = StepToggles {
            copy: false,
            install: false,
            restart: false,
        };
        let plan = DeployPlan::new(toggles, "echo copy", "echo install", "echo restart");
        assert!(plan.is_empty());
    }

    #[test]
    fn test_some_steps_enabled() {
        let toggles = StepToggles {
            copy: true,
            install: false,
            restart: true,
        };
        let plan = DeployPlan::new(toggles, "echo copy", "echo install", "echo restart");
        assert!(plan.contains(DeployStep::Copy));
        assert!(!plan.contains(DeployStep::Install));
        assert!(plan.contains(DeployStep::Restart));
    }

    #[test]
    fn test_empty_command_is_skipped() {
        let plan = DeployPlan::new(StepToggles::default(), "", "echo install", "  ");
        assert_eq!(
            plan.steps(),
            &[(DeployStep::Install, "echo install".to_string())]
        );
    }

    #[test]
    fn test_failure_stops_remaining_steps() {
        let plan = DeployPlan::new(StepToggles::default(), "invalid_command", "echo install", "echo restart");
        let runner = RecordingRunner {
            fail_on: Some("invalid_command".to_string()),
            ..RecordingRunner::default()
        };

        assert!(plan.execute(&runner, &MemoryReporter::new()).is_err());
        assert!(runner.ran.borrow().is_empty());
    }
}
