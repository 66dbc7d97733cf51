//! Pure formatting functions for UI output.
//!
//! Everything here builds strings; printing happens in [`super::ConsoleReporter`].

use console::style;
use std::path::Path;

use crate::domain::Bump;

/// Error line: red `ERROR:` prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

/// Success line: green check mark.
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Status line: yellow arrow.
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Warning line: yellow warning sign.
pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// One archive record, `moved <file> to <destination>`.
pub fn format_move(file_name: &str, destination: &Path) -> String {
    format!(
        "moved {} to {}",
        style(file_name).cyan(),
        style(destination.display()).green()
    )
}

/// Version transition shown after a bump.
pub fn format_bump(bump: &Bump) -> String {
    format!(
        "Version bumped: {} -> {}",
        style(&bump.previous).red(),
        style(&bump.next).green()
    )
}

/// Command about to run, local or remote.
pub fn format_command(command: &str) -> String {
    format!("Executing command: {}", style(command).blue())
}
