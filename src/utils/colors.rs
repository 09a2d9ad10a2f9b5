// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Terminal color utilities
//!
//! Provides consistent color schemes across the CLI.

use colored::Colorize;

use crate::pipeline::StepStatus;

/// Check if colors should be disabled
pub fn should_use_colors() -> bool {
    // Respect NO_COLOR environment variable
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    std::env::var_os("TERM").is_some()
}

/// Colored status marker for progress lines
pub fn status_marker(status: StepStatus) -> colored::ColoredString {
    match status {
        StepStatus::Pass => status.marker().green(),
        StepStatus::Fail => status.marker().red(),
        StepStatus::Skip => status.marker().dimmed(),
    }
}

/// Print a styled header
pub fn print_header(title: &str) {
    println!("{}", title.bold());
    println!("{}", "═".repeat(title.chars().count().max(40)));
}

/// Print a success check
pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green(), msg);
}

/// Print an error cross
pub fn print_error(msg: &str) {
    eprintln!("  {} {}", "✗".red(), msg);
}

/// Print a warning
pub fn print_warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg);
}

/// Print an info item
pub fn print_info(msg: &str) {
    println!("  {} {}", "→".blue(), msg);
}
