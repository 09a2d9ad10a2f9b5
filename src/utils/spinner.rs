// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Progress indicators for running steps

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::pipeline::{StepObserver, StepOutcome, StepStatus};
use crate::utils::colors::status_marker;

/// Create a spinner for indeterminate progress
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("    {spinner:.blue} {msg} {elapsed:.dim}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Console progress for a pipeline run
///
/// Prints a line as each step starts, keeps a spinner going while it runs
/// (terminals only), and flags failures as they happen.
pub struct StepProgress {
    spinner_enabled: bool,
    spinner: Option<ProgressBar>,
}

impl StepProgress {
    pub fn new(spinner_enabled: bool) -> Self {
        Self {
            spinner_enabled,
            spinner: None,
        }
    }
}

impl StepObserver for StepProgress {
    fn on_start(&mut self, name: &str, skip: bool) {
        if skip {
            println!("  {} Skipping: {}", "–".dimmed(), name.dimmed());
            return;
        }

        println!("  {} Running: {}...", "▶".blue(), name);
        if self.spinner_enabled {
            self.spinner = Some(create_spinner(name));
        }
    }

    fn on_finish(&mut self, outcome: &StepOutcome) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }

        if outcome.status() == StepStatus::Fail {
            println!(
                "  {} FAILED: {} - pipeline continuing to collect full report",
                status_marker(outcome.status()),
                outcome.name().bold()
            );
            println!();
        }
    }
}
