// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Pipeline report
//!
//! Collects step outcomes in execution order and renders the final summary.

use serde::Serialize;
use std::time::Instant;

use super::outcome::{StepOutcome, StepStatus};
use crate::errors::SteplineResult;

const RULE_WIDTH: usize = 55;
const TABLE_WIDTH: usize = 47;

/// Ordered log of step outcomes for one pipeline run
#[derive(Debug)]
pub struct PipelineReport {
    tool_version: String,
    platform: String,
    started_at: Instant,
    outcomes: Vec<StepOutcome>,
}

/// Serializable view of a report, used for JSON output
#[derive(Debug, Serialize)]
pub struct ReportSnapshot<'a> {
    pub tool_version: &'a str,
    pub platform: &'a str,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_elapsed_ms: f64,
    pub steps: &'a [StepOutcome],
}

impl PipelineReport {
    /// Create a report for the running binary and platform
    pub fn new() -> Self {
        Self::with_versions(
            format!("stepline {}", crate::VERSION),
            format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        )
    }

    /// Create a report with explicit version metadata
    pub fn with_versions(tool_version: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            tool_version: tool_version.into(),
            platform: platform.into(),
            started_at: Instant::now(),
            outcomes: Vec::new(),
        }
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Append an outcome to the log
    pub fn add_outcome(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes in execution order
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    pub fn passed(&self) -> usize {
        self.count(StepStatus::Pass)
    }

    pub fn failed(&self) -> usize {
        self.count(StepStatus::Fail)
    }

    pub fn skipped(&self) -> usize {
        self.count(StepStatus::Skip)
    }

    /// True when no recorded step failed
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, status: StepStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status() == status).count()
    }

    /// Wall-clock milliseconds since the report was created
    pub fn total_elapsed_ms(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64() * 1000.0
    }

    /// Render the human-readable summary
    pub fn summary(&self) -> String {
        self.render_summary(self.total_elapsed_ms())
    }

    fn render_summary(&self, elapsed_ms: f64) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let table_rule = format!("  {}", "-".repeat(TABLE_WIDTH));

        let mut lines = vec![
            rule.clone(),
            format!(
                "  PIPELINE REPORT: {} on {}",
                self.tool_version, self.platform
            ),
            rule.clone(),
            format!("  {:<25} {:<8} {:>10}", "Stage", "Status", "Duration"),
            table_rule.clone(),
        ];

        for outcome in &self.outcomes {
            let status = outcome.status();
            lines.push(format!(
                "  {} {:<24} {:<8} {:>7.1} ms",
                status.marker(),
                outcome.name(),
                status.label(),
                outcome.duration_ms()
            ));

            if let Some(detail) = outcome.detail().filter(|d| !d.is_empty()) {
                lines.push(format!("    ↳ {}", detail));
            }
        }

        lines.push(table_rule);
        lines.push(format!(
            "  Total: {} passed, {} failed, {} skipped",
            self.passed(),
            self.failed(),
            self.skipped()
        ));
        lines.push(format!("  Pipeline duration: {:.1} ms", elapsed_ms));
        lines.push(rule);

        lines.join("\n")
    }

    /// Summary wrapped for a CI job summary page
    pub fn to_markdown(&self) -> String {
        format!("## Pipeline Report\n```\n{}\n```\n", self.summary())
    }

    pub fn snapshot(&self) -> ReportSnapshot<'_> {
        ReportSnapshot {
            tool_version: &self.tool_version,
            platform: &self.platform,
            passed: self.passed(),
            failed: self.failed(),
            skipped: self.skipped(),
            total_elapsed_ms: self.total_elapsed_ms(),
            steps: &self.outcomes,
        }
    }

    /// Report as pretty-printed JSON
    pub fn to_json(&self) -> SteplineResult<String> {
        serde_json::to_string_pretty(&self.snapshot()).map_err(Into::into)
    }
}

impl Default for PipelineReport {
    fn default() -> Self {
        Self::new()
    }
}
