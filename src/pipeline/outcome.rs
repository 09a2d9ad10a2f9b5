// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Step outcomes
//!
//! The recorded result of running (or skipping) one step.

use serde::{Deserialize, Serialize};

/// Status of a recorded step
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pass,
    Fail,
    Skip,
}

impl StepStatus {
    /// Glyph shown in front of the step name in the summary
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Pass => "✓",
            Self::Fail => "✗",
            Self::Skip => "–",
        }
    }

    /// Uppercase status word
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Skip => "SKIP",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Outcome of a single step
///
/// Outcomes are immutable once built; the fields are read through accessors
/// so a recorded outcome cannot drift out of step with the report counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepOutcome {
    name: String,
    status: StepStatus,
    duration_ms: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl StepOutcome {
    /// A passed step and the description it returned
    pub fn passed(name: impl Into<String>, duration_ms: f64, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Pass,
            duration_ms: duration_ms.max(0.0),
            detail: Some(detail.into()),
        }
    }

    /// A failed step and its failure message
    pub fn failed(name: impl Into<String>, duration_ms: f64, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Fail,
            duration_ms: duration_ms.max(0.0),
            detail: Some(message.into()),
        }
    }

    /// A step that was never run
    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Skip,
            duration_ms: 0.0,
            detail: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> StepStatus {
        self.status
    }

    /// Elapsed time in milliseconds, `0.0` for skipped steps
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}
