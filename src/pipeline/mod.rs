// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Pipeline model
//!
//! Step outcomes, the run report, the step runner, and the definition
//! format for pipeline files.

mod definition;
mod outcome;
mod report;
mod runner;
mod validation;

pub use definition::*;
pub use outcome::{StepOutcome, StepStatus};
pub use report::{PipelineReport, ReportSnapshot};
pub use runner::{run_step, run_steps, NoopObserver, Step, StepAction, StepObserver};
pub use validation::{PipelineValidator, ValidationResult};
