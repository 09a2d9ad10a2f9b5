// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! # stepline - Sequential Pipeline Runner
//!
//! `stepline` runs a fixed, ordered list of named steps once, measures each
//! one, and renders a pass/fail/skip report.
//!
//! ## Features
//!
//! - **Uniform step contract** - a step takes no input and returns a
//!   description or an error
//! - **Failure capture** - a failing step is recorded, never propagated;
//!   the run always reports every step
//! - **Built-in steps** - environment, tool, lint, test, shell and artifact
//!   checks driven by `.stepline.yaml`
//! - **CI friendly** - JSON output and Markdown job summaries
//!
//! ## Example
//!
//! ```
//! use stepline::pipeline::{run_step, PipelineReport};
//!
//! let mut report = PipelineReport::new();
//! let ok = run_step("lint", || Ok::<_, String>("ok".to_string()), &mut report, false);
//! let failed = run_step("test", || Err::<String, _>("x failed"), &mut report, false);
//!
//! assert!(ok && !failed);
//! assert_eq!((report.passed(), report.failed()), (1, 1));
//! println!("{}", report.summary());
//! ```

pub mod cli;
pub mod errors;
pub mod pipeline;
pub mod steps;
pub mod utils;

// Re-export commonly used types
pub use errors::{SteplineError, SteplineResult};
pub use pipeline::{run_step, run_steps, PipelineReport, Step, StepOutcome, StepStatus};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
