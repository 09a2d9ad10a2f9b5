// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Run command - execute the pipeline

use colored::Colorize;
use miette::Result;
use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use super::{load_pipeline, OutputFormat};
use crate::errors::SteplineError;
use crate::pipeline::{run_steps, NoopObserver, PipelineReport, PipelineValidator};
use crate::steps::build_steps;
use crate::utils::{print_error, print_warning, StepProgress};

/// Options for the run command
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub pipeline: PathBuf,
    pub skip: Vec<String>,
    pub format: OutputFormat,
    pub summary_file: Option<PathBuf>,
    pub no_progress: bool,
}

/// Run the pipeline
pub fn run(options: RunOptions, verbose: bool) -> Result<()> {
    let pipeline = load_pipeline(&options.pipeline)?;

    // Validate pipeline
    let validation = PipelineValidator::validate(&pipeline);

    if !validation.is_valid() {
        eprintln!("{}", "Pipeline validation failed:".red().bold());
        for error in &validation.errors {
            print_error(error);
        }
        return Err(miette::miette!("Pipeline configuration is invalid"));
    }

    if validation.has_warnings() && verbose {
        eprintln!("{}", "Pipeline warnings:".yellow().bold());
        for warning in &validation.warnings {
            print_warning(warning);
        }
        eprintln!();
    }

    let names = pipeline.step_names();
    for unknown in options.skip.iter().filter(|s| !names.contains(&s.as_str())) {
        print_warning(&format!("--skip '{}' does not match any step", unknown));
    }

    let working_dir = std::env::current_dir()
        .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?;

    let mut report = PipelineReport::new();
    let steps = build_steps(&pipeline, &working_dir, &options.skip);

    let all_passed = match options.format {
        OutputFormat::Text => {
            println!();
            println!(
                " Starting pipeline '{}' on {} / {}",
                pipeline.name.bold(),
                report.tool_version(),
                report.platform()
            );
            println!();

            let spinner = !options.no_progress && std::io::stdout().is_terminal();
            let mut progress = StepProgress::new(spinner);
            let all_passed = run_steps(steps, &mut report, &mut progress);

            println!();
            println!("{}", report.summary());
            all_passed
        }
        OutputFormat::Json => {
            let all_passed = run_steps(steps, &mut report, &mut NoopObserver);
            println!("{}", report.to_json()?);
            all_passed
        }
    };

    if let Some(ref path) = options.summary_file {
        append_job_summary(path, &report)?;
        if options.format == OutputFormat::Text {
            println!();
            println!("Report written to job summary: {}", path.display());
        }
    }

    if !all_passed {
        return Err(miette::miette!(
            "Pipeline failed: {} of {} steps failed",
            report.failed(),
            report.outcomes().len()
        ));
    }

    Ok(())
}

/// Append the Markdown report to a CI job summary file
pub fn append_job_summary(path: &Path, report: &PipelineReport) -> Result<(), SteplineError> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SteplineError::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

    file.write_all(report.to_markdown().as_bytes())
        .map_err(|e| SteplineError::FileWriteError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
}
