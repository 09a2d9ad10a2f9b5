// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for stepline.

pub mod init;
pub mod list;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use crate::pipeline::{Pipeline, DEFAULT_PIPELINE_FILE};

/// Sequential pipeline runner
///
/// Run a fixed list of steps, time each one and print a report.
#[derive(Parser, Debug)]
#[clap(
    name = "stepline",
    version,
    about = "Run pipeline steps in order and report pass/fail/skip with timings",
    long_about = None,
    after_help = "Examples:\n\
        stepline init                       Write a starter .stepline.yaml\n\
        stepline run                        Run every step and print the report\n\
        stepline run --skip \"Unit Tests\"    Record a step as skipped\n\
        stepline run --format json          Print the report as JSON\n\n\
        See 'stepline <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter pipeline file
    Init {
        /// Pipeline name (defaults to current directory name)
        name: Option<String>,

        /// Overwrite an existing pipeline file
        #[clap(short, long)]
        force: bool,
    },

    /// Run the pipeline
    Run {
        /// Pipeline file
        #[clap(short, long, default_value = DEFAULT_PIPELINE_FILE)]
        pipeline: PathBuf,

        /// Record a step as skipped instead of running it (repeatable)
        #[clap(long, value_name = "NAME")]
        skip: Vec<String>,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Append a Markdown copy of the report to this file
        #[clap(long, env = "GITHUB_STEP_SUMMARY", value_name = "PATH")]
        summary_file: Option<PathBuf>,

        /// Disable the progress spinner
        #[clap(long)]
        no_progress: bool,
    },

    /// Validate pipeline configuration
    Validate {
        /// Pipeline file to validate
        #[clap(default_value = DEFAULT_PIPELINE_FILE)]
        pipeline: PathBuf,
    },

    /// List the steps a run would execute
    List {
        /// Pipeline file
        #[clap(default_value = DEFAULT_PIPELINE_FILE)]
        pipeline: PathBuf,
    },
}

/// Output format for the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Load the pipeline at `path`
///
/// A missing file at the default location falls back to the built-in
/// pipeline; a missing file anywhere else is an error.
pub fn load_pipeline(path: &Path) -> miette::Result<Pipeline> {
    if !path.exists() && path == Path::new(DEFAULT_PIPELINE_FILE) {
        tracing::debug!("no {} found, using built-in pipeline", DEFAULT_PIPELINE_FILE);
        return Ok(Pipeline::default_for(&project_name()));
    }

    Ok(Pipeline::from_file(path)?)
}

/// Name of the current directory, used for default pipeline names
pub fn project_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|s| s.to_string_lossy().to_string()))
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "stepline",
            "run",
            "--skip",
            "Lint",
            "--skip",
            "Unit Tests",
            "--format",
            "json",
            "--summary-file",
            "summary.md",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                skip,
                format,
                summary_file,
                pipeline,
                ..
            } => {
                assert_eq!(skip, ["Lint", "Unit Tests"]);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(summary_file, Some(PathBuf::from("summary.md")));
                assert_eq!(pipeline, PathBuf::from(DEFAULT_PIPELINE_FILE));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_missing_explicit_pipeline_is_error() {
        assert!(load_pipeline(Path::new("/nonexistent/pipeline.yaml")).is_err());
    }
}
