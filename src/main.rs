// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! stepline - sequential pipeline runner
//!
//! Run a fixed list of steps, time each one and report pass/fail/skip.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stepline::cli::{run::RunOptions, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so the report owns stdout
    let default_filter = if cli.verbose {
        "stepline=debug"
    } else {
        "stepline=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    if !stepline::utils::should_use_colors() {
        colored::control::set_override(false);
    }

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Init { name, force } => stepline::cli::init::run(name, force, cli.verbose),
        Commands::Run {
            pipeline,
            skip,
            format,
            summary_file,
            no_progress,
        } => stepline::cli::run::run(
            RunOptions {
                pipeline,
                skip,
                format,
                summary_file,
                no_progress,
            },
            cli.verbose,
        ),
        Commands::Validate { pipeline } => stepline::cli::validate::run(pipeline, cli.verbose),
        Commands::List { pipeline } => stepline::cli::list::run(pipeline, cli.verbose),
    }
}
