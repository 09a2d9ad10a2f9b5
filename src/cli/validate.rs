// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Validate command - check pipeline configuration

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::pipeline::{Pipeline, PipelineValidator};
use crate::utils::{print_error, print_success, print_warning};

/// Run the validate command
pub fn run(pipeline_path: PathBuf, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipeline...".bold());
    println!();

    let pipeline = match Pipeline::from_file(&pipeline_path) {
        Ok(p) => p,
        Err(e) => {
            print_error("Failed to load pipeline");
            eprintln!();
            return Err(e.into());
        }
    };

    print_success("Pipeline file is valid YAML");

    let validation = PipelineValidator::validate(&pipeline);

    if !validation.errors.is_empty() {
        println!();
        println!("{}:", "Errors".red().bold());
        for error in &validation.errors {
            print_error(error);
        }
    }

    if !validation.warnings.is_empty() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for warning in &validation.warnings {
            print_warning(warning);
        }
    }

    if verbose {
        println!();
        println!("{}:", "Pipeline summary".bold());
        println!("  Name: {}", pipeline.name);
        println!("  Steps: {}", pipeline.steps.len());
        for step in &pipeline.steps {
            let skip = if step.skip { " [skip]" } else { "" };
            println!("    - {} ({}){}", step.name, step.kind.type_name(), skip.dimmed());
        }
    }

    println!();

    if !validation.is_valid() {
        return Err(miette::miette!("Pipeline validation failed"));
    }

    if validation.has_warnings() {
        println!("{}", "Pipeline is valid but has warnings.".yellow().bold());
    } else {
        println!("{}", "Pipeline is valid!".green().bold());
    }

    Ok(())
}
