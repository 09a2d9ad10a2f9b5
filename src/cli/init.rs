// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Init command - write a starter pipeline file

use colored::Colorize;
use miette::Result;
use std::path::Path;

use super::project_name;
use crate::pipeline::{Pipeline, DEFAULT_PIPELINE_FILE};
use crate::utils::{print_info, print_success};

/// Run the init command
pub fn run(name: Option<String>, force: bool, verbose: bool) -> Result<()> {
    let name = name.unwrap_or_else(project_name);
    let path = Path::new(DEFAULT_PIPELINE_FILE);

    println!("{}", "Initializing stepline pipeline...".bold());
    println!();

    if path.exists() && !force {
        return Err(miette::miette!(
            "{} already exists. Use --force to overwrite.",
            DEFAULT_PIPELINE_FILE
        ));
    }

    let pipeline = Pipeline::default_for(&name);
    let content = format!(
        "# stepline pipeline - steps run in order, every run reports every step\n{}",
        pipeline.to_yaml()?
    );

    std::fs::write(path, content)
        .map_err(|e| miette::miette!("Failed to write {}: {}", DEFAULT_PIPELINE_FILE, e))?;

    print_success(&format!("Created {}", DEFAULT_PIPELINE_FILE));

    if verbose {
        for step in &pipeline.steps {
            print_info(&format!("{} ({})", step.name, step.kind.type_name()));
        }
    }

    println!();
    println!("Next steps:");
    println!("  1. Edit {} to define your steps", DEFAULT_PIPELINE_FILE.cyan());
    println!("  2. Run {} to execute the pipeline", "stepline run".cyan());
    println!();

    Ok(())
}
