// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! List command - show the steps a run would execute

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::load_pipeline;
use crate::pipeline::StepKind;
use crate::utils::print_header;

/// Run the list command
pub fn run(pipeline_path: PathBuf, verbose: bool) -> Result<()> {
    let pipeline = load_pipeline(&pipeline_path)?;

    print_header(&format!("Pipeline: {}", pipeline.name));
    if let Some(ref description) = pipeline.description {
        println!("{}", description.dimmed());
    }
    println!();

    for (i, step) in pipeline.steps.iter().enumerate() {
        print!("  {}. {} ({})", i + 1, step.name.bold(), step.kind.type_name());
        if step.skip {
            print!(" {}", "[skip]".dimmed());
        }
        println!();

        if verbose {
            if let Some(ref description) = step.description {
                println!("     {}", description.dimmed());
            }
            println!("     {}", describe(&step.kind).dimmed());
        }
    }

    Ok(())
}

fn describe(kind: &StepKind) -> String {
    match kind {
        StepKind::Env { tool, min_version } => match min_version {
            Some(min) => format!("requires {} >= {}", tool, min),
            None => format!("requires {}", tool),
        },
        StepKind::Tools { tools } => format!("requires {}", tools.join(", ")),
        StepKind::Lint {
            patterns,
            max_line_length,
        } => format!("{} (max {} chars)", patterns.join(", "), max_line_length),
        StepKind::Test { command } => command.clone(),
        StepKind::Shell { command, shell } => format!("{} -c '{}'", shell, command),
        StepKind::Artifact {
            patterns,
            output_dir,
            name,
        } => format!(
            "{} -> {}",
            patterns.join(", "),
            output_dir.join(format!("{}.zip", name)).display()
        ),
    }
}
