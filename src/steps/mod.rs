// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Built-in steps
//!
//! Each built-in step takes its configuration up front and, once turned
//! into a [`Step`], runs with no input and returns a one-line description
//! of what it did.

mod artifact;
mod command;
mod env;
mod lint;

pub use artifact::{
    archive_path, build_artifact, check_artifact_target, ArtifactManifest, ManifestEntry,
    MANIFEST_FILE,
};
pub use command::{run_command, run_tests};
pub use env::{check_environment, check_tools, extract_version, parse_version};
pub use lint::check_line_lengths;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::errors::{SteplineError, SteplineResult};
use crate::pipeline::{Pipeline, Step, StepDefinition, StepKind};

/// Turn a pipeline definition into runnable steps
///
/// Steps named in `skip` are recorded as skipped in addition to the ones
/// the definition marks with `skip: true`.
pub fn build_steps<'a>(pipeline: &Pipeline, base_dir: &'a Path, skip: &[String]) -> Vec<Step<'a>> {
    pipeline
        .steps
        .iter()
        .map(|def| {
            let skipped = def.skip || skip.iter().any(|s| s == &def.name);
            build_step(def, base_dir).skipped(skipped)
        })
        .collect()
}

/// Build the runnable step for one definition
pub fn build_step<'a>(def: &StepDefinition, base_dir: &'a Path) -> Step<'a> {
    let name = def.name.clone();

    match def.kind.clone() {
        StepKind::Env { tool, min_version } => {
            Step::new(name, move || check_environment(&tool, min_version.as_deref()))
        }
        StepKind::Tools { tools } => Step::new(name, move || check_tools(&tools)),
        StepKind::Lint {
            patterns,
            max_line_length,
        } => Step::new(name, move || {
            check_line_lengths(base_dir, &patterns, max_line_length)
        }),
        StepKind::Test { command } => Step::new(name, move || run_tests(&command, base_dir)),
        StepKind::Shell { command, shell } => {
            Step::new(name, move || run_command(&shell, &command, base_dir))
        }
        StepKind::Artifact {
            patterns,
            output_dir,
            name: artifact,
        } => Step::new(name, move || {
            build_artifact(base_dir, &patterns, &output_dir, &artifact)
        }),
    }
}

/// Resolve glob patterns to a sorted, de-duplicated list of files
pub fn resolve_globs(patterns: &[String], base_dir: &Path) -> SteplineResult<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            base_dir.join(pattern).to_string_lossy().to_string()
        };

        let matches: Vec<_> = glob::glob(&full_pattern)?
            .filter_map(Result::ok)
            .filter(|p| p.is_file())
            .collect();

        if matches.is_empty() {
            return Err(SteplineError::NoInputFiles {
                pattern: pattern.to_string(),
            });
        }

        files.extend(matches);
    }

    Ok(files.into_iter().collect())
}

/// Path shown to users: relative to the base directory when possible
pub(crate) fn display_path(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
