// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Line-length lint

use std::path::Path;

use super::{display_path, resolve_globs};
use crate::errors::{SteplineError, SteplineResult};

/// Report every line longer than `max_line_length` characters
pub fn check_line_lengths(
    base_dir: &Path,
    patterns: &[String],
    max_line_length: usize,
) -> SteplineResult<String> {
    let files = resolve_globs(patterns, base_dir)?;
    let mut violations = Vec::new();

    for file in &files {
        let content = std::fs::read_to_string(file).map_err(|e| SteplineError::FileReadError {
            path: file.clone(),
            error: e.to_string(),
        })?;

        for (idx, line) in content.lines().enumerate() {
            let length = line.trim_end().chars().count();
            if length > max_line_length {
                violations.push(format!(
                    "{}:{} line too long ({} chars)",
                    display_path(file, base_dir),
                    idx + 1,
                    length
                ));
            }
        }
    }

    tracing::debug!(files = files.len(), violations = violations.len(), "lint finished");

    if !violations.is_empty() {
        return Err(SteplineError::LintViolations { violations });
    }

    Ok("No style violations found".to_string())
}
