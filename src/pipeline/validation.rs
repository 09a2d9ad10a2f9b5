// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Pipeline validation
//!
//! Validates pipeline configuration before execution.

use std::collections::HashSet;

use crate::pipeline::{Pipeline, StepDefinition, StepKind};

/// Pipeline file format versions this build understands
pub const SUPPORTED_VERSIONS: &[&str] = &["1"];

/// Pipeline validator
pub struct PipelineValidator;

impl PipelineValidator {
    /// Validate a pipeline configuration
    pub fn validate(pipeline: &Pipeline) -> ValidationResult {
        let mut result = ValidationResult::new();

        if !SUPPORTED_VERSIONS.contains(&pipeline.version.as_str()) {
            result.add_error(&format!(
                "Unsupported pipeline version '{}' (supported: {})",
                pipeline.version,
                SUPPORTED_VERSIONS.join(", ")
            ));
        }

        if pipeline.steps.is_empty() {
            result.add_error("Pipeline has no steps defined");
        }

        // Names may repeat, but the report becomes ambiguous
        let mut seen_names = HashSet::new();
        for step in &pipeline.steps {
            if !step.name.is_empty() && !seen_names.insert(step.name.as_str()) {
                result.add_warning(&format!(
                    "Duplicate step name: '{}' - report lines will be ambiguous",
                    step.name
                ));
            }
        }

        for (idx, step) in pipeline.steps.iter().enumerate() {
            Self::validate_step(idx, step, &mut result);
        }

        result
    }

    /// Validate a single step
    fn validate_step(idx: usize, step: &StepDefinition, result: &mut ValidationResult) {
        if step.name.trim().is_empty() {
            result.add_error(&format!("Step #{} has an empty name", idx + 1));
        }

        let name = &step.name;
        match &step.kind {
            StepKind::Env { tool, min_version } => {
                if tool.is_empty() {
                    result.add_error(&format!("Step '{}': Tool name is empty", name));
                }
                if let Some(min) = min_version {
                    if crate::steps::parse_version(min).is_none() {
                        result.add_error(&format!(
                            "Step '{}': Minimum version '{}' is not of the form MAJOR.MINOR[.PATCH]",
                            name, min
                        ));
                    }
                }
            }
            StepKind::Tools { tools } => {
                if tools.is_empty() {
                    result.add_warning(&format!(
                        "Step '{}': No tools listed - the check always passes",
                        name
                    ));
                }
            }
            StepKind::Lint {
                patterns,
                max_line_length,
            } => {
                Self::validate_patterns(name, patterns, result);
                if *max_line_length == 0 {
                    result.add_error(&format!(
                        "Step '{}': max_line_length must be greater than zero",
                        name
                    ));
                }
            }
            StepKind::Test { command } | StepKind::Shell { command, .. } => {
                if command.trim().is_empty() {
                    result.add_error(&format!("Step '{}': Command is empty", name));
                }
            }
            StepKind::Artifact {
                patterns,
                output_dir,
                name: artifact,
            } => {
                Self::validate_patterns(name, patterns, result);
                if let Err(reason) = crate::steps::check_artifact_target(output_dir, artifact) {
                    result.add_error(&format!("Step '{}': {}", name, reason));
                }
            }
        }
    }

    fn validate_patterns(name: &str, patterns: &[String], result: &mut ValidationResult) {
        if patterns.is_empty() {
            result.add_error(&format!("Step '{}': Pattern list is empty", name));
        }
        for pattern in patterns {
            if pattern.is_empty() {
                result.add_error(&format!("Step '{}': Input pattern is empty", name));
            } else if let Err(e) = glob::Pattern::new(pattern) {
                result.add_error(&format!(
                    "Step '{}': Invalid pattern '{}': {}",
                    name, pattern, e
                ));
            }
        }
    }
}

/// Result of pipeline validation
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    pub fn add_warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
