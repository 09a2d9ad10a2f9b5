// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Error types
//!
//! Step failures are ordinary values of [`SteplineError`]: the step runner
//! turns them into recorded outcomes, while the CLI renders them through
//! miette with a code and, where one exists, a hint.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for stepline operations
pub type SteplineResult<T> = Result<T, SteplineError>;

/// Main error type for stepline
#[derive(Error, Debug, Diagnostic)]
pub enum SteplineError {
    // ─────────────────────────────────────────────────────────────────────────
    // Tool Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Tool '{tool}' not found")]
    #[diagnostic(code(stepline::tool_not_found), help("{suggestion}"))]
    ToolNotFound { tool: String, suggestion: String },

    #[error("{tool} {found} is older than the required {required}")]
    #[diagnostic(code(stepline::tool_too_old))]
    ToolTooOld {
        tool: String,
        found: String,
        required: String,
    },

    #[error("Missing tools: [{}]", .tools.join(", "))]
    #[diagnostic(
        code(stepline::missing_tools),
        help("Install the missing tools and ensure they are in your PATH")
    )]
    MissingTools { tools: Vec<String> },

    #[error("{output}")]
    #[diagnostic(code(stepline::command_failed))]
    CommandFailed {
        command: String,
        exit_code: i32,
        output: String,
    },

    #[error("Failed to launch '{command}': {error}")]
    #[diagnostic(code(stepline::command_launch_failed))]
    CommandLaunchFailed { command: String, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Pipeline Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Pipeline file not found: {path}")]
    #[diagnostic(
        code(stepline::pipeline_not_found),
        help("Create a pipeline with 'stepline init' or create .stepline.yaml manually")
    )]
    PipelineNotFound { path: PathBuf },

    #[error("Invalid pipeline configuration: {reason}")]
    #[diagnostic(code(stepline::invalid_pipeline))]
    InvalidPipeline {
        reason: String,
        #[help]
        help: Option<String>,
    },

    #[error("Step '{step}' is invalid: {reason}")]
    #[diagnostic(code(stepline::invalid_step))]
    InvalidStep { step: String, reason: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Step Check Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("{}", .violations.join("\n    "))]
    #[diagnostic(code(stepline::lint_violations))]
    LintViolations { violations: Vec<String> },

    #[error("No input files matched pattern: {pattern}")]
    #[diagnostic(
        code(stepline::no_input_files),
        help("Check that files matching '{pattern}' exist in your project")
    )]
    NoInputFiles { pattern: String },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{path}': {error}")]
    #[diagnostic(code(stepline::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{path}': {error}")]
    #[diagnostic(code(stepline::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(stepline::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(stepline::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(stepline::json_error))]
    Json { message: String },

    #[error("Glob pattern error: {message}")]
    #[diagnostic(code(stepline::glob_error))]
    GlobPattern { message: String },

    #[error("Archive error: {message}")]
    #[diagnostic(code(stepline::archive_error))]
    Archive { message: String },
}

impl From<std::io::Error> for SteplineError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for SteplineError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for SteplineError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}

impl From<glob::PatternError> for SteplineError {
    fn from(e: glob::PatternError) -> Self {
        Self::GlobPattern { message: e.to_string() }
    }
}

impl From<zip::result::ZipError> for SteplineError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive { message: e.to_string() }
    }
}

impl SteplineError {
    /// Create a tool not found error with installation suggestion
    pub fn tool_not_found(tool: &str) -> Self {
        let suggestion = match tool {
            "cargo" | "rustc" => "Install Rust: https://rustup.rs".to_string(),
            "git" => "Install Git: https://git-scm.com/downloads".to_string(),
            _ => format!("Install {} and ensure it's in your PATH", tool),
        };

        Self::ToolNotFound {
            tool: tool.to_string(),
            suggestion,
        }
    }

    /// Create a command failure from captured process output
    pub fn command_failed(command: &str, exit_code: i32, stdout: &str, stderr: &str) -> Self {
        let mut output = format!("{}{}", stdout, stderr).trim_end().to_string();
        if output.is_empty() {
            output = format!("'{}' exited with status {}", command, exit_code);
        }

        Self::CommandFailed {
            command: command.to_string(),
            exit_code,
            output,
        }
    }
}
