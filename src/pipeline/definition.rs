// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Pipeline definition structures
//!
//! Defines the schema for .stepline.yaml files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{SteplineError, SteplineResult};

/// Default pipeline file name
pub const DEFAULT_PIPELINE_FILE: &str = ".stepline.yaml";

/// Pipeline definition from .stepline.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    /// Pipeline version (for future compatibility)
    #[serde(default = "default_version")]
    pub version: String,

    /// Pipeline name
    pub name: String,

    /// Pipeline description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Steps in execution order
    pub steps: Vec<StepDefinition>,
}

fn default_version() -> String {
    "1".to_string()
}

impl Pipeline {
    /// Load pipeline from a YAML file
    pub fn from_file(path: &Path) -> SteplineResult<Self> {
        if !path.exists() {
            return Err(SteplineError::PipelineNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SteplineError::FileReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::from_yaml(&content)
    }

    /// Parse pipeline from YAML string
    pub fn from_yaml(yaml: &str) -> SteplineResult<Self> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Serialize pipeline to YAML
    pub fn to_yaml(&self) -> SteplineResult<String> {
        serde_yaml::to_string(self).map_err(Into::into)
    }

    /// Get all step names
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// The pipeline used when no definition file exists
    pub fn default_for(project: &str) -> Self {
        Self {
            version: default_version(),
            name: project.to_string(),
            description: Some("Check, lint, test and package a Rust project".into()),
            steps: vec![
                StepDefinition::new(
                    "Environment Check",
                    StepKind::Env {
                        tool: "cargo".into(),
                        min_version: None,
                    },
                ),
                StepDefinition::new(
                    "Dependency Check",
                    StepKind::Tools {
                        tools: vec!["cargo".into(), "rustc".into()],
                    },
                ),
                StepDefinition::new(
                    "Lint",
                    StepKind::Lint {
                        patterns: vec!["src/**/*.rs".into()],
                        max_line_length: default_max_line_length(),
                    },
                ),
                StepDefinition::new(
                    "Unit Tests",
                    StepKind::Test {
                        command: default_test_command(),
                    },
                ),
                StepDefinition::new(
                    "Build Artifact",
                    StepKind::Artifact {
                        patterns: vec!["src/**/*.rs".into()],
                        output_dir: default_output_dir(),
                        name: format!("{}-artifact", project),
                    },
                ),
            ],
        }
    }
}

/// A single pipeline step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Step name, shown in the report
    pub name: String,

    /// Step description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Record the step as skipped without running it
    #[serde(default, skip_serializing_if = "is_false")]
    pub skip: bool,

    /// What the step does
    pub kind: StepKind,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl StepDefinition {
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            skip: false,
            kind,
        }
    }
}

/// Built-in step kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StepKind {
    /// Locate a tool and check its version
    Env {
        tool: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_version: Option<String>,
    },

    /// Require a set of executables on PATH
    Tools { tools: Vec<String> },

    /// Check line lengths in matching files
    Lint {
        patterns: Vec<String>,
        #[serde(default = "default_max_line_length")]
        max_line_length: usize,
    },

    /// Run a test command and report its summary line
    Test {
        #[serde(default = "default_test_command")]
        command: String,
    },

    /// Run an arbitrary shell command
    Shell {
        command: String,
        #[serde(default = "default_shell")]
        shell: String,
    },

    /// Zip matching files together with a checksum manifest
    Artifact {
        patterns: Vec<String>,
        #[serde(default = "default_output_dir")]
        output_dir: PathBuf,
        name: String,
    },
}

impl StepKind {
    /// Short kind name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Env { .. } => "env",
            Self::Tools { .. } => "tools",
            Self::Lint { .. } => "lint",
            Self::Test { .. } => "test",
            Self::Shell { .. } => "shell",
            Self::Artifact { .. } => "artifact",
        }
    }
}

fn default_max_line_length() -> usize {
    120
}

fn default_test_command() -> String {
    "cargo test".to_string()
}

fn default_shell() -> String {
    "sh".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_pipeline() {
        let yaml = r#"
name: "ci"
steps:
  - name: "Lint"
    kind:
      type: lint
      patterns:
        - "src/**/*.rs"
  - name: "Unit Tests"
    skip: true
    kind:
      type: test
"#;

        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        assert_eq!(pipeline.name, "ci");
        assert_eq!(pipeline.version, "1");
        assert_eq!(pipeline.step_names(), ["Lint", "Unit Tests"]);
        assert_eq!(
            pipeline.steps[0].kind,
            StepKind::Lint {
                patterns: vec!["src/**/*.rs".into()],
                max_line_length: 120,
            }
        );
        assert!(pipeline.steps[1].skip);
        assert_eq!(
            pipeline.steps[1].kind,
            StepKind::Test {
                command: "cargo test".into()
            }
        );
    }

    #[test]
    fn test_parse_shell_step_defaults() {
        let yaml = r#"
name: "shell"
steps:
  - name: "hello"
    kind:
      type: shell
      command: "echo hello"
"#;

        let pipeline = Pipeline::from_yaml(yaml).unwrap();
        match &pipeline.steps[0].kind {
            StepKind::Shell { command, shell } => {
                assert_eq!(command, "echo hello");
                assert_eq!(shell, "sh");
            }
            other => panic!("Expected shell step, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_type_is_rejected() {
        let yaml = r#"
name: "bad"
steps:
  - name: "deploy"
    kind:
      type: kubernetes
"#;
        assert!(matches!(
            Pipeline::from_yaml(yaml),
            Err(SteplineError::Yaml { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = Pipeline::from_file(Path::new("/nonexistent/.stepline.yaml")).unwrap_err();
        assert!(matches!(err, SteplineError::PipelineNotFound { .. }));
    }

    #[test]
    fn test_default_pipeline_survives_yaml() {
        let pipeline = Pipeline::default_for("demo");
        let parsed = Pipeline::from_yaml(&pipeline.to_yaml().unwrap()).unwrap();

        assert_eq!(
            parsed.step_names(),
            [
                "Environment Check",
                "Dependency Check",
                "Lint",
                "Unit Tests",
                "Build Artifact"
            ]
        );
        assert_eq!(parsed.steps[4].kind, pipeline.steps[4].kind);
    }
}
