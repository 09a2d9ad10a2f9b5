// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Environment and dependency checks

use regex::Regex;
use std::process::Command;
use std::sync::OnceLock;

use crate::errors::{SteplineError, SteplineResult};

type Version = (u64, u64, u64);

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex"))
}

fn captures_to_version(caps: &regex::Captures<'_>) -> Option<Version> {
    let part = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u64>().ok());
    Some((part(1)?, part(2)?, part(3).unwrap_or(0)))
}

/// Parse a `MAJOR.MINOR[.PATCH]` requirement
pub fn parse_version(text: &str) -> Option<Version> {
    let caps = version_regex().captures(text.trim())?;
    let whole = caps.get(0)?;
    if whole.start() != 0 || whole.end() != text.trim().len() {
        return None;
    }
    captures_to_version(&caps)
}

/// Find the first version number in a tool's `--version` output
pub fn extract_version(output: &str) -> Option<Version> {
    version_regex()
        .captures(output)
        .and_then(|caps| captures_to_version(&caps))
}

fn format_version((major, minor, patch): Version) -> String {
    format!("{}.{}.{}", major, minor, patch)
}

/// Locate `tool` on PATH and check it meets `min_version`
pub fn check_environment(tool: &str, min_version: Option<&str>) -> SteplineResult<String> {
    let path = which::which(tool).map_err(|_| SteplineError::tool_not_found(tool))?;
    tracing::debug!(tool, path = %path.display(), "found tool");

    let output = Command::new(&path)
        .arg("--version")
        .output()
        .map_err(|e| SteplineError::CommandLaunchFailed {
            command: format!("{} --version", tool),
            error: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        return Err(SteplineError::command_failed(
            &format!("{} --version", tool),
            output.status.code().unwrap_or(-1),
            &stdout,
            &stderr,
        ));
    }

    // Some tools print their version on stderr
    let found = extract_version(&stdout).or_else(|| extract_version(&stderr));

    if let Some(min) = min_version {
        let required = parse_version(min).ok_or_else(|| SteplineError::InvalidStep {
            step: tool.to_string(),
            reason: format!("'{}' is not a valid minimum version", min),
        })?;

        match found {
            Some(version) if version >= required => {}
            other => {
                return Err(SteplineError::ToolTooOld {
                    tool: tool.to_string(),
                    found: other.map(format_version).unwrap_or_else(|| "unknown".into()),
                    required: format_version(required),
                })
            }
        }
    }

    Ok(match found {
        Some(version) => format!("{} {}", tool, format_version(version)),
        None => format!("{} (unknown version)", tool),
    })
}

/// Require every listed executable to be on PATH
pub fn check_tools(tools: &[String]) -> SteplineResult<String> {
    let missing: Vec<String> = tools
        .iter()
        .filter(|tool| which::which(tool.as_str()).is_err())
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(SteplineError::MissingTools { tools: missing });
    }

    Ok(format!("{} tools verified", tools.len()))
}
