// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Shell command and test-suite steps

use std::path::Path;
use std::process::Command;

use crate::errors::{SteplineError, SteplineResult};

const TEST_SHELL: &str = "sh";

/// Captured output of a successful command
struct CommandOutput {
    stdout: String,
    stderr: String,
}

fn run_in_shell(shell: &str, command: &str, working_dir: &Path) -> SteplineResult<CommandOutput> {
    tracing::debug!(shell, command, "running command");

    let output = Command::new(shell)
        .arg("-c")
        .arg(command)
        .current_dir(working_dir)
        .output()
        .map_err(|e| SteplineError::CommandLaunchFailed {
            command: command.to_string(),
            error: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        let exit_code = output.status.code().unwrap_or(-1);
        return Err(SteplineError::command_failed(command, exit_code, &stdout, &stderr));
    }

    Ok(CommandOutput { stdout, stderr })
}

/// Run a test command and return its result line
///
/// The description is the last output line mentioning `passed` or
/// `failed`, which covers both cargo's `test result:` line and pytest's
/// closing summary.
pub fn run_tests(command: &str, working_dir: &Path) -> SteplineResult<String> {
    let output = run_in_shell(TEST_SHELL, command, working_dir)?;

    let summary = output
        .stdout
        .lines()
        .chain(output.stderr.lines())
        .filter(|line| line.contains("passed") || line.contains("failed"))
        .last()
        .map(|line| line.trim().to_string())
        .unwrap_or_else(|| "tests ran".to_string());

    Ok(summary)
}

/// Run a shell command and return the last line it printed
pub fn run_command(shell: &str, command: &str, working_dir: &Path) -> SteplineResult<String> {
    let output = run_in_shell(shell, command, working_dir)?;

    Ok(output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .unwrap_or("command succeeded")
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_returns_last_line() {
        let detail = run_command("sh", "echo first; echo last; echo", Path::new(".")).unwrap();
        assert_eq!(detail, "last");
    }

    #[test]
    fn test_silent_command() {
        let detail = run_command("sh", "true", Path::new(".")).unwrap();
        assert_eq!(detail, "command succeeded");
    }

    #[test]
    fn test_failing_command_captures_output() {
        let err = run_command("sh", "echo oops >&2; exit 2", Path::new(".")).unwrap_err();
        match err {
            SteplineError::CommandFailed {
                exit_code, output, ..
            } => {
                assert_eq!(exit_code, 2);
                assert_eq!(output, "oops");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_runs_in_working_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker.txt"), "").unwrap();
        let detail = run_command("sh", "ls", temp_dir.path()).unwrap();
        assert_eq!(detail, "marker.txt");
    }

    #[test]
    fn test_tests_summary_line() {
        let detail = run_tests(
            "echo 'running 3 tests'; echo 'test result: ok. 3 passed; 0 failed'",
            Path::new("."),
        )
        .unwrap();
        assert_eq!(detail, "test result: ok. 3 passed; 0 failed");
    }

    #[test]
    fn test_tests_without_summary() {
        assert_eq!(run_tests("echo done", Path::new(".")).unwrap(), "tests ran");
    }

    #[test]
    fn test_failing_tests() {
        let err = run_tests("echo '1 failed'; exit 101", Path::new(".")).unwrap_err();
        assert!(err.to_string().contains("1 failed"));
    }
}
