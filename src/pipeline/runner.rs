// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Step runner
//!
//! Runs steps one at a time under a uniform timing and failure-capture
//! contract. Every call appends exactly one outcome to the report, and step
//! errors never escape: they are recorded and reported through the returned
//! boolean. A panicking step counts as a failure.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use super::outcome::StepOutcome;
use super::report::PipelineReport;
use crate::errors::SteplineResult;

/// Boxed step body: takes no input, returns a description or fails
pub type StepAction<'a> = Box<dyn FnOnce() -> SteplineResult<String> + 'a>;

/// A named step ready to run
pub struct Step<'a> {
    pub name: String,
    pub skip: bool,
    action: StepAction<'a>,
}

impl<'a> Step<'a> {
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> SteplineResult<String> + 'a,
    {
        Self {
            name: name.into(),
            skip: false,
            action: Box::new(action),
        }
    }

    /// Mark the step as skipped
    pub fn skipped(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

impl std::fmt::Debug for Step<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("skip", &self.skip)
            .finish_non_exhaustive()
    }
}

/// Hooks around each step, used by the CLI for progress output
pub trait StepObserver {
    /// Called before a step runs (or is skipped)
    fn on_start(&mut self, _name: &str, _skip: bool) {}

    /// Called after the step's outcome has been recorded
    fn on_finish(&mut self, _outcome: &StepOutcome) {}
}

/// Observer that does nothing
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Run one step and record its outcome
///
/// Returns `true` when the step passed or was skipped, `false` when it
/// failed. A skipped step's closure is never called. A panic inside the
/// step is caught and recorded as a failure carrying the panic message.
pub fn run_step<F, E>(name: &str, step: F, report: &mut PipelineReport, skip: bool) -> bool
where
    F: FnOnce() -> Result<String, E>,
    E: Display,
{
    if skip {
        tracing::debug!(step = name, "step skipped");
        report.add_outcome(StepOutcome::skipped(name));
        return true;
    }

    tracing::debug!(step = name, "step started");
    let start = Instant::now();
    let result = panic::catch_unwind(AssertUnwindSafe(step));
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    let result = match result {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => Err(format!("step panicked: {}", panic_message(payload.as_ref()))),
    };

    match result {
        Ok(detail) => {
            tracing::info!(step = name, duration_ms, "step passed");
            report.add_outcome(StepOutcome::passed(name, duration_ms, detail));
            true
        }
        Err(message) => {
            tracing::warn!(step = name, duration_ms, error = %message, "step failed");
            report.add_outcome(StepOutcome::failed(name, duration_ms, message));
            false
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic payload"
    }
}

/// Run every step in order, never stopping early
///
/// Returns `true` only if no step failed.
pub fn run_steps(
    steps: Vec<Step<'_>>,
    report: &mut PipelineReport,
    observer: &mut dyn StepObserver,
) -> bool {
    let mut all_passed = true;

    for step in steps {
        let Step { name, skip, action } = step;

        observer.on_start(&name, skip);
        if !run_step(&name, action, report, skip) {
            all_passed = false;
        }

        if let Some(outcome) = report.outcomes().last() {
            observer.on_finish(outcome);
        }
    }

    all_passed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SteplineError;
    use crate::pipeline::StepStatus;
    use std::cell::Cell;
    use std::time::Duration;

    #[test]
    fn test_successful_step_returns_true() {
        let mut report = PipelineReport::new();
        let passed = run_step("ok", || Ok::<_, SteplineError>("done".to_string()), &mut report, false);

        assert!(passed);
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.status(), StepStatus::Pass);
        assert_eq!(outcome.detail(), Some("done"));
        assert!(outcome.duration_ms() >= 0.0);
    }

    #[test]
    fn test_failing_step_returns_false() {
        let mut report = PipelineReport::new();
        let passed = run_step(
            "bad",
            || Err::<String, _>("something broke"),
            &mut report,
            false,
        );

        assert!(!passed);
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.status(), StepStatus::Fail);
        assert!(outcome.detail().unwrap().contains("something broke"));
    }

    #[test]
    fn test_skip_never_invokes_step() {
        let mut report = PipelineReport::new();
        let called = Cell::new(false);

        let passed = run_step(
            "skipped_step",
            || {
                called.set(true);
                Ok::<_, SteplineError>("x".to_string())
            },
            &mut report,
            true,
        );

        assert!(passed);
        assert!(!called.get());
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.status(), StepStatus::Skip);
        assert_eq!(outcome.duration_ms(), 0.0);
        assert!(outcome.detail().is_none());
    }

    #[test]
    fn test_empty_description_is_kept() {
        let mut report = PipelineReport::new();
        run_step("quiet", || Ok::<_, SteplineError>(String::new()), &mut report, false);
        assert_eq!(report.outcomes()[0].detail(), Some(""));
    }

    #[test]
    fn test_duration_recorded() {
        let mut report = PipelineReport::new();
        run_step(
            "slow_step",
            || {
                std::thread::sleep(Duration::from_millis(50));
                Ok::<_, SteplineError>("slept".to_string())
            },
            &mut report,
            false,
        );
        assert!(report.outcomes()[0].duration_ms() >= 45.0);
    }

    #[test]
    fn test_failure_duration_counts_time_until_error() {
        let mut report = PipelineReport::new();
        run_step(
            "slow_failure",
            || {
                std::thread::sleep(Duration::from_millis(20));
                Err::<String, _>("late")
            },
            &mut report,
            false,
        );
        assert!(report.outcomes()[0].duration_ms() >= 15.0);
    }

    #[test]
    fn test_one_outcome_per_call_in_order() {
        let mut report = PipelineReport::new();
        for i in 0..6 {
            let name = format!("step-{i}");
            match i % 3 {
                0 => run_step(&name, || Ok::<_, SteplineError>("ok".into()), &mut report, false),
                1 => run_step(&name, || Err::<String, _>("no"), &mut report, false),
                _ => run_step(&name, || Ok::<_, SteplineError>("ok".into()), &mut report, true),
            };
            assert_eq!(report.outcomes().len(), i + 1);
        }

        let names: Vec<_> = report.outcomes().iter().map(|o| o.name().to_string()).collect();
        assert_eq!(names, (0..6).map(|i| format!("step-{i}")).collect::<Vec<_>>());
    }

    #[test]
    fn test_scenario_lint_test_build() {
        let mut report = PipelineReport::new();
        let steps = vec![
            Step::new("lint", || Ok("ok".to_string())),
            Step::new("test", || {
                Err(SteplineError::InvalidStep {
                    step: "test".into(),
                    reason: "x failed".into(),
                })
            }),
            Step::new("build", || Ok("built".to_string())).skipped(true),
        ];

        let all_passed = run_steps(steps, &mut report, &mut NoopObserver);

        assert!(!all_passed);
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.skipped(), 1);

        let summary = report.summary();
        let line_for = |name: &str| {
            summary
                .lines()
                .find(|l| l.contains(name) && !l.contains('↳'))
                .unwrap_or_default()
                .to_string()
        };
        assert!(line_for("lint").contains("PASS"));
        assert!(line_for("test").contains("FAIL"));
        assert!(line_for("build").contains("SKIP"));
        assert!(summary.contains("x failed"));
    }

    #[test]
    fn test_panicking_step_is_recorded_as_failure() {
        let mut report = PipelineReport::new();
        let passed = run_step(
            "explodes",
            || -> Result<String, SteplineError> { panic!("kaboom") },
            &mut report,
            false,
        );

        assert!(!passed);
        let outcome = &report.outcomes()[0];
        assert_eq!(outcome.status(), StepStatus::Fail);
        assert_eq!(outcome.detail(), Some("step panicked: kaboom"));
    }

    #[test]
    fn test_run_steps_continues_after_panic() {
        let code = 7;
        let mut report = PipelineReport::new();
        let steps = vec![
            Step::new("explodes", move || panic!("exit code {code}")),
            Step::new("after", || Ok("still ran".to_string())),
        ];

        assert!(!run_steps(steps, &mut report, &mut NoopObserver));
        assert_eq!(report.outcomes().len(), 2);
        assert_eq!(report.outcomes()[0].detail(), Some("step panicked: exit code 7"));
        assert_eq!(report.outcomes()[1].status(), StepStatus::Pass);
        assert!(report.summary().contains("step panicked: exit code 7"));
    }

    #[test]
    fn test_run_steps_continues_after_failure() {
        struct Recorder(Vec<String>);

        impl StepObserver for Recorder {
            fn on_finish(&mut self, outcome: &StepOutcome) {
                self.0.push(format!("{}:{}", outcome.name(), outcome.status()));
            }
        }

        let mut report = PipelineReport::new();
        let mut recorder = Recorder(Vec::new());
        let steps = vec![
            Step::new("first", || Err(SteplineError::Io { message: "disk".into() })),
            Step::new("second", || Ok("fine".to_string())),
        ];

        assert!(!run_steps(steps, &mut report, &mut recorder));
        assert_eq!(recorder.0, ["first:fail", "second:pass"]);
    }
}
