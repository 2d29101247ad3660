use std::{
    process::{ExitCode, Termination},
    time::Duration,
};

use crate::{
    example::ExampleRef,
    outcome::{ExampleOutcome, SkipReason, SuiteFailure},
    reporter::SuiteSummary,
};

pub type ExampleOutcomes<'t> = Vec<(ExampleRef<'t>, ExampleOutcome)>;

/// The result of a suite run.
///
/// Lists every discovered example in declaration order, each with exactly one
/// status, including the examples that did not run.
#[derive(Debug)]
#[non_exhaustive]
pub struct SuiteReport<'t> {
    pub outcomes: ExampleOutcomes<'t>,
    pub suite_failures: Vec<SuiteFailure>,
    pub duration: Duration,
    /// Whether any example was focused.
    pub focused: bool,
    /// Whether the run-all fallback kicked in.
    pub fell_back: bool,
}

impl<'t> SuiteReport<'t> {
    pub fn passed(&self) -> usize {
        self.count(ExampleOutcome::passed)
    }

    pub fn failed(&self) -> usize {
        self.count(ExampleOutcome::failed)
    }

    pub fn skipped(&self) -> usize {
        self.count(|outcome| outcome.skipped_for().is_some())
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.count(|outcome| outcome.skipped_for() == Some(reason))
    }

    fn count(&self, f: impl Fn(&ExampleOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, outcome)| f(outcome)).count()
    }

    /// The examples that were executed, in execution order.
    pub fn executed(&self) -> impl Iterator<Item = (ExampleRef<'t>, &ExampleOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, outcome)| outcome.example_index.is_some())
            .map(|(example, outcome)| (*example, outcome))
    }

    /// The outcome of the first example with the full `name`.
    pub fn get(&self, name: &str) -> Option<&ExampleOutcome> {
        self.outcomes
            .iter()
            .find(|(example, _)| example.name() == name)
            .map(|(_, outcome)| outcome)
    }

    /// No example failed and every suite hook passed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0 && self.suite_failures.is_empty()
    }

    pub fn summary(&self) -> SuiteSummary {
        SuiteSummary {
            passed: self.passed(),
            failed: self.failed(),
            skipped: self.skipped(),
            suite_failures: self.suite_failures.len(),
            duration: self.duration,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.is_success() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        }
    }
}

impl Termination for SuiteReport<'_> {
    fn report(self) -> ExitCode {
        self.exit_code()
    }
}
