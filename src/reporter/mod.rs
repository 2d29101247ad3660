//! Observing a suite run.
//!
//! A [`SuiteReporter`] receives a [`ReportEvent`] for every step of a run.
//! The [harness](crate::harness) drives the reporter on its own thread and
//! feeds it through a channel, so events are owned and reporters must be
//! [`Send`]. The examples themselves always run on the calling thread.
//!
//! Any `FnMut(ReportEvent)` is a reporter, which is handy in tests:
//!
//! ```
//! # use kispec::{reporter::ReportEvent, spec::Spec};
//! let mut spec = Spec::new();
//! spec.describe("math", |math| {
//!     math.it("adds", || assert_eq!(1 + 1, 2));
//! });
//! let suite = spec.build().unwrap();
//!
//! let (tx, rx) = std::sync::mpsc::channel();
//! let report = suite
//!     .harness()
//!     .with_reporter(move |event: ReportEvent| tx.send(event).unwrap())
//!     .run();
//! assert!(report.is_success());
//! assert_eq!(rx.iter().count(), 4);
//! ```

use std::time::Duration;

use crate::{
    callsite::Callsite,
    outcome::{ExampleOutcome, SuiteFailure},
};

mod log;
pub use log::LogReporter;

mod no;
pub use no::NoReporter;

pub trait SuiteReporter {
    fn report(&mut self, event: ReportEvent);
}

impl<F> SuiteReporter for F
where
    F: FnMut(ReportEvent),
{
    fn report(&mut self, event: ReportEvent) {
        self(event)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportEvent {
    SuiteStarted(SuiteStart),
    ExampleStarted(ExampleStart),
    ExampleFinished(ExampleReport),
    SuiteFailed(SuiteFailure),
    SuiteFinished(SuiteSummary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteStart {
    /// Every example in the tree.
    pub discovered: usize,
    /// The examples that will run, unless the suite aborts.
    pub runnable: usize,
    pub focused: bool,
    pub fell_back: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleStart {
    pub name: String,
    pub callsite: Callsite,
    pub example_index: usize,
}

/// Sent for every discovered example, including skipped ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleReport {
    pub name: String,
    pub callsite: Callsite,
    pub outcome: ExampleOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub suite_failures: usize,
    pub duration: Duration,
}

impl SuiteSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.suite_failures == 0
    }
}
