//! Running a suite and driving its reporter.
//!
//! [`SuiteHarness`] resolves which examples run, executes them on the calling
//! thread and forwards every [`ReportEvent`] to the configured
//! [`SuiteReporter`]. The reporter lives on a scoped thread fed by a bounded
//! channel, so a slow reporter does not interleave with example execution.

use std::time::Instant;

use crate::{
    report::SuiteReport,
    reporter::{NoReporter, ReportEvent, SuiteReporter, SuiteStart},
    runner::{self, SuiteRun},
    suite::Suite,
};

const EVENT_BUFFER: usize = 64;

pub struct SuiteHarness<'s, Reporter> {
    pub(crate) suite: &'s Suite,
    pub(crate) reporter: Reporter,
}

impl<'s> SuiteHarness<'s, NoReporter> {
    pub(crate) fn new(suite: &'s Suite) -> Self {
        Self {
            suite,
            reporter: NoReporter,
        }
    }
}

impl<'s, Reporter> SuiteHarness<'s, Reporter> {
    pub fn with_reporter<WithReporter: SuiteReporter>(
        self,
        reporter: WithReporter,
    ) -> SuiteHarness<'s, WithReporter> {
        SuiteHarness {
            suite: self.suite,
            reporter,
        }
    }
}

impl<'s, Reporter: SuiteReporter + Send> SuiteHarness<'s, Reporter> {
    pub fn run(self) -> SuiteReport<'s> {
        let now = Instant::now();
        let suite = self.suite;
        suite.mark_started();

        let config = suite.configuration();
        let resolved = suite.resolve();
        let mut reporter = self.reporter;
        let _span = tracing::info_span!("suite", examples = resolved.examples.len()).entered();

        let (run, duration) = std::thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded(EVENT_BUFFER);
            let report_thread = scope.spawn(move || {
                while let Ok(event) = rx.recv() {
                    reporter.report(event);
                }
            });

            let _ = tx.send(ReportEvent::SuiteStarted(SuiteStart {
                discovered: resolved.examples.len(),
                runnable: resolved.runnable_count(),
                focused: resolved.focused,
                fell_back: resolved.fell_back,
            }));

            let run = runner::run_suite(suite.tree(), config, &resolved, |event| {
                let _ = tx.send(event);
            });
            let duration = now.elapsed();

            let SuiteRun {
                outcomes,
                suite_failures,
            } = run;
            let report = SuiteReport {
                outcomes,
                suite_failures,
                duration,
                focused: resolved.focused,
                fell_back: resolved.fell_back,
            };
            let _ = tx.send(ReportEvent::SuiteFinished(report.summary()));

            drop(tx);
            report_thread
                .join()
                .expect("report thread should join without issues");

            (report, duration)
        });

        tracing::debug!(?duration, passed = run.passed(), failed = run.failed(), "suite run done");
        run
    }
}
