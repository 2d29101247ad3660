use crate::{
    outcome::ExampleStatus,
    reporter::{ReportEvent, SuiteReporter},
};

/// A reporter that turns events into `tracing` events.
///
/// Passed examples are logged at debug level, skipped ones at trace level and
/// failures at error level. The summary is logged at info level.
#[derive(Debug, Default, Clone)]
pub struct LogReporter;

impl SuiteReporter for LogReporter {
    fn report(&mut self, event: ReportEvent) {
        match event {
            ReportEvent::SuiteStarted(start) => tracing::info!(
                discovered = start.discovered,
                runnable = start.runnable,
                focused = start.focused,
                "running suite"
            ),
            ReportEvent::ExampleStarted(start) => tracing::trace!(
                name = %start.name,
                index = start.example_index,
                "example started"
            ),
            ReportEvent::ExampleFinished(report) => match &report.outcome.status {
                ExampleStatus::Passed => tracing::debug!(
                    name = %report.name,
                    duration = ?report.outcome.duration,
                    "ok"
                ),
                ExampleStatus::Failed(failure) => {
                    tracing::error!(name = %report.name, %failure, "FAILED");
                    for failure in &report.outcome.additional_failures {
                        tracing::error!(name = %report.name, %failure, "also failed");
                    }
                }
                ExampleStatus::Skipped(reason) => {
                    tracing::trace!(name = %report.name, %reason, "skipped")
                }
            },
            ReportEvent::SuiteFailed(failure) => tracing::error!(%failure, "suite hook failed"),
            ReportEvent::SuiteFinished(summary) => tracing::info!(
                passed = summary.passed,
                failed = summary.failed,
                skipped = summary.skipped,
                duration = ?summary.duration,
                "suite finished"
            ),
        }
    }
}
