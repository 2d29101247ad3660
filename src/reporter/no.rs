use crate::reporter::{ReportEvent, SuiteReporter};

/// A reporter that discards every event.
///
/// This is the default of [`Suite::harness`](crate::suite::Suite::harness),
/// useful when the caller only looks at the returned
/// [`SuiteReport`](crate::report::SuiteReport).
#[derive(Debug, Default, Clone)]
pub struct NoReporter;

impl SuiteReporter for NoReporter {
    fn report(&mut self, _: ReportEvent) {}
}
