use std::{cell::RefCell, rc::Rc, sync::LazyLock};

use kispec::{ExampleRef, SuiteReport, outcome::ExampleStatus};
use regex::Regex;

/// Matches full example names that mention slowness as a whole word.
pub static SLOW_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bslow\b").unwrap());

pub fn is_slow(example: &ExampleRef<'_>) -> bool {
    SLOW_RE.is_match(&example.name())
}

/// Order of hook and body invocations.
#[derive(Debug, Default, Clone)]
pub struct Calls(Rc<RefCell<Vec<String>>>);

impl Calls {
    pub fn record(&self, call: &'static str) -> impl Fn() + 'static {
        let calls = self.clone();
        move || calls.0.borrow_mut().push(call.to_string())
    }

    pub fn push(&self, call: impl Into<String>) {
        self.0.borrow_mut().push(call.into());
    }

    pub fn take(&self) -> Vec<String> {
        self.0.take()
    }
}

/// Name and a short status for every discovered example.
pub fn statuses(report: &SuiteReport<'_>) -> Vec<(String, String)> {
    report
        .outcomes
        .iter()
        .map(|(example, outcome)| {
            let status = match &outcome.status {
                ExampleStatus::Passed => "passed".to_string(),
                ExampleStatus::Failed(failure) => format!("failed: {}", failure.message),
                ExampleStatus::Skipped(reason) => format!("skipped: {reason}"),
                _ => "unknown".to_string(),
            };
            (example.name(), status)
        })
        .collect()
}

pub fn pair(name: &str, status: &str) -> (String, String) {
    (name.to_string(), status.to_string())
}
