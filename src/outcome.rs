use std::{fmt::Display, time::Duration};

use crate::{callsite::Callsite, hook::HookScope, tree::SuitePhase};

/// The result of one discovered example in a suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ExampleOutcome {
    pub status: ExampleStatus,
    pub duration: Duration,
    /// The index the example was executed with, `None` if it never ran.
    pub example_index: Option<usize>,
    /// Failures recorded after the first one, for example from after-hooks
    /// that failed once the body already failed.
    pub additional_failures: Vec<ExampleFailure>,
}

impl ExampleOutcome {
    pub(crate) fn skipped(reason: SkipReason) -> Self {
        Self {
            status: ExampleStatus::Skipped(reason),
            duration: Duration::ZERO,
            example_index: None,
            additional_failures: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status.passed()
    }

    pub fn failed(&self) -> bool {
        self.status.failed()
    }

    pub fn skipped_for(&self) -> Option<SkipReason> {
        match self.status {
            ExampleStatus::Skipped(reason) => Some(reason),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&ExampleFailure> {
        match &self.status {
            ExampleStatus::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Every failure recorded for the example, the deciding one first.
    pub fn failures(&self) -> impl Iterator<Item = &ExampleFailure> {
        self.failure().into_iter().chain(&self.additional_failures)
    }
}

/// The terminal status of an example. Every example ends up in exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExampleStatus {
    Passed,
    Failed(ExampleFailure),
    Skipped(SkipReason),
}

impl ExampleStatus {
    pub fn passed(&self) -> bool {
        matches!(self, ExampleStatus::Passed)
    }

    pub fn failed(&self) -> bool {
        matches!(self, ExampleStatus::Failed(_))
    }

    pub fn skipped(&self) -> bool {
        matches!(self, ExampleStatus::Skipped(_))
    }

    /// A skipped example is not bad, only a failed one is.
    pub fn is_good(&self) -> bool {
        !self.failed()
    }
}

/// Why an example was not executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SkipReason {
    /// The example or one of its groups is flagged pending.
    Pending,
    /// Other examples are focused and this one is not.
    Unfocused,
    /// At least one inclusion filter rejected the example.
    NotIncluded,
    /// An exclusion filter matched the example.
    Excluded,
    /// The suite was aborted before the example's turn.
    Aborted,
}

impl Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SkipReason::Pending => "pending",
            SkipReason::Unfocused => "not focused",
            SkipReason::NotIncluded => "not included",
            SkipReason::Excluded => "excluded",
            SkipReason::Aborted => "suite aborted",
        })
    }
}

/// A failure recorded against an example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Where the failing example was declared.
    pub callsite: Callsite,
    /// Where the panic happened, if the failure was a panic.
    pub location: Option<Callsite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailureKind {
    /// The example body panicked, usually a failed assertion.
    Panicked,
    /// The example body returned an error.
    Error,
    /// A before-each hook failed, the body did not run.
    BeforeHook(HookScope),
    /// An after-each hook failed.
    AfterHook(HookScope),
}

impl Display for ExampleFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            FailureKind::Panicked => write!(f, "panicked: {}", self.message)?,
            FailureKind::Error => write!(f, "error: {}", self.message)?,
            FailureKind::BeforeHook(scope) => {
                write!(f, "before-each hook ({scope}) failed: {}", self.message)?
            }
            FailureKind::AfterHook(scope) => {
                write!(f, "after-each hook ({scope}) failed: {}", self.message)?
            }
        }
        write!(f, " [{}]", self.callsite)
    }
}

/// A failure of a suite hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteFailure {
    pub phase: SuitePhase,
    pub scope: HookScope,
    pub message: String,
    pub location: Option<Callsite>,
}

impl Display for SuiteFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            SuitePhase::Before => "before-suite",
            SuitePhase::After => "after-suite",
        };
        write!(f, "{phase} hook ({}) failed: {}", self.scope, self.message)
    }
}
