//! Executing examples with their hooks.
//!
//! The runner is strictly sequential: one example at a time, in the order the
//! [resolution](crate::filter) left them in. For every executed example it
//! composes the hook chain from the configuration and the enclosing groups:
//!
//! ```text
//! before_suite (first executed example only)
//! configuration before_each hooks
//! group before_each hooks, outermost group first
//! example body
//! group after_each hooks, innermost group first
//! configuration after_each hooks
//! after_suite (after the last example)
//! ```
//!
//! The first failing before-hook skips the remaining before-hooks and the body.
//! After-hooks always run, and one failing after-hook does not stop the next.

use std::time::Instant;

use crate::{
    config::Configuration,
    example::ExampleRef,
    filter::{Disposition, ResolvedExamples},
    group::GroupRef,
    hook::{EachHook, HookScope, SuiteHook},
    metadata::ExampleMetadata,
    outcome::{ExampleFailure, ExampleOutcome, ExampleStatus, FailureKind, SkipReason, SuiteFailure},
    panic::{self, Caught},
    reporter::{ExampleReport, ExampleStart, ReportEvent},
    tree::{ExampleTree, SuitePhase},
};

/// Outcomes of a full suite run, in declaration order.
#[derive(Debug)]
pub(crate) struct SuiteRun<'t> {
    pub(crate) outcomes: Vec<(ExampleRef<'t>, ExampleOutcome)>,
    pub(crate) suite_failures: Vec<SuiteFailure>,
}

fn failure(kind: FailureKind, caught: Caught, example: &ExampleRef<'_>) -> ExampleFailure {
    ExampleFailure {
        kind,
        message: caught.message,
        callsite: example.callsite().clone(),
        location: caught.location,
    }
}

fn scope_of(group: Option<GroupRef<'_>>) -> HookScope {
    match group {
        Some(group) => group.scope(),
        None => HookScope::Global,
    }
}

/// Configuration hooks first, then the groups from the outside in.
fn before_chain<'a>(
    example: ExampleRef<'a>,
    config: &'a Configuration,
) -> Vec<(Option<GroupRef<'a>>, &'a EachHook)> {
    let mut groups: Vec<_> = example.ancestors().collect();
    groups.reverse();

    let global = config.hooks.before_each.iter().map(|hook| (None, hook));
    let grouped = groups.into_iter().flat_map(|group| {
        group
            .hooks()
            .before_each()
            .iter()
            .map(move |hook| (Some(group), hook))
    });
    global.chain(grouped).collect()
}

/// The groups from the inside out, then the configuration hooks.
fn after_chain<'a>(
    example: ExampleRef<'a>,
    config: &'a Configuration,
) -> Vec<(Option<GroupRef<'a>>, &'a EachHook)> {
    let grouped = example.ancestors().flat_map(|group| {
        group
            .hooks()
            .after_each()
            .iter()
            .map(move |hook| (Some(group), hook))
    });
    let global = config.hooks.after_each.iter().map(|hook| (None, hook));
    grouped.chain(global).collect()
}

/// Run a single example with all of its each-hooks.
pub(crate) fn run_example(
    example: ExampleRef<'_>,
    example_index: usize,
    config: &Configuration,
) -> ExampleOutcome {
    let name = example.name();
    let _span = tracing::debug_span!("example", name = %name, index = example_index).entered();

    let metadata = ExampleMetadata::new(example, example_index);
    let now = Instant::now();
    let mut failures = Vec::new();

    for (group, hook) in before_chain(example, config) {
        if let Err(caught) = panic::catch(|| hook.call(&metadata)) {
            let kind = FailureKind::BeforeHook(scope_of(group));
            failures.push(failure(kind, caught, &example));
            break;
        }
    }

    if failures.is_empty() {
        tracing::trace!("running example body");
        if let Err(caught) = panic::catch(|| example.node().call()) {
            let kind = match caught.panicked {
                true => FailureKind::Panicked,
                false => FailureKind::Error,
            };
            failures.push(failure(kind, caught, &example));
        }
    }

    for (group, hook) in after_chain(example, config) {
        if let Err(caught) = panic::catch(|| hook.call(&metadata)) {
            let kind = FailureKind::AfterHook(scope_of(group));
            failures.push(failure(kind, caught, &example));
        }
    }

    let duration = now.elapsed();
    let mut failures = failures.into_iter();
    let status = match failures.next() {
        None => ExampleStatus::Passed,
        Some(first) => {
            tracing::debug!(failure = %first, "example failed");
            ExampleStatus::Failed(first)
        }
    };

    ExampleOutcome {
        status,
        duration,
        example_index: Some(example_index),
        additional_failures: failures.collect(),
    }
}

/// Run one example outside of a suite run.
pub(crate) fn run_single(example: ExampleRef<'_>, config: &Configuration) -> ExampleOutcome {
    match example.is_pending() {
        true => ExampleOutcome::skipped(SkipReason::Pending),
        false => run_example(example, 0, config),
    }
}

/// Suite hooks of the configuration and then of every group in declaration
/// order.
fn suite_hooks<'a>(
    tree: &'a ExampleTree,
    config: &'a Configuration,
    phase: SuitePhase,
) -> Vec<(Option<GroupRef<'a>>, &'a SuiteHook)> {
    let select = move |hooks: &'a crate::hook::HookChain| match phase {
        SuitePhase::Before => hooks.before_suite(),
        SuitePhase::After => hooks.after_suite(),
    };

    let global = select(&config.hooks).iter().map(|hook| (None, hook));
    let grouped = (0..tree.group_count()).flat_map(move |index| {
        let group = tree.group(crate::tree::GroupId(index));
        select(group.hooks()).iter().map(move |hook| (Some(group), hook))
    });
    global.chain(grouped).collect()
}

/// Run the suite hooks of `phase`.
///
/// Before-suite hooks stop at the first failure, after-suite hooks all run.
/// Returns whether every hook passed.
fn run_suite_hooks(
    tree: &ExampleTree,
    config: &Configuration,
    phase: SuitePhase,
    emit: &mut impl FnMut(ReportEvent),
    suite_failures: &mut Vec<SuiteFailure>,
) -> bool {
    let mut passed = true;
    for (group, hook) in suite_hooks(tree, config, phase) {
        let Err(caught) = panic::catch(|| hook.call()) else {
            continue;
        };

        let failure = SuiteFailure {
            phase,
            scope: scope_of(group),
            message: caught.message,
            location: caught.location,
        };
        tracing::warn!(%failure, "suite hook failed");
        emit(ReportEvent::SuiteFailed(failure.clone()));
        suite_failures.push(failure);
        passed = false;

        if phase == SuitePhase::Before {
            break;
        }
    }
    passed
}

/// Run every runnable example of `resolved`, reporting through `emit`.
pub(crate) fn run_suite<'t>(
    tree: &'t ExampleTree,
    config: &Configuration,
    resolved: &ResolvedExamples<'t>,
    mut emit: impl FnMut(ReportEvent),
) -> SuiteRun<'t> {
    let mut outcomes = Vec::with_capacity(resolved.examples.len());
    let mut suite_failures = Vec::new();
    let mut started = false;
    let mut aborted = false;
    let mut example_index = 0;

    for &(example, disposition) in &resolved.examples {
        if disposition.runs() && !started {
            started = true;
            let passed = run_suite_hooks(
                tree,
                config,
                SuitePhase::Before,
                &mut emit,
                &mut suite_failures,
            );
            if !passed {
                tracing::warn!("before-suite hook failed, aborting the run");
                aborted = true;
            }
        }

        let outcome = match disposition {
            Disposition::Skipped(reason) => ExampleOutcome::skipped(reason),
            Disposition::Run if aborted => ExampleOutcome::skipped(SkipReason::Aborted),
            Disposition::Run => {
                emit(ReportEvent::ExampleStarted(ExampleStart {
                    name: example.name(),
                    callsite: example.callsite().clone(),
                    example_index,
                }));
                let outcome = run_example(example, example_index, config);
                example_index += 1;

                if outcome.failed() && config.fail_fast() {
                    tracing::warn!(name = %example.name(), "example failed, aborting the run");
                    aborted = true;
                }
                outcome
            }
        };

        emit(ReportEvent::ExampleFinished(ExampleReport {
            name: example.name(),
            callsite: example.callsite().clone(),
            outcome: outcome.clone(),
        }));
        outcomes.push((example, outcome));
    }

    if started {
        run_suite_hooks(tree, config, SuitePhase::After, &mut emit, &mut suite_failures);
    }

    SuiteRun {
        outcomes,
        suite_failures,
    }
}
