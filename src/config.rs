//! Suite wide configuration.
//!
//! A [`Configuration`] holds the global hooks and the inclusion and exclusion
//! filters of a suite. It is filled during the configuration phase, usually
//! through [`Spec::configure`](crate::spec::Spec::configure) callbacks, and is
//! read-only once the suite started running.
//!
//! There is no process wide instance: every suite owns its configuration and
//! the runner receives it by reference.

use std::fmt::Debug;

use crate::{
    example::{ExampleRef, ExampleResult},
    hook::{EachHook, HookChain, SuiteHook},
    metadata::ExampleMetadata,
};

/// A predicate over a single example, used as inclusion or exclusion filter.
///
/// Predicates see the example together with its position in the tree, so they
/// may look at the flags of enclosing groups through
/// [`ExampleRef::is_flagged`] or [`ExampleRef::effective_flags`].
pub trait ExamplePredicate {
    fn matches(&self, example: &ExampleRef<'_>) -> bool;
}

impl<F> ExamplePredicate for F
where
    F: Fn(&ExampleRef<'_>) -> bool,
{
    fn matches(&self, example: &ExampleRef<'_>) -> bool {
        self(example)
    }
}

pub struct Configuration {
    pub(crate) inclusion_filters: Vec<Box<dyn ExamplePredicate>>,
    pub(crate) exclusion_filters: Vec<Box<dyn ExamplePredicate>>,
    pub(crate) hooks: HookChain,
    run_all_when_everything_filtered: bool,
    fail_fast: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            inclusion_filters: Vec::new(),
            exclusion_filters: Vec::new(),
            hooks: HookChain::default(),
            run_all_when_everything_filtered: true,
            fail_fast: false,
        }
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("inclusion_filters", &self.inclusion_filters.len())
            .field("exclusion_filters", &self.exclusion_filters.len())
            .field("hooks", &self.hooks)
            .field(
                "run_all_when_everything_filtered",
                &self.run_all_when_everything_filtered,
            )
            .field("fail_fast", &self.fail_fast)
            .finish()
    }
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an inclusion filter.
    ///
    /// An example only runs if every inclusion filter returns `true` for it.
    pub fn include<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&ExampleRef<'_>) -> bool + 'static,
    {
        self.include_predicate(filter)
    }

    pub fn include_predicate<P: ExamplePredicate + 'static>(&mut self, filter: P) -> &mut Self {
        self.inclusion_filters.push(Box::new(filter));
        self
    }

    /// Register an exclusion filter.
    ///
    /// An example that any exclusion filter returns `true` for does not run.
    pub fn exclude<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&ExampleRef<'_>) -> bool + 'static,
    {
        self.exclude_predicate(filter)
    }

    pub fn exclude_predicate<P: ExamplePredicate + 'static>(&mut self, filter: P) -> &mut Self {
        self.exclusion_filters.push(Box::new(filter));
        self
    }

    /// Run `hook` before every example, before any group hook.
    pub fn before_each<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.before_each.push(EachHook::each(hook));
        self
    }

    /// Like [`before_each`](Self::before_each), but `hook` receives the
    /// metadata of the example it runs for.
    pub fn before_each_with_metadata<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&ExampleMetadata<'_>) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.before_each.push(EachHook::with_metadata(hook));
        self
    }

    /// Run `hook` after every example, after all group hooks.
    pub fn after_each<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.after_each.push(EachHook::each(hook));
        self
    }

    pub fn after_each_with_metadata<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&ExampleMetadata<'_>) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.after_each.push(EachHook::with_metadata(hook));
        self
    }

    /// Run `hook` once, before the first example of a run.
    pub fn before_suite<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.before_suite.push(SuiteHook::new(hook));
        self
    }

    /// Run `hook` once, after the last example of a run.
    pub fn after_suite<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.hooks.after_suite.push(SuiteHook::new(hook));
        self
    }

    /// Run every non-pending example if the filters leave nothing to run.
    /// `true` by default.
    pub fn set_run_all_when_everything_filtered(&mut self, run_all: bool) -> &mut Self {
        self.run_all_when_everything_filtered = run_all;
        self
    }

    pub fn run_all_when_everything_filtered(&self) -> bool {
        self.run_all_when_everything_filtered
    }

    /// Abort the run after the first failed example. `false` by default.
    pub fn set_fail_fast(&mut self, fail_fast: bool) -> &mut Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn hooks(&self) -> &HookChain {
        &self.hooks
    }

    pub fn inclusion_filter_count(&self) -> usize {
        self.inclusion_filters.len()
    }

    pub fn exclusion_filter_count(&self) -> usize {
        self.exclusion_filters.len()
    }
}
