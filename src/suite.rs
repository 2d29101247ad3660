//! A sealed example tree together with its configuration.

use std::cell::Cell;

use crate::{
    config::Configuration,
    error::StructuralError,
    example::ExampleRef,
    filter::{self, ResolvedExamples},
    group::{Examples, GroupRef},
    harness::SuiteHarness,
    outcome::ExampleOutcome,
    report::SuiteReport,
    reporter::NoReporter,
    tree::{ExampleId, ExampleTree},
};

/// A suite ready for execution.
///
/// The tree is sealed on construction. The configuration stays writable
/// through [`configuration_mut`](Self::configuration_mut) until the first run
/// starts.
#[derive(Debug)]
pub struct Suite {
    tree: ExampleTree,
    config: Configuration,
    started: Cell<bool>,
}

impl Suite {
    pub fn new(mut tree: ExampleTree, config: Configuration) -> Self {
        tree.seal();
        Self {
            tree,
            config,
            started: Cell::new(false),
        }
    }

    pub fn tree(&self) -> &ExampleTree {
        &self.tree
    }

    pub fn root(&self) -> GroupRef<'_> {
        self.tree.root()
    }

    /// Every example of the suite in declaration order.
    pub fn examples(&self) -> Examples<'_> {
        self.tree.examples()
    }

    /// The first example with the full `name`.
    pub fn find(&self, name: &str) -> Option<ExampleRef<'_>> {
        self.examples().find(|example| example.name() == name)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn configuration_mut(&mut self) -> Result<&mut Configuration, StructuralError> {
        match self.started.get() {
            true => Err(StructuralError::ConfigurationLocked),
            false => Ok(&mut self.config),
        }
    }

    pub fn has_started(&self) -> bool {
        self.started.get()
    }

    pub(crate) fn mark_started(&self) {
        self.started.set(true);
    }

    /// Decide which examples a run would execute, without running anything.
    pub fn resolve(&self) -> ResolvedExamples<'_> {
        filter::resolve(self.tree.examples(), &self.config)
    }

    pub fn harness(&self) -> SuiteHarness<'_, NoReporter> {
        SuiteHarness::new(self)
    }

    /// Run the suite without a reporter.
    pub fn run(&self) -> SuiteReport<'_> {
        self.harness().run()
    }

    /// Run a single example with its each-hooks, ignoring focus and filters.
    ///
    /// Suite hooks do not run. Returns `None` for an id of another tree.
    pub fn run_example(&self, id: ExampleId) -> Option<ExampleOutcome> {
        self.mark_started();
        let example = self.tree.get_example(id)?;
        Some(example.run(&self.config))
    }
}
