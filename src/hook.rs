//! Setup and teardown hooks.
//!
//! Hooks live in a [`HookChain`] owned either by an example group or by the
//! [`Configuration`](crate::config::Configuration). A chain only grows while
//! declaring and is read-only while a suite runs.
//!
//! Each-hooks come in two shapes, plain closures and closures receiving the
//! [`ExampleMetadata`] of the example they run for. Both shapes share a single
//! list per phase, so their relative registration order is kept.

use std::fmt::Debug;

use crate::{
    example::{ExampleBody, ExampleResult},
    metadata::ExampleMetadata,
};

/// A hook that runs before or after each example.
pub enum EachHook {
    Plain(Box<dyn ExampleBody>),
    WithMetadata(Box<dyn Fn(&ExampleMetadata<'_>) -> ExampleResult>),
}

impl EachHook {
    pub fn each<F, T>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self::Plain(Box::new(f))
    }

    pub fn with_metadata<F, T>(f: F) -> Self
    where
        F: Fn(&ExampleMetadata<'_>) -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self::WithMetadata(Box::new(move |metadata: &ExampleMetadata<'_>| {
            f(metadata).into()
        }))
    }

    pub fn call(&self, metadata: &ExampleMetadata<'_>) -> ExampleResult {
        match self {
            Self::Plain(f) => f.call_body(),
            Self::WithMetadata(f) => f(metadata),
        }
    }
}

impl Debug for EachHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain(_) => write!(f, "Plain(...)"),
            Self::WithMetadata(_) => write!(f, "WithMetadata(...)"),
        }
    }
}

/// A hook that runs once per suite run.
pub struct SuiteHook(Box<dyn ExampleBody>);

impl SuiteHook {
    pub fn new<F, T>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self(Box::new(f))
    }

    pub fn call(&self) -> ExampleResult {
        self.0.call_body()
    }
}

impl Debug for SuiteHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SuiteHook(...)")
    }
}

/// The hooks of one scope, each list in registration order.
#[derive(Debug, Default)]
pub struct HookChain {
    pub(crate) before_each: Vec<EachHook>,
    pub(crate) after_each: Vec<EachHook>,
    pub(crate) before_suite: Vec<SuiteHook>,
    pub(crate) after_suite: Vec<SuiteHook>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_each(&self) -> &[EachHook] {
        &self.before_each
    }

    pub fn after_each(&self) -> &[EachHook] {
        &self.after_each
    }

    pub fn before_suite(&self) -> &[SuiteHook] {
        &self.before_suite
    }

    pub fn after_suite(&self) -> &[SuiteHook] {
        &self.after_suite
    }

    pub fn is_empty(&self) -> bool {
        self.before_each.is_empty()
            && self.after_each.is_empty()
            && self.before_suite.is_empty()
            && self.after_suite.is_empty()
    }
}

/// Where a hook was registered, used to attribute hook failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookScope {
    /// Registered on the [`Configuration`](crate::config::Configuration).
    Global,
    /// Registered on an example group, identified by its description.
    Group(String),
}

impl std::fmt::Display for HookScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HookScope::Global => f.write_str("global"),
            HookScope::Group(description) if description.is_empty() => f.write_str("root group"),
            HookScope::Group(description) => write!(f, "group `{description}`"),
        }
    }
}
