//! Examples, the leaves of the example tree.
//!
//! An [`Example`] is what `it` declares: a body to execute together with its
//! [`ExampleMeta`]. Once it is part of an [`ExampleTree`], it is accessed
//! through an [`ExampleRef`], which knows the example's position in the tree
//! and can therefore derive its full name and its inherited flags.

use std::{borrow::Cow, fmt::Debug, ops::Deref};

use crate::{
    callsite::Callsite,
    config::Configuration,
    flags::{FOCUSED, Flags, PENDING},
    group::GroupRef,
    outcome::ExampleOutcome,
    runner,
    tree::{ExampleId, ExampleTree},
};

#[derive(Debug)]
#[non_exhaustive]
pub struct Example {
    function: ExampleFn,
    pub meta: ExampleMeta,
}

impl Example {
    pub fn new(function: ExampleFn, meta: ExampleMeta) -> Self {
        Self { function, meta }
    }

    pub(crate) fn call(&self) -> ExampleResult {
        self.function.call()
    }
}

impl Deref for Example {
    type Target = ExampleMeta;

    fn deref(&self) -> &Self::Target {
        &self.meta
    }
}

/// Everything about an example except its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleMeta {
    /// The description given to `it`, without any group descriptions.
    pub description: Cow<'static, str>,
    pub flags: Flags,
    pub callsite: Callsite,
    /// Whether the example was declared through `it_behaves_like`.
    pub is_shared_example: bool,
}

impl ExampleMeta {
    pub fn new(description: impl Into<Cow<'static, str>>, callsite: Callsite) -> Self {
        Self {
            description: description.into(),
            flags: Flags::default(),
            callsite,
            is_shared_example: false,
        }
    }

    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }
}

/// The callable body of an example.
#[non_exhaustive]
pub enum ExampleFn {
    Ptr(fn() -> ExampleResult),
    Owned(Box<dyn ExampleBody>),
}

impl Debug for ExampleFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ptr(ptr) => f.debug_tuple("Ptr").field(ptr).finish(),
            Self::Owned(_) => write!(f, "Owned(...)"),
        }
    }
}

impl Default for ExampleFn {
    fn default() -> Self {
        Self::Ptr(|| ExampleResult(Ok(())))
    }
}

impl ExampleFn {
    pub const fn from_const_fn(f: fn() -> ExampleResult) -> Self {
        Self::Ptr(f)
    }

    pub fn from_fn<F, T>(f: F) -> Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self::Owned(Box::new(f))
    }

    pub fn call(&self) -> ExampleResult {
        match self {
            Self::Ptr(f) => f(),
            Self::Owned(f) => f.call_body(),
        }
    }
}

/// Anything that can act as an example body or a hook.
///
/// Implemented for every `Fn() -> T` where `T` converts into an
/// [`ExampleResult`], so bodies may return `()` or a `Result`.
pub trait ExampleBody {
    fn call_body(&self) -> ExampleResult;
}

impl<F, T> ExampleBody for F
where
    F: Fn() -> T,
    T: Into<ExampleResult>,
{
    fn call_body(&self) -> ExampleResult {
        (self)().into()
    }
}

/// What an example body or hook returned.
///
/// Panics are handled separately, see [`crate::panic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleResult(pub Result<(), String>);

impl From<()> for ExampleResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Debug> From<Result<(), E>> for ExampleResult {
    fn from(v: Result<(), E>) -> Self {
        ExampleResult(v.map_err(|e| format!("{e:#?}")))
    }
}

/// A shared view on an example inside an [`ExampleTree`].
///
/// Filters and metadata-aware hooks receive this view. It is cheap to copy.
#[derive(Clone, Copy)]
pub struct ExampleRef<'t> {
    pub(crate) tree: &'t ExampleTree,
    pub(crate) id: ExampleId,
}

impl<'t> ExampleRef<'t> {
    pub(crate) fn node(&self) -> &'t Example {
        &self.tree.examples[self.id.0].0
    }

    pub fn id(&self) -> ExampleId {
        self.id
    }

    pub fn tree(&self) -> &'t ExampleTree {
        self.tree
    }

    pub fn meta(&self) -> &'t ExampleMeta {
        &self.node().meta
    }

    pub fn description(&self) -> &'t str {
        &self.node().description
    }

    /// The description of every enclosing group followed by the example's own
    /// description, outermost first and separated by spaces.
    pub fn name(&self) -> String {
        let mut parts: Vec<&str> = self
            .ancestors()
            .map(|group| group.description())
            .filter(|description| !description.is_empty())
            .collect();
        parts.reverse();
        parts.push(self.description());
        parts.join(" ")
    }

    /// The flags declared on the example itself.
    pub fn flags(&self) -> &'t Flags {
        &self.node().flags
    }

    pub fn callsite(&self) -> &'t Callsite {
        &self.node().callsite
    }

    pub fn is_shared_example(&self) -> bool {
        self.node().is_shared_example
    }

    /// The group that directly contains this example.
    pub fn group(&self) -> GroupRef<'t> {
        GroupRef {
            tree: self.tree,
            id: self.tree.examples[self.id.0].1,
        }
    }

    /// All enclosing groups, innermost first, ending with the root group.
    pub fn ancestors(&self) -> impl Iterator<Item = GroupRef<'t>> + use<'t> {
        let first = self.group();
        std::iter::successors(Some(first), |group| group.parent())
    }

    /// Whether `key` is set to `true` on the example or any enclosing group.
    pub fn is_flagged(&self, key: &str) -> bool {
        self.flags().is_set(key) || self.ancestors().any(|group| group.flags().is_set(key))
    }

    pub fn is_focused(&self) -> bool {
        self.is_flagged(FOCUSED)
    }

    pub fn is_pending(&self) -> bool {
        self.is_flagged(PENDING)
    }

    /// The flags of all enclosing groups and the example itself, where inner
    /// declarations overwrite outer ones.
    pub fn effective_flags(&self) -> Flags {
        let mut groups: Vec<_> = self.ancestors().collect();
        groups.reverse();
        let mut flags = Flags::new();
        for group in groups {
            flags.merge(group.flags());
        }
        flags.merge(self.flags());
        flags
    }

    /// Run this single example with the each-hooks of `config` and of its
    /// enclosing groups.
    ///
    /// Suite hooks are not involved and the example index is always 0.
    /// Pending examples are skipped without running anything.
    pub fn run(&self, config: &Configuration) -> ExampleOutcome {
        runner::run_single(*self, config)
    }
}

impl Debug for ExampleRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .finish()
    }
}

impl PartialEq for ExampleRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for ExampleRef<'_> {}
