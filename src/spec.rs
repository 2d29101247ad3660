//! Declaring example groups, examples and hooks.
//!
//! A [`Spec`] collects the declarations of a suite. Group bodies run right
//! away and receive a [`GroupScope`] for the group they describe; the group is
//! closed once its body returns. [`Spec::build`] turns the declarations into a
//! [`Suite`].
//!
//! ```
//! use kispec::spec::Spec;
//!
//! let mut spec = Spec::new();
//! spec.describe("calc", |calc| {
//!     calc.it("adds", || assert_eq!(2 + 3, 5));
//!     calc.context("neg", |neg| {
//!         neg.it("subtracts", || assert_eq!(2 - 3, -1));
//!     });
//! });
//!
//! let suite = spec.build().unwrap();
//! let report = suite.run();
//! assert_eq!(report.passed(), 2);
//! assert!(report.get("calc neg subtracts").unwrap().passed());
//! ```
//!
//! Declaration mistakes, like including shared examples that were never
//! defined, do not panic. The first one is kept and returned by
//! [`Spec::build`].

use std::{borrow::Cow, collections::HashMap, fmt::Debug, rc::Rc};

use crate::{
    callsite::Callsite,
    config::Configuration,
    error::StructuralError,
    example::{Example, ExampleFn, ExampleMeta, ExampleResult},
    flags::Flags,
    hook::{EachHook, SuiteHook},
    metadata::ExampleMetadata,
    shared::SharedContext,
    suite::Suite,
    tree::{EachPhase, ExampleId, ExampleTree, GroupId, GroupMeta, SuitePhase},
};

type SharedBody = Rc<dyn Fn(&mut GroupScope<'_>, &SharedContext)>;
type ConfigureFn = Box<dyn FnOnce(&mut Configuration)>;

struct Declarations {
    tree: ExampleTree,
    shared: HashMap<Cow<'static, str>, SharedBody>,
    error: Option<StructuralError>,
}

impl Declarations {
    fn record(&mut self, error: StructuralError) {
        tracing::error!(%error, "invalid declaration");
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn record_on_error<T>(&mut self, result: Result<T, StructuralError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.record(error);
                None
            }
        }
    }
}

/// The declaration phase of a suite.
pub struct Spec {
    decl: Declarations,
    configure: Vec<ConfigureFn>,
}

impl Default for Spec {
    #[track_caller]
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Spec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spec")
            .field("tree", &self.decl.tree)
            .field("shared", &self.decl.shared.keys().collect::<Vec<_>>())
            .field("error", &self.decl.error)
            .field("configure", &self.configure.len())
            .finish()
    }
}

impl Spec {
    #[track_caller]
    pub fn new() -> Self {
        Self {
            decl: Declarations {
                tree: ExampleTree::new(),
                shared: HashMap::new(),
                error: None,
            },
            configure: Vec::new(),
        }
    }

    /// Declare directly into the root group.
    pub fn declare(&mut self, body: impl FnOnce(&mut GroupScope<'_>)) -> &mut Self {
        let mut root = GroupScope::new(&mut self.decl, ExampleTree::ROOT);
        body(&mut root);
        self
    }

    /// Declare a top level example group.
    #[track_caller]
    pub fn describe(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        let meta = GroupMeta::new(description, Callsite::caller());
        GroupScope::new(&mut self.decl, ExampleTree::ROOT).group(meta, body);
        self
    }

    /// Register a configuration callback.
    ///
    /// Callbacks run once, in registration order, when the suite is built.
    pub fn configure(&mut self, f: impl FnOnce(&mut Configuration) + 'static) -> &mut Self {
        self.configure.push(Box::new(f));
        self
    }

    /// Define a named set of shared examples.
    ///
    /// `body` runs for every group that includes the set, with the context
    /// that group passed.
    pub fn shared_examples<F>(&mut self, name: impl Into<Cow<'static, str>>, body: F) -> &mut Self
    where
        F: Fn(&mut GroupScope<'_>, &SharedContext) + 'static,
    {
        let name = name.into();
        match self.decl.shared.contains_key(&name) {
            true => self.decl.record(StructuralError::DuplicateSharedExamples(name.into_owned())),
            false => {
                self.decl.shared.insert(name, Rc::new(body));
            }
        }
        self
    }

    /// Finish declaring and produce a suite with a sealed tree.
    pub fn build(self) -> Result<Suite, StructuralError> {
        let Spec { decl, configure } = self;
        if let Some(error) = decl.error {
            return Err(error);
        }

        let mut config = Configuration::default();
        for f in configure {
            f(&mut config);
        }

        tracing::debug!(
            groups = decl.tree.group_count(),
            examples = decl.tree.example_count(),
            "spec built"
        );
        Ok(Suite::new(decl.tree, config))
    }
}

/// The handle a group body declares through.
pub struct GroupScope<'s> {
    decl: &'s mut Declarations,
    group: GroupId,
    /// Set while declaring shared examples, their callsite is the including
    /// `it_behaves_like` call.
    shared_callsite: Option<Callsite>,
}

impl<'s> GroupScope<'s> {
    fn new(decl: &'s mut Declarations, group: GroupId) -> Self {
        Self {
            decl,
            group,
            shared_callsite: None,
        }
    }

    /// The id of the group this scope declares into.
    pub fn id(&self) -> GroupId {
        self.group
    }

    fn callsite(&self, caller: Callsite) -> Callsite {
        self.shared_callsite.clone().unwrap_or(caller)
    }

    fn group(
        &mut self,
        meta: GroupMeta,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> Option<GroupId> {
        let meta = GroupMeta {
            callsite: self.callsite(meta.callsite),
            ..meta
        };
        let added = self.decl.tree.add_group(self.group, meta);
        let id = self.decl.record_on_error(added)?;

        let mut scope = GroupScope {
            decl: &mut *self.decl,
            group: id,
            shared_callsite: self.shared_callsite.clone(),
        };
        body(&mut scope);

        let closed = self.decl.tree.close(id);
        self.decl.record_on_error(closed);
        Some(id)
    }

    #[track_caller]
    pub fn describe(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new(), body)
    }

    #[track_caller]
    pub fn context(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new(), body)
    }

    /// A focused group.
    #[track_caller]
    pub fn fdescribe(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new().focused(), body)
    }

    #[track_caller]
    pub fn fcontext(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new().focused(), body)
    }

    /// A pending group. Its examples are declared but never run.
    #[track_caller]
    pub fn xdescribe(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new().pending(), body)
    }

    #[track_caller]
    pub fn xcontext(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        self.describe_with(description, Flags::new().pending(), body)
    }

    /// A group with arbitrary flags, for example `Flags::new().with("slow", true)`.
    #[track_caller]
    pub fn describe_with(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        flags: Flags,
        body: impl FnOnce(&mut GroupScope<'_>),
    ) -> &mut Self {
        let meta = GroupMeta::new(description, Callsite::caller()).with_flags(flags);
        self.group(meta, body);
        self
    }

    fn example(&mut self, function: ExampleFn, meta: ExampleMeta) -> Option<ExampleId> {
        let meta = ExampleMeta {
            callsite: self.callsite(meta.callsite),
            is_shared_example: self.shared_callsite.is_some(),
            ..meta
        };
        let added = self.decl.tree.add_example(self.group, Example::new(function, meta));
        self.decl.record_on_error(added)
    }

    /// Declare an example.
    #[track_caller]
    pub fn it<F, T>(&mut self, description: impl Into<Cow<'static, str>>, body: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.it_with(description, Flags::new(), body)
    }

    /// A focused example.
    #[track_caller]
    pub fn fit<F, T>(&mut self, description: impl Into<Cow<'static, str>>, body: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.it_with(description, Flags::new().focused(), body)
    }

    /// A pending example. The body is kept but never runs.
    #[track_caller]
    pub fn xit<F, T>(&mut self, description: impl Into<Cow<'static, str>>, body: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.it_with(description, Flags::new().pending(), body)
    }

    #[track_caller]
    pub fn it_with<F, T>(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        flags: Flags,
        body: F,
    ) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        let meta = ExampleMeta::new(description, Callsite::caller()).with_flags(flags);
        self.example(ExampleFn::from_fn(body), meta);
        self
    }

    /// A pending example without a body.
    #[track_caller]
    pub fn pending(&mut self, description: impl Into<Cow<'static, str>>) -> &mut Self {
        let meta =
            ExampleMeta::new(description, Callsite::caller()).with_flags(Flags::new().pending());
        self.example(ExampleFn::default(), meta);
        self
    }

    fn each_hook(&mut self, phase: EachPhase, hook: EachHook) -> &mut Self {
        let added = self.decl.tree.add_each_hook(self.group, phase, hook);
        self.decl.record_on_error(added);
        self
    }

    fn suite_hook(&mut self, phase: SuitePhase, hook: SuiteHook) -> &mut Self {
        let added = self.decl.tree.add_suite_hook(self.group, phase, hook);
        self.decl.record_on_error(added);
        self
    }

    /// Run `hook` before every example of this group and its subgroups.
    pub fn before_each<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.each_hook(EachPhase::Before, EachHook::each(hook))
    }

    pub fn before_each_with_metadata<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&ExampleMetadata<'_>) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.each_hook(EachPhase::Before, EachHook::with_metadata(hook))
    }

    /// Run `hook` after every example of this group and its subgroups, even
    /// if the example failed.
    pub fn after_each<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.each_hook(EachPhase::After, EachHook::each(hook))
    }

    pub fn after_each_with_metadata<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&ExampleMetadata<'_>) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.each_hook(EachPhase::After, EachHook::with_metadata(hook))
    }

    /// Run `hook` once per suite run, before the first executed example.
    ///
    /// The hook runs even if no example of this group is executed.
    pub fn before_suite<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.suite_hook(SuitePhase::Before, SuiteHook::new(hook))
    }

    pub fn after_suite<F, T>(&mut self, hook: F) -> &mut Self
    where
        F: Fn() -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.suite_hook(SuitePhase::After, SuiteHook::new(hook))
    }

    fn behaves_like(
        &mut self,
        name: &str,
        flags: Flags,
        context: SharedContext,
        caller: Callsite,
    ) -> &mut Self {
        let Some((description, body)) = self
            .decl
            .shared
            .get_key_value(name)
            .map(|(name, body)| (name.clone(), Rc::clone(body)))
        else {
            self.decl.record(StructuralError::UnknownSharedExamples(name.to_string()));
            return self;
        };

        let callsite = self.callsite(caller);
        let meta = GroupMeta::new(description, callsite.clone()).with_flags(flags);
        let previous = self.shared_callsite.replace(callsite);
        self.group(meta, |scope| body(scope, &context));
        self.shared_callsite = previous;
        self
    }

    /// Include the shared examples `name` in a new subgroup.
    #[track_caller]
    pub fn it_behaves_like(&mut self, name: &str) -> &mut Self {
        self.behaves_like(name, Flags::new(), SharedContext::new(), Callsite::caller())
    }

    /// Like [`it_behaves_like`](Self::it_behaves_like), passing `context` to
    /// the shared body.
    #[track_caller]
    pub fn it_behaves_like_with(&mut self, name: &str, context: SharedContext) -> &mut Self {
        self.behaves_like(name, Flags::new(), context, Callsite::caller())
    }

    #[track_caller]
    pub fn fit_behaves_like(&mut self, name: &str) -> &mut Self {
        self.behaves_like(name, Flags::new().focused(), SharedContext::new(), Callsite::caller())
    }

    #[track_caller]
    pub fn xit_behaves_like(&mut self, name: &str) -> &mut Self {
        self.behaves_like(name, Flags::new().pending(), SharedContext::new(), Callsite::caller())
    }
}

impl Debug for GroupScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupScope")
            .field("group", &self.group)
            .field("shared_callsite", &self.shared_callsite)
            .finish()
    }
}
