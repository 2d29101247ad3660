//! Arena storage for example groups and examples.
//!
//! Groups and examples are held in index-addressed vectors. Parents are
//! referred to by [`GroupId`], so walking up from an example to the root is a
//! chain of index lookups and the tree never contains reference cycles.
//!
//! A tree goes through two phases. While declaring, groups are open and accept
//! children and hooks in declaration order. A group is closed once its
//! declaration body finished, and [`ExampleTree::seal`] closes the whole tree
//! before it is handed to a [`Suite`](crate::suite::Suite). Adding anything to
//! a closed group or a sealed tree fails with a [`StructuralError`].

use std::{borrow::Cow, fmt::Debug};

use crate::{
    callsite::Callsite,
    error::StructuralError,
    example::{Example, ExampleRef},
    flags::Flags,
    group::{Examples, GroupRef},
    hook::{EachHook, HookChain, SuiteHook},
};

/// Index of a group inside an [`ExampleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

/// Index of an example inside an [`ExampleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExampleId(pub(crate) usize);

/// A child of an example group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Group(GroupId),
    Example(ExampleId),
}

/// Everything about an example group except its children and hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMeta {
    pub description: Cow<'static, str>,
    pub flags: Flags,
    pub callsite: Callsite,
}

impl GroupMeta {
    pub fn new(description: impl Into<Cow<'static, str>>, callsite: Callsite) -> Self {
        Self {
            description: description.into(),
            flags: Flags::default(),
            callsite,
        }
    }

    pub fn with_flags(self, flags: Flags) -> Self {
        Self { flags, ..self }
    }
}

#[derive(Debug)]
pub(crate) struct GroupNode {
    pub(crate) meta: GroupMeta,
    pub(crate) parent: Option<GroupId>,
    pub(crate) children: Vec<Node>,
    pub(crate) hooks: HookChain,
    pub(crate) closed: bool,
}

/// Which per-example hook list a hook is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EachPhase {
    Before,
    After,
}

/// Which suite hook list a hook is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuitePhase {
    Before,
    After,
}

/// The example tree.
///
/// The root group has an empty description and is created with the tree.
pub struct ExampleTree {
    pub(crate) groups: Vec<GroupNode>,
    pub(crate) examples: Vec<(Example, GroupId)>,
    sealed: bool,
}

impl Default for ExampleTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for ExampleTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleTree")
            .field("groups", &self.groups.len())
            .field("examples", &self.examples.len())
            .field("sealed", &self.sealed)
            .finish()
    }
}

impl ExampleTree {
    pub const ROOT: GroupId = GroupId(0);

    #[track_caller]
    pub fn new() -> Self {
        Self {
            groups: vec![GroupNode {
                meta: GroupMeta::new("", Callsite::caller()),
                parent: None,
                children: Vec::new(),
                hooks: HookChain::default(),
                closed: false,
            }],
            examples: Vec::new(),
            sealed: false,
        }
    }

    fn open_group(
        &mut self,
        id: GroupId,
        what: &'static str,
    ) -> Result<&mut GroupNode, StructuralError> {
        if self.sealed {
            return Err(StructuralError::TreeSealed { what });
        }
        let group = self
            .groups
            .get_mut(id.0)
            .ok_or(StructuralError::UnknownGroup(id.0))?;
        match group.closed {
            true => Err(StructuralError::GroupClosed {
                group: group.meta.description.to_string(),
                what,
            }),
            false => Ok(group),
        }
    }

    /// Append a new, open group as the last child of `parent`.
    pub fn add_group(
        &mut self,
        parent: GroupId,
        meta: GroupMeta,
    ) -> Result<GroupId, StructuralError> {
        let id = GroupId(self.groups.len());
        self.open_group(parent, "a group")?.children.push(Node::Group(id));
        self.groups.push(GroupNode {
            meta,
            parent: Some(parent),
            children: Vec::new(),
            hooks: HookChain::default(),
            closed: false,
        });
        Ok(id)
    }

    /// Append an example as the last child of `parent`.
    pub fn add_example(
        &mut self,
        parent: GroupId,
        example: Example,
    ) -> Result<ExampleId, StructuralError> {
        let id = ExampleId(self.examples.len());
        self.open_group(parent, "an example")?.children.push(Node::Example(id));
        self.examples.push((example, parent));
        Ok(id)
    }

    pub fn add_each_hook(
        &mut self,
        group: GroupId,
        phase: EachPhase,
        hook: EachHook,
    ) -> Result<(), StructuralError> {
        let hooks = &mut self.open_group(group, "an each hook")?.hooks;
        match phase {
            EachPhase::Before => hooks.before_each.push(hook),
            EachPhase::After => hooks.after_each.push(hook),
        }
        Ok(())
    }

    pub fn add_suite_hook(
        &mut self,
        group: GroupId,
        phase: SuitePhase,
        hook: SuiteHook,
    ) -> Result<(), StructuralError> {
        let hooks = &mut self.open_group(group, "a suite hook")?.hooks;
        match phase {
            SuitePhase::Before => hooks.before_suite.push(hook),
            SuitePhase::After => hooks.after_suite.push(hook),
        }
        Ok(())
    }

    /// Close a group, it accepts no further children or hooks.
    ///
    /// Closing a group twice is fine.
    pub fn close(&mut self, id: GroupId) -> Result<(), StructuralError> {
        let group = self
            .groups
            .get_mut(id.0)
            .ok_or(StructuralError::UnknownGroup(id.0))?;
        group.closed = true;
        Ok(())
    }

    /// Close every group and freeze the tree for execution.
    pub fn seal(&mut self) {
        for group in &mut self.groups {
            group.closed = true;
        }
        self.sealed = true;
        tracing::debug!(
            groups = self.groups.len(),
            examples = self.examples.len(),
            "example tree sealed"
        );
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn root(&self) -> GroupRef<'_> {
        self.group(Self::ROOT)
    }

    /// Look up a group.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn group(&self, id: GroupId) -> GroupRef<'_> {
        assert!(id.0 < self.groups.len(), "group {id:?} is not part of this tree");
        GroupRef { tree: self, id }
    }

    pub fn get_group(&self, id: GroupId) -> Option<GroupRef<'_>> {
        (id.0 < self.groups.len()).then_some(GroupRef { tree: self, id })
    }

    /// Look up an example.
    ///
    /// # Panics
    /// Panics if `id` does not belong to this tree.
    pub fn example(&self, id: ExampleId) -> ExampleRef<'_> {
        assert!(id.0 < self.examples.len(), "example {id:?} is not part of this tree");
        ExampleRef { tree: self, id }
    }

    pub fn get_example(&self, id: ExampleId) -> Option<ExampleRef<'_>> {
        (id.0 < self.examples.len()).then_some(ExampleRef { tree: self, id })
    }

    /// Every example of the tree in declaration order.
    pub fn examples(&self) -> Examples<'_> {
        self.root().examples()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn example_count(&self) -> usize {
        self.examples.len()
    }
}
