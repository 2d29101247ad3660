//! Example groups, the inner nodes of the example tree.
//!
//! Groups are what `describe` and `context` declare. A group owns its children
//! and its [`HookChain`], and exposes every example below it through
//! [`GroupRef::examples`].

use std::{fmt::Debug, slice};

use crate::{
    callsite::Callsite,
    example::ExampleRef,
    flags::Flags,
    hook::{HookChain, HookScope},
    tree::{ExampleTree, GroupId, GroupNode, Node},
};

/// A shared view on a group inside an [`ExampleTree`].
#[derive(Clone, Copy)]
pub struct GroupRef<'t> {
    pub(crate) tree: &'t ExampleTree,
    pub(crate) id: GroupId,
}

/// A child of a group, as seen through [`GroupRef::children`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'t> {
    Group(GroupRef<'t>),
    Example(ExampleRef<'t>),
}

impl<'t> GroupRef<'t> {
    fn node(&self) -> &'t GroupNode {
        &self.tree.groups[self.id.0]
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn description(&self) -> &'t str {
        &self.node().meta.description
    }

    pub fn flags(&self) -> &'t Flags {
        &self.node().meta.flags
    }

    pub fn callsite(&self) -> &'t Callsite {
        &self.node().meta.callsite
    }

    pub fn hooks(&self) -> &'t HookChain {
        &self.node().hooks
    }

    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.node().closed
    }

    pub fn parent(&self) -> Option<GroupRef<'t>> {
        self.node().parent.map(|id| GroupRef {
            tree: self.tree,
            id,
        })
    }

    /// The direct children in declaration order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'t>> + use<'t> {
        let tree = self.tree;
        self.node().children.iter().map(move |child| match *child {
            Node::Group(id) => NodeRef::Group(GroupRef { tree, id }),
            Node::Example(id) => NodeRef::Example(ExampleRef { tree, id }),
        })
    }

    /// Every example below this group, depth first in declaration order.
    ///
    /// The order is the natural run order of a suite and is the same on every
    /// call.
    pub fn examples(&self) -> Examples<'t> {
        Examples {
            tree: self.tree,
            stack: vec![self.node().children.iter()],
        }
    }

    pub(crate) fn scope(&self) -> HookScope {
        HookScope::Group(self.description().to_string())
    }
}

impl Debug for GroupRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupRef")
            .field("id", &self.id)
            .field("description", &self.description())
            .finish()
    }
}

impl PartialEq for GroupRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for GroupRef<'_> {}

/// Pre-order iterator over the examples below a group.
///
/// Created by [`GroupRef::examples`]. Groups are only entered when the
/// iterator reaches them.
#[derive(Debug, Clone)]
pub struct Examples<'t> {
    tree: &'t ExampleTree,
    stack: Vec<slice::Iter<'t, Node>>,
}

impl<'t> Iterator for Examples<'t> {
    type Item = ExampleRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let children = self.stack.last_mut()?;
            match children.next() {
                None => {
                    self.stack.pop();
                }
                Some(Node::Example(id)) => {
                    return Some(ExampleRef {
                        tree: self.tree,
                        id: *id,
                    });
                }
                Some(Node::Group(id)) => {
                    let children = self.tree.groups[id.0].children.iter();
                    self.stack.push(children);
                }
            }
        }
    }
}
