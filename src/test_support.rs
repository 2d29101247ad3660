use std::{borrow::Cow, cell::RefCell, rc::Rc};

use crate::{
    callsite::Callsite,
    example::{Example, ExampleBody, ExampleFn, ExampleMeta},
    flags::Flags,
    tree::GroupMeta,
};

pub struct BuildExample {
    pub func: ExampleFn,
    pub description: Cow<'static, str>,
    pub flags: Flags,
    pub callsite: Callsite,
    pub is_shared_example: bool,
}

impl Default for BuildExample {
    fn default() -> Self {
        Self {
            func: ExampleFn::default(),
            description: Default::default(),
            flags: Default::default(),
            callsite: Callsite::new("test_support.rs", 0),
            is_shared_example: false,
        }
    }
}

impl From<BuildExample> for Example {
    fn from(value: BuildExample) -> Self {
        Example::new(
            value.func,
            ExampleMeta {
                description: value.description,
                flags: value.flags,
                callsite: value.callsite,
                is_shared_example: value.is_shared_example,
            },
        )
    }
}

impl<F> From<F> for ExampleFn
where
    F: ExampleBody + 'static,
{
    fn from(value: F) -> Self {
        ExampleFn::Owned(Box::new(value))
    }
}

macro_rules! example {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::example::Example::from($crate::test_support::BuildExample {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildExample {
                callsite: $crate::callsite!(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use example;

pub fn group_meta(description: &'static str) -> GroupMeta {
    GroupMeta::new(description, Callsite::new("test_support.rs", 0))
}

/// Records the order in which hooks and bodies run.
#[derive(Debug, Default, Clone)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, entry: impl Into<String>) {
        self.0.borrow_mut().push(entry.into());
    }

    /// A closure that appends `entry` every time it is called.
    pub fn recorder(&self, entry: &'static str) -> impl Fn() + 'static {
        let journal = self.clone();
        move || journal.push(entry)
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

/// A body or hook that always panics with `message`.
pub fn panicking(message: &'static str) -> impl Fn() + 'static {
    move || panic!("{message}")
}
