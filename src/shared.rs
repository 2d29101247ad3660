//! Shared examples.
//!
//! A set of examples can be declared once with
//! [`Spec::shared_examples`](crate::spec::Spec::shared_examples) and then be
//! pulled into any group with
//! [`GroupScope::it_behaves_like`](crate::spec::GroupScope::it_behaves_like).
//! The including group may pass a [`SharedContext`] to parameterize them.

use std::{any::Any, borrow::Cow, collections::HashMap, fmt::Debug};

/// Named values handed to a shared example body.
///
/// Values are stored by key and retrieved with their concrete type. Since the
/// shared body runs while declaring, examples usually clone what they need
/// out of the context.
#[derive(Default)]
pub struct SharedContext(HashMap<Cow<'static, str>, Box<dyn Any>>);

impl SharedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: 'static>(mut self, key: impl Into<Cow<'static, str>>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<T: 'static>(&mut self, key: impl Into<Cow<'static, str>>, value: T) {
        self.0.insert(key.into(), Box::new(value));
    }

    /// The value stored under `key`, if there is one and it is a `T`.
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        self.0.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        self.0.get_mut(key)?.downcast_mut()
    }

    pub fn take<T: 'static>(&mut self, key: &str) -> Option<T> {
        match self.0.get(key)?.is::<T>() {
            true => self.0.remove(key)?.downcast().ok().map(|b| *b),
            false => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for SharedContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.keys()).finish()
    }
}
