//! Filter flags for examples and example groups.
//!
//! Flags are named booleans attached to a group or an example. Two of them are
//! understood by the resolver itself:
//! - [`FOCUSED`] narrows a run down to the flagged examples
//! - [`PENDING`] keeps an example from running while it still shows up as skipped
//!
//! Any other key is free for custom inclusion and exclusion filters.
//!
//! Flags are stored only on the node they were declared on. Whether an example
//! is focused or pending is decided by walking its ancestors, see
//! [`ExampleRef::is_flagged`](crate::example::ExampleRef::is_flagged).

use std::{borrow::Cow, collections::BTreeMap};

/// Examples and groups flagged with `focused: true` are the only ones that run,
/// unless nothing at all is focused.
pub const FOCUSED: &str = "focused";

/// Examples and groups flagged with `pending: true` never run their body.
pub const PENDING: &str = "pending";

/// A set of named boolean flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flags(BTreeMap<Cow<'static, str>, bool>);

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(self) -> Self {
        self.with(FOCUSED, true)
    }

    pub fn pending(self) -> Self {
        self.with(PENDING, true)
    }

    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: bool) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: bool) {
        self.0.insert(key.into(), value);
    }

    /// The value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<bool> {
        self.0.get(key).copied()
    }

    /// Whether `key` is present and set to `true`.
    pub fn is_set(&self, key: &str) -> bool {
        self.get(key).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(key, value)| (key.as_ref(), *value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite entries in `self` with the entries of `other`.
    pub fn merge(&mut self, other: &Flags) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), *value);
        }
    }
}

impl<K: Into<Cow<'static, str>>> FromIterator<(K, bool)> for Flags {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
    }
}

impl<const N: usize> From<[(&'static str, bool); N]> for Flags {
    fn from(value: [(&'static str, bool); N]) -> Self {
        value.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_flags_are_false() {
        let flags = Flags::new().with("slow", false);
        assert!(!flags.is_set(FOCUSED));
        assert!(!flags.is_set("slow"));
        assert_eq!(flags.get("slow"), Some(false));
        assert_eq!(flags.get(PENDING), None);
    }

    #[test]
    fn merge_overwrites() {
        let mut outer = Flags::from([(FOCUSED, true), ("slow", true)]);
        outer.merge(&Flags::new().with("slow", false).pending());

        assert!(outer.is_set(FOCUSED));
        assert!(outer.is_set(PENDING));
        assert_eq!(outer.get("slow"), Some(false));
        assert_eq!(outer.len(), 3);
    }
}
