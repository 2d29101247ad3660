//! Nested example groups with hooks and focus filters.
//!
//! Suites are declared with a [`Spec`], built into a [`Suite`] and run through
//! a [`harness::SuiteHarness`]. See [`spec`] for the declaration side and
//! [`filter`] for how focus, filters and pending flags decide what runs.

pub mod callsite;
pub mod config;
pub mod error;
pub mod example;
pub mod filter;
pub mod flags;
pub mod group;
pub mod harness;
pub mod hook;
pub mod metadata;
pub mod outcome;
pub mod panic;
pub mod report;
pub mod reporter;
pub mod shared;
pub mod spec;
pub mod suite;
pub mod tree;

mod runner;

pub use callsite::Callsite;
pub use config::Configuration;
pub use error::StructuralError;
pub use example::{ExampleRef, ExampleResult};
pub use flags::Flags;
pub use metadata::ExampleMetadata;
pub use report::SuiteReport;
pub use shared::SharedContext;
pub use spec::{GroupScope, Spec};
pub use suite::Suite;

#[cfg(test)]
mod test_support;
