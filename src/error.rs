use thiserror::Error;

/// An illegal change to the example tree or the configuration.
///
/// Structural errors are programming errors in the spec declaration itself.
/// They are fatal to the declaration phase: [`Spec::build`](crate::spec::Spec::build)
/// reports the first one and no suite is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("example group `{group}` is closed, cannot add {what}")]
    GroupClosed { group: String, what: &'static str },

    #[error("example tree is sealed for execution, cannot add {what}")]
    TreeSealed { what: &'static str },

    #[error("no example group with id {0} in this tree")]
    UnknownGroup(usize),

    #[error("shared examples `{0}` are already defined")]
    DuplicateSharedExamples(String),

    #[error("no shared examples named `{0}`")]
    UnknownSharedExamples(String),

    #[error("configuration is read-only once a suite run has started")]
    ConfigurationLocked,
}
