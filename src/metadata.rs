use crate::example::ExampleRef;

/// Information about an example that is about to run, or just ran.
///
/// The runner creates the metadata right before the before-hooks of an example
/// and hands it to every metadata-aware hook by reference. It cannot be
/// changed after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleMetadata<'t> {
    example: ExampleRef<'t>,
    example_index: usize,
}

impl<'t> ExampleMetadata<'t> {
    pub(crate) fn new(example: ExampleRef<'t>, example_index: usize) -> Self {
        Self {
            example,
            example_index,
        }
    }

    /// The example this metadata was collected for.
    pub fn example(&self) -> ExampleRef<'t> {
        self.example
    }

    /// The 0-based position of the example among the examples executed in
    /// this run.
    ///
    /// Filtered and pending examples do not take up an index.
    pub fn example_index(&self) -> usize {
        self.example_index
    }
}
