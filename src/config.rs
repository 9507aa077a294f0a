//! Construction-time options for `Dictionary`.

/// Options fixed when a dictionary is created.
///
/// The default is what `Dictionary::new` uses: no instrumentation and no
/// memory limit.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DictConfig {
    instrumented: bool,
    memory_limit: Option<usize>,
}

impl DictConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach collision and allocated-byte counters (see `Stats`).
    pub fn instrumented(mut self, on: bool) -> Self {
        self.instrumented = on;
        self
    }

    /// Cap the accounted footprint of all entries, in bytes.
    ///
    /// An insert or update that would exceed the cap fails with
    /// `DictError::OutOfMemory` and leaves the dictionary untouched.
    pub fn memory_limit(mut self, limit: Option<usize>) -> Self {
        self.memory_limit = limit;
        self
    }

    pub fn is_instrumented(&self) -> bool {
        self.instrumented
    }

    pub fn limit(&self) -> Option<usize> {
        self.memory_limit
    }
}
