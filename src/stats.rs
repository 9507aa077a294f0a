//! Optional diagnostic counters.
//!
//! Counters are observational only: the dictionary never reads them back
//! to make a decision.

/// Snapshot of a dictionary's instrumentation counters.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Inserts that landed in an already occupied bucket. Not decremented by
    /// removals.
    pub collisions: usize,
    /// Accounted bytes owned by live keys, values and entry headers.
    pub alloced_bytes: usize,
}

impl Stats {
    pub(crate) fn record_insert(&mut self, footprint: usize, collided: bool) {
        if collided {
            self.collisions += 1;
        }
        self.alloced_bytes += footprint;
    }

    pub(crate) fn record_remove(&mut self, footprint: usize) {
        debug_assert!(self.alloced_bytes >= footprint);
        self.alloced_bytes = self.alloced_bytes.saturating_sub(footprint);
    }

    pub(crate) fn record_update(&mut self, old_len: usize, new_len: usize) {
        self.alloced_bytes = (self.alloced_bytes + new_len).saturating_sub(old_len);
    }

    pub(crate) fn reset(&mut self) {
        *self = Stats::default();
    }
}
