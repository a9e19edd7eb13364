//! Monotonic record identifiers.
//!
//! Lists hand out ids from a per-collection counter instead of wall-clock
//! milliseconds, so two records created in the same millisecond never
//! collide. The sequence lives inside the owning store and is only advanced
//! under that store's lock.

/// Per-collection id counter. Ids are strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    next: u64,
}

impl IdSequence {
    /// Sequence whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Sequence that continues after the highest id already in use.
    #[must_use]
    pub fn after(last: u64) -> Self {
        Self { next: last.saturating_add(1) }
    }

    /// Sequence that continues after every id in `ids`.
    pub fn after_all(ids: impl IntoIterator<Item = u64>) -> Self {
        Self::after(ids.into_iter().max().unwrap_or(0))
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next = self.next.saturating_add(1);
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}
