//! Result types produced by an allocation run.

/// One winner together with its place and prize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationEntry<T> {
    /// The winning candidate.
    pub recipient: T,
    /// One-based rank in the final winner ordering.
    pub place: usize,
    /// Awarded amount, always at least one.
    pub prize: u64,
}

/// Ordered prizes for one run plus the balance bookkeeping.
///
/// ## Invariants
/// - Entries are ordered by `place`, starting at one without gaps.
/// - Every prize is at least one.
/// - `total_awarded() + remaining_balance() == initial_balance()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<T> {
    entries: Vec<AllocationEntry<T>>,
    initial_balance: u64,
    remaining_balance: u64,
}

impl<T> Distribution<T> {
    pub(crate) const fn new(
        entries: Vec<AllocationEntry<T>>,
        initial_balance: u64,
        remaining_balance: u64,
    ) -> Self {
        Self {
            entries,
            initial_balance,
            remaining_balance,
        }
    }

    /// Winners in award order.
    #[must_use]
    pub fn entries(&self) -> &[AllocationEntry<T>] {
        &self.entries
    }

    /// Consume the distribution and return its entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<AllocationEntry<T>> {
        self.entries
    }

    /// Balance available before any prize was handed out.
    #[must_use]
    pub const fn initial_balance(&self) -> u64 {
        self.initial_balance
    }

    /// Balance left once every entry has been awarded.
    #[must_use]
    pub const fn remaining_balance(&self) -> u64 {
        self.remaining_balance
    }

    /// Sum of all prizes.
    #[must_use]
    pub fn total_awarded(&self) -> u64 {
        self.entries.iter().map(|entry| entry.prize).sum()
    }

    /// Whether no prize is handed out at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
