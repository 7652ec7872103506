//! Error types for fallible reservation.

use std::collections::TryReserveError;

use crate::str_map::MAX_ITEMS;

/// Reasons `StrMap::try_reserve` can fail.
///
/// The infallible paths (`insert`, `reserve`) treat both as fatal.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TableError {
    /// The table would need to hold more items than slot indices can
    /// address.
    #[error("cannot hold {requested} items, at most {max} fit", max = MAX_ITEMS)]
    CapacityOverflow {
        /// Total item count the reservation asked for, saturated at
        /// `usize::MAX`.
        requested: usize,
    },

    /// The allocator refused to grow the slot table or the item arena.
    #[error("failed to allocate table storage: {0}")]
    Alloc(#[from] TryReserveError),
}
