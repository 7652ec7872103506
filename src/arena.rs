//! ItemArena: append-only `(key, value)` storage addressed by index.

use crate::error::TableError;

/// Capacity of the first arena allocation.
pub(crate) const MIN_ARENA_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Item<'a> {
    pub(crate) key: &'a str,
    pub(crate) value: &'a str,
}

/// Items live at `[0, len)` in insertion order and never move, so an index
/// stays valid across growth. `capacity` is the doubling policy's value; the
/// backing `Vec` is always at least that large.
#[derive(Debug, Default)]
pub(crate) struct ItemArena<'a> {
    items: Vec<Item<'a>>,
    capacity: usize,
}

impl<'a> ItemArena<'a> {
    pub(crate) const fn new() -> Self {
        Self {
            items: Vec::new(),
            capacity: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Smallest doubling of the current capacity (16 when unallocated)
    /// that holds `needed` items.
    fn grown_capacity(&self, needed: usize) -> usize {
        let mut cap = if self.capacity == 0 {
            MIN_ARENA_CAPACITY
        } else {
            self.capacity
        };
        while cap < needed {
            cap = cap.saturating_mul(2);
        }
        cap
    }

    /// Ensures room for `needed` items in total.
    pub(crate) fn try_reserve_total(&mut self, needed: usize) -> Result<(), TableError> {
        if needed <= self.capacity {
            return Ok(());
        }
        let cap = self.grown_capacity(needed);
        self.items.try_reserve_exact(cap - self.items.len())?;
        self.capacity = cap;
        Ok(())
    }

    /// Appends an item and returns its index.
    pub(crate) fn push(&mut self, key: &'a str, value: &'a str) -> usize {
        let index = self.items.len();
        self.items.push(Item { key, value });
        index
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&Item<'a>> {
        self.items.get(index)
    }

    /// Swaps in a new value for the item at `index`, keeping its key, and
    /// returns the old value.
    pub(crate) fn replace_value(&mut self, index: usize, value: &'a str) -> Option<&'a str> {
        self.items
            .get_mut(index)
            .map(|item| core::mem::replace(&mut item.value, value))
    }

    /// Forgets every item; the allocation and the policy capacity stay.
    pub(crate) fn clear(&mut self) {
        self.items.clear();
    }

    pub(crate) fn as_slice(&self) -> &[Item<'a>] {
        &self.items
    }
}
