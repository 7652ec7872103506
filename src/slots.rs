//! SlotTable: open-addressing index from bucket position to arena index.

use core::num::NonZeroU32;

use crate::check::table_assert;
use crate::error::TableError;

/// One probe position. `item` holds `arena index + 1`; `None` is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Slot {
    hash: u32,
    item: Option<NonZeroU32>,
}

// The niche in NonZeroU32 keeps a slot at two words.
const _: () = assert!(core::mem::size_of::<Slot>() == 8);

impl Slot {
    pub(crate) const EMPTY: Slot = Slot {
        hash: 0,
        item: None,
    };

    /// Callers keep `index < MAX_ITEMS`, so `index + 1` fits in a `u32`.
    fn occupied(hash: u32, index: usize) -> Self {
        Slot {
            hash,
            item: Some(NonZeroU32::MIN.saturating_add(index as u32)),
        }
    }

    #[cfg(test)]
    pub(crate) fn hash(&self) -> u32 {
        self.hash
    }

    #[inline]
    pub(crate) fn item(&self) -> Option<usize> {
        self.item.map(|i| (i.get() - 1) as usize)
    }
}

/// Outcome of a probe walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    /// Arena index of the matching item.
    Found(usize),
    /// The walk hit an empty slot before any match.
    Vacant(usize),
    /// Every slot was visited without a match or an empty slot.
    Exhausted,
}

#[derive(Debug)]
pub(crate) struct SlotTable {
    slots: Box<[Slot]>,
}

impl SlotTable {
    /// `len` must be non-zero.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![Slot::EMPTY; len].into_boxed_slice(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    fn start(&self, hash: u32) -> usize {
        hash as usize % self.slots.len()
    }

    /// Walks from `hash mod len`, wrapping once around the table. Stops at
    /// the first empty slot or at the first slot whose cached hash equals
    /// `hash` and whose item satisfies `matches`.
    pub(crate) fn probe<F>(&self, hash: u32, mut matches: F) -> Probe
    where
        F: FnMut(usize) -> bool,
    {
        let len = self.slots.len();
        let mut idx = self.start(hash);
        for _ in 0..len {
            let slot = self.slots[idx];
            match slot.item() {
                None => return Probe::Vacant(idx),
                Some(item) if slot.hash == hash && matches(item) => {
                    return Probe::Found(item);
                }
                Some(_) => {}
            }
            idx = (idx + 1) % len;
        }
        Probe::Exhausted
    }

    /// Writes `(hash, item)` into a slot previously reported `Vacant`.
    pub(crate) fn occupy(&mut self, slot: usize, hash: u32, item: usize) {
        debug_assert!(self.slots[slot].item.is_none(), "slot {slot} already occupied");
        self.slots[slot] = Slot::occupied(hash, item);
    }

    /// Marks every slot empty without releasing memory.
    pub(crate) fn clear(&mut self) {
        self.slots.fill(Slot::EMPTY);
    }

    /// Replaces the slot array with an empty one of `new_len` slots and
    /// re-places every occupied slot by cached hash. Arena indices are
    /// carried over untouched.
    pub(crate) fn try_rehash(&mut self, new_len: usize) -> Result<(), TableError> {
        let mut fresh = Vec::new();
        fresh.try_reserve_exact(new_len)?;
        fresh.resize(new_len, Slot::EMPTY);

        for slot in self.slots.iter().filter(|s| s.item.is_some()) {
            let mut idx = slot.hash as usize % new_len;
            let mut placed = false;
            for _ in 0..new_len {
                if fresh[idx].item.is_none() {
                    fresh[idx] = *slot;
                    placed = true;
                    break;
                }
                idx = (idx + 1) % new_len;
            }
            table_assert!(placed, "rehash into {new_len} slots ran out of room");
        }

        self.slots = fresh.into_boxed_slice();
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_items(t: &SlotTable) -> Vec<usize> {
        let mut v: Vec<usize> = t.iter().filter_map(Slot::item).collect();
        v.sort_unstable();
        v
    }

    /// Invariant: a fresh table is entirely empty and probes end at the
    /// home bucket.
    #[test]
    fn fresh_table_is_empty() {
        let t = SlotTable::new(8);
        assert_eq!(t.len(), 8);
        assert!(t.iter().all(|s| s.item().is_none()));
        assert_eq!(t.probe(13, |_| true), Probe::Vacant(13 % 8));
    }

    /// Invariant: index 0 round-trips through the `index + 1` encoding, and
    /// so does the largest index the arena may hand out.
    #[test]
    fn slot_encoding_round_trips() {
        assert_eq!(Slot::occupied(1, 0).item(), Some(0));
        let last = crate::MAX_ITEMS - 1;
        assert_eq!(Slot::occupied(1, last).item(), Some(last));
        assert_eq!(Slot::EMPTY.item(), None);
    }

    /// Invariant: colliding hashes probe linearly and wrap past the end.
    #[test]
    fn linear_probe_wraps_around() {
        let mut t = SlotTable::new(4);
        // All three land in bucket 3 and spill into 0 and 1.
        for item in 0..3 {
            match t.probe(7, |_| false) {
                Probe::Vacant(slot) => t.occupy(slot, 7, item),
                other => panic!("unexpected probe result: {:?}", other),
            }
        }
        assert_eq!(t.probe(7, |i| i == 0), Probe::Found(0));
        assert_eq!(t.probe(7, |i| i == 2), Probe::Found(2));
        assert_eq!(t.probe(7, |_| false), Probe::Vacant(2));
        // Slot 1 holds item 2, so the walk really did pass index 0.
        assert_eq!(t.iter().nth(1).and_then(Slot::item), Some(2));
    }

    /// Invariant: the matcher only runs for slots whose cached hash matches.
    #[test]
    fn hash_filters_before_matcher() {
        let mut t = SlotTable::new(4);
        t.occupy(1, 1, 0);
        let mut calls = 0;
        let res = t.probe(5, |_| {
            calls += 1;
            true
        });
        assert_eq!(res, Probe::Vacant(2));
        assert_eq!(calls, 0);
    }

    /// Invariant: a completely full table without a match reports
    /// exhaustion after one lap.
    #[test]
    fn full_table_exhausts() {
        let mut t = SlotTable::new(2);
        t.occupy(0, 0, 0);
        t.occupy(1, 1, 1);
        assert_eq!(t.probe(0, |_| false), Probe::Exhausted);
    }

    /// Invariant: rehash keeps every (hash, item) pair and places it at or
    /// after its new home bucket.
    #[test]
    fn rehash_preserves_pairs() {
        let mut t = SlotTable::new(4);
        let pairs = [(3u32, 0usize), (7, 1), (10, 2)];
        for (hash, item) in pairs {
            match t.probe(hash, |_| false) {
                Probe::Vacant(slot) => t.occupy(slot, hash, item),
                other => panic!("unexpected probe result: {:?}", other),
            }
        }
        t.try_rehash(8).unwrap();
        assert_eq!(t.len(), 8);
        assert_eq!(occupied_items(&t), vec![0, 1, 2]);
        for (hash, item) in pairs {
            assert_eq!(t.probe(hash, |i| i == item), Probe::Found(item));
        }
    }

    /// Invariant: clear empties slots but keeps the table size.
    #[test]
    fn clear_keeps_len() {
        let mut t = SlotTable::new(4);
        t.occupy(2, 2, 0);
        t.clear();
        assert_eq!(t.len(), 4);
        assert!(occupied_items(&t).is_empty());
    }
}
