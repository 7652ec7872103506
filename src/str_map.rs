//! StrMap: public API over the slot table and item arena.

use core::fmt;
use core::iter::FusedIterator;

use crate::arena::{Item, ItemArena};
use crate::check::{table_assert, table_fatal};
use crate::cmp::byte_compare;
use crate::error::TableError;
use crate::hash::{Fnv1a, KeyHash};
use crate::slots::{Probe, SlotTable};

/// Maximum number of entries. Slots encode `index + 1` in a `u32`, which
/// leaves `u32::MAX - 1` usable indices.
pub const MAX_ITEMS: usize = u32::MAX as usize - 1;

/// Slot count used by `StrMap::default()`.
pub const DEFAULT_SLOTS: usize = 16;

/// Largest item count a table of `slot_count` slots may hold (75% load).
#[inline]
fn load_limit(slot_count: usize) -> usize {
    slot_count.saturating_mul(3) / 4
}

/// Append-only map from borrowed text keys to borrowed text values.
///
/// The map never copies key or value bytes: it stores the `&'a str`
/// references it is given, so everything inserted must outlive the map.
/// Entries cannot be removed one at a time; [`StrMap::clear`] drops them all
/// and keeps the memory for reuse.
///
/// ```
/// use arena_strmap::StrMap;
///
/// let mut headers = StrMap::new(4);
/// headers.insert("host", "example.org");
/// assert_eq!(headers.get("host"), Some("example.org"));
/// assert!(!headers.contains_key("missing"));
/// ```
pub struct StrMap<'a, H = Fnv1a> {
    hasher: H,
    slots: SlotTable,
    items: ItemArena<'a>,
}

impl<'a> StrMap<'a> {
    /// Creates an empty map with `slot_count` probe slots and no arena
    /// allocation. `slot_count` must be at least one.
    pub fn new(slot_count: usize) -> Self {
        Self::with_hasher(slot_count, Fnv1a)
    }
}

impl<'a> Default for StrMap<'a> {
    fn default() -> Self {
        Self::new(DEFAULT_SLOTS)
    }
}

impl<'a, H> StrMap<'a, H>
where
    H: KeyHash,
{
    /// Creates an empty map that hashes keys with `hasher`.
    pub fn with_hasher(slot_count: usize, hasher: H) -> Self {
        table_assert!(slot_count > 0, "a table needs at least one slot");
        Self {
            hasher,
            slots: SlotTable::new(slot_count.max(1)),
            items: ItemArena::new(),
        }
    }

    /// Hash of `key` under this map's strategy.
    #[inline]
    pub fn hash(&self, key: &str) -> u32 {
        self.hasher.hash_key(key.as_bytes())
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.len() == 0
    }

    /// Number of probe slots currently allocated.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of entries the arena holds before it has to grow.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    fn probe(&self, hash: u32, key: &str) -> Probe {
        self.slots.probe(hash, |index| {
            self.items
                .get(index)
                .is_some_and(|item| byte_compare(item.key.as_bytes(), key.as_bytes()).is_eq())
        })
    }

    fn find(&self, key: &str) -> Option<&Item<'a>> {
        match self.probe(self.hash(key), key) {
            Probe::Found(index) => self.items.get(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Value stored for `key`. The returned reference borrows the caller's
    /// buffer, not the map.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.find(key).map(|item| item.value)
    }

    /// Stored key and value for `key`. The stored key is the reference
    /// passed to the first `insert` of that key.
    pub fn get_key_value(&self, key: &str) -> Option<(&'a str, &'a str)> {
        self.find(key).map(|item| (item.key, item.value))
    }

    /// Inserts `key -> value`, or replaces the value if `key` is present.
    ///
    /// Returns the previous value on replacement. Replacing keeps the
    /// originally stored key reference and never grows the arena. Growth
    /// failures are fatal; use [`StrMap::try_reserve`] beforehand to handle
    /// them.
    pub fn insert(&mut self, key: &'a str, value: &'a str) -> Option<&'a str> {
        self.reserve(1);

        let hash = self.hash(key);
        match self.probe(hash, key) {
            Probe::Found(index) => self.items.replace_value(index, value),
            Probe::Vacant(slot) => {
                let index = self.items.push(key, value);
                self.slots.occupy(slot, hash, index);
                None
            }
            Probe::Exhausted => {
                table_fatal!("probe wrapped a full slot table: corrupted map");
                None
            }
        }
    }

    /// Pre-grows for `extra` upcoming inserts. Failure is fatal.
    pub fn reserve(&mut self, extra: usize) {
        if let Err(err) = self.try_reserve(extra) {
            table_fatal!("reserve({extra}) failed: {err}");
        }
    }

    /// Pre-grows for `extra` upcoming inserts.
    ///
    /// The arena grows by doubling (starting at 16) until it holds
    /// `len + extra` items; independently, the slot table doubles until
    /// `len + extra` stays within 75% load, and existing slots are re-placed
    /// using their cached hashes. On error the map is unchanged except that
    /// an arena growth that already succeeded is kept.
    pub fn try_reserve(&mut self, extra: usize) -> Result<(), TableError> {
        let needed = match self.items.len().checked_add(extra) {
            Some(n) if n <= MAX_ITEMS => n,
            other => {
                return Err(TableError::CapacityOverflow {
                    requested: other.unwrap_or(usize::MAX),
                })
            }
        };

        self.items.try_reserve_total(needed)?;

        if needed > load_limit(self.slots.len()) {
            let mut slot_count = self.slots.len();
            while needed > load_limit(slot_count) {
                slot_count = slot_count
                    .checked_mul(2)
                    .ok_or(TableError::CapacityOverflow { requested: needed })?;
            }
            self.slots.try_rehash(slot_count)?;
        }
        Ok(())
    }

    /// Removes every entry. Both the slot table and the arena keep their
    /// memory; the referenced key and value buffers are left alone.
    pub fn clear(&mut self) {
        self.items.clear();
        self.slots.clear();
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> Iter<'_, 'a> {
        Iter {
            it: self.items.as_slice().iter(),
        }
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Keys<'_, 'a> {
        Keys { it: self.iter() }
    }

    /// Values in key insertion order.
    pub fn values(&self) -> Values<'_, 'a> {
        Values { it: self.iter() }
    }
}

impl<'a, H: KeyHash> fmt::Debug for StrMap<'a, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, H: KeyHash> Extend<(&'a str, &'a str)> for StrMap<'a, H> {
    fn extend<T: IntoIterator<Item = (&'a str, &'a str)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, H: KeyHash + Default> FromIterator<(&'a str, &'a str)> for StrMap<'a, H> {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        let mut map = StrMap::with_hasher(DEFAULT_SLOTS, H::default());
        map.extend(iter);
        map
    }
}

impl<'m, 'a, H: KeyHash> IntoIterator for &'m StrMap<'a, H> {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'m, 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs in insertion order.
#[derive(Clone)]
pub struct Iter<'m, 'a> {
    it: core::slice::Iter<'m, Item<'a>>,
}

impl<'m, 'a> Iterator for Iter<'m, 'a> {
    type Item = (&'a str, &'a str);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|item| (item.key, item.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}
impl FusedIterator for Iter<'_, '_> {}

/// Iterator over keys in insertion order.
#[derive(Clone)]
pub struct Keys<'m, 'a> {
    it: Iter<'m, 'a>,
}

impl<'m, 'a> Iterator for Keys<'m, 'a> {
    type Item = &'a str;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(k, _)| k)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_, '_> {}

/// Iterator over values in key insertion order.
#[derive(Clone)]
pub struct Values<'m, 'a> {
    it: Iter<'m, 'a>,
}

impl<'m, 'a> Iterator for Values<'m, 'a> {
    type Item = &'a str;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|(_, v)| v)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl ExactSizeIterator for Values<'_, '_> {}

#[cfg(test)]
impl<'a, H: KeyHash> StrMap<'a, H> {
    /// Checks the structural invariants tying slots to arena items.
    pub(crate) fn assert_invariants(&self) {
        let count = self.len();
        assert!(count <= self.capacity(), "len exceeds arena capacity");
        assert!(count <= load_limit(self.slot_count()), "load factor above 75%");

        let mut seen = vec![false; count];
        for slot in self.slots.iter() {
            let Some(index) = slot.item() else { continue };
            assert!(index < count, "slot refers past the arena");
            assert!(!seen[index], "item {index} referenced twice");
            seen[index] = true;
            let item = self.items.get(index).unwrap();
            assert_eq!(slot.hash(), self.hash(item.key), "stale cached hash");
        }
        assert!(seen.into_iter().all(|s| s), "unreferenced arena item");
    }
}
