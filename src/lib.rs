//! arena-strmap: an append-only, open-addressed string map that borrows
//! its keys and values instead of copying them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, inspectable map for hot paths such as protocol header
//!   parsing, with no per-entry heap allocation.
//! - Layers:
//!   - SlotTable: the probe index. Each slot holds a cached `u32` hash and
//!     either nothing or the arena index of an item. Collisions resolve by
//!     linear probing with wraparound.
//!   - ItemArena<'a>: densely packed `(key, value)` pairs in insertion
//!     order. Indices never move, so slots refer to items by index.
//!   - StrMap<'a, H>: public API tying the two together with a pluggable
//!     `KeyHash` strategy (FNV-1a by default).
//!
//! Constraints
//! - Single-threaded: lookups take `&self`, mutation takes `&mut self`; no
//!   atomics or locks.
//! - Append-only: entries are never removed individually. `clear()` drops
//!   them all while keeping both allocations.
//! - Borrowed storage: keys and values are `&'a str`; the caller owns the
//!   bytes and the borrow checker ties their lifetime to the map.
//! - Byte-wise key equality; no Unicode normalization.
//!
//! Growth
//! - The arena starts at 16 items and doubles.
//! - The slot table doubles whenever the pending item count would exceed
//!   75% of the slots. Rehash reuses cached hashes; `KeyHash` is never
//!   invoked for existing entries.
//! - Both checks run together before every insert (`reserve(1)`).
//!
//! Bounds
//! - Slots store `index + 1` in a `NonZeroU32`, so the map holds at most
//!   `MAX_ITEMS` (`u32::MAX - 1`) entries.
//!
//! Failure policy
//! - Allocation failure, index overflow and a probe that wraps a full
//!   table during insert are fatal and panic. The `strip-asserts` feature
//!   compiles these checks out. `try_reserve` is the recoverable path and
//!   reports a `TableError`.

mod arena;
mod check;
mod cmp;
mod error;
mod hash;
mod slots;
mod str_map;
mod str_map_proptest;

// Public surface
pub use cmp::byte_compare;
pub use error::TableError;
pub use hash::{fnv1a, hash, Fnv1a, FxKeyHash, KeyHash};
pub use str_map::{Iter, Keys, StrMap, Values, DEFAULT_SLOTS, MAX_ITEMS};
