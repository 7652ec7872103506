//! Key hashing strategies.

use core::hash::Hasher;
use rustc_hash::FxHasher;

const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
const FNV_PRIME: u32 = 16_777_619;

/// 32-bit hash of a key's bytes, used for slot placement and as the cached
/// probe filter.
///
/// Implementations must be deterministic: the same bytes always produce the
/// same hash for the lifetime of a table, since rehashing reuses the cached
/// value instead of hashing keys again.
pub trait KeyHash {
    fn hash_key(&self, key: &[u8]) -> u32;
}

impl<F> KeyHash for F
where
    F: Fn(&[u8]) -> u32,
{
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        self(key)
    }
}

/// FNV-1a, the default strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fnv1a;

impl KeyHash for Fnv1a {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        fnv1a(key)
    }
}

/// `FxHasher` from `rustc-hash`, folded to 32 bits. Faster than FNV-1a on
/// long keys, weaker on adversarial ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FxKeyHash;

impl KeyHash for FxKeyHash {
    #[inline]
    fn hash_key(&self, key: &[u8]) -> u32 {
        let mut h = FxHasher::default();
        h.write(key);
        let full = h.finish();
        (full ^ (full >> 32)) as u32
    }
}

/// FNV-1a over `bytes`: XOR each byte into the state, then multiply by the
/// FNV prime, wrapping at 32 bits.
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Default hash of a text key.
#[inline]
pub fn hash(key: &str) -> u32 {
    fnv1a(key.as_bytes())
}
