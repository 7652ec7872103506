use core::cmp::Ordering;

/// Byte-wise lexicographic comparison, the ordering of C's `strcmp`: the
/// first differing byte decides, and a proper prefix sorts first.
///
/// Key equality in the map is `byte_compare(a, b).is_eq()`.
pub fn byte_compare(lhs: &[u8], rhs: &[u8]) -> Ordering {
    for (l, r) in lhs.iter().zip(rhs) {
        if l != r {
            return l.cmp(r);
        }
    }
    lhs.len().cmp(&rhs.len())
}
