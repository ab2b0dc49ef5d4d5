//! djb2 rolling hash over raw key bytes.

/// Seed of the djb2 recurrence.
const SEED: u64 = 5381;

/// `h = h * 33 + b` for every byte, wrapping on overflow.
///
/// Pure and independent of any table state, so the home slot of a key is
/// reproducible from the key bytes and the table length alone.
#[inline]
pub fn djb2(key: &[u8]) -> u64 {
    key.iter().fold(SEED, |h, &b| {
        h.wrapping_mul(33).wrapping_add(u64::from(b))
    })
}

/// Home slot of `key` in a table of `length` slots.
#[inline]
pub(crate) fn home_index(key: &[u8], length: usize) -> usize {
    debug_assert!(length > 0);
    (djb2(key) % length as u64) as usize
}
