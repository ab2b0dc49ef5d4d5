//! Quadratic probe sequence.
//!
//! Starting at the home index, successive offsets grow by consecutive odd
//! numbers (1, 3, 5, ...), so the k-th position is `home + k^2` modulo the
//! table length. With a prime length the first `(length + 1) / 2`
//! positions are distinct, which is why the table keeps at least half of
//! its slots free of entries and tombstones.

use crate::hash::home_index;

#[derive(Debug, Clone)]
pub(crate) struct Probe {
    index: usize,
    step: usize,
    length: usize,
    remaining: usize,
}

impl Probe {
    /// Probe for `key` over `length` slots. Yields at most `length` indices
    /// so a saturated table ends the walk instead of looping.
    pub(crate) fn new(key: &[u8], length: usize) -> Self {
        Probe {
            index: home_index(key, length),
            step: 1,
            length,
            remaining: length,
        }
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let current = self.index;
        self.index = (self.index + self.step % self.length) % self.length;
        self.step += 2;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Probe {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::djb2;
    use std::collections::BTreeSet;

    /// Invariant: The k-th probed index is `home + k^2` mod length.
    #[test]
    fn offsets_are_squares() {
        let key = b"Heil_Hydra";
        let home = (djb2(key) % 13) as usize;
        let got: Vec<usize> = Probe::new(key, 13).collect();
        let want: Vec<usize> = (0..13).map(|k| (home + k * k) % 13).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn starts_at_home_index() {
        for length in [2usize, 3, 13, 29] {
            let first = Probe::new(b"Purple", length).next();
            assert_eq!(first, Some(home_index(b"Purple", length)));
        }
    }

    /// Invariant: With a prime length the first half-plus-one positions are distinct.
    #[test]
    fn first_half_is_distinct_for_primes() {
        for length in [2usize, 3, 5, 7, 11, 13, 29, 59, 127] {
            let seen: BTreeSet<usize> = Probe::new(b"MSI", length)
                .take((length + 1) / 2)
                .collect();
            assert_eq!(seen.len(), (length + 1) / 2, "length {length}");
        }
    }

    #[test]
    fn bounded_by_length() {
        let probe = Probe::new(b"power", 13);
        assert_eq!(probe.len(), 13);
        assert_eq!(probe.count(), 13);
    }
}
