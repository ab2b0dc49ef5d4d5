//! Prime lengths for the slot array.

/// Trial division up to the square root of `n`.
pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut d = 3usize;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`, stepping one candidate at a time.
///
/// Returns `None` if the search would run past `usize::MAX`.
pub(crate) fn next_prime_at_least(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

/// Length the slot array grows to from `length`: the smallest prime at
/// least twice as large.
pub(crate) fn grown_length(length: usize) -> Option<usize> {
    next_prime_at_least(length.checked_mul(2)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    /// Invariant: Perfect squares of primes are rejected (the bound is inclusive).
    #[test]
    fn squares_are_composite() {
        for p in [3usize, 5, 7, 11, 13, 101] {
            assert!(!is_prime(p * p));
        }
    }

    #[test]
    fn next_prime_search() {
        assert_eq!(next_prime_at_least(0), Some(2));
        assert_eq!(next_prime_at_least(13), Some(13));
        assert_eq!(next_prime_at_least(14), Some(17));
        assert_eq!(next_prime_at_least(26), Some(29));
    }

    /// Invariant: Growth yields a prime at least double the old length.
    #[test]
    fn growth_sequence_from_default() {
        let mut len = 13;
        for expected in [29, 59, 127, 257, 521] {
            let next = grown_length(len).unwrap();
            assert_eq!(next, expected);
            assert!(is_prime(next) && next >= 2 * len);
            len = next;
        }
    }

    #[test]
    fn growth_overflow_is_none() {
        assert_eq!(grown_length(usize::MAX / 2 + 1), None);
    }
}
