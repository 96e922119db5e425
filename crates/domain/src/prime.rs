// crates/domain/src/prime.rs
use word_count_shared_kernel::{Result, verify};

/// Largest prime below 2^32; table sizes never exceed it so that probe
/// indices and hash moduli stay within 32 bits.
pub const PRIME_CEILING: usize = 4_294_967_291;

/// Trial division by odd divisors while `d * d <= n`.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    // u64 keeps `d * d` exact on 32-bit targets
    let n = n as u64;
    let mut d: u64 = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest odd prime `>= n`.
///
/// # Errors
///
/// Returns an invariant violation when `n` exceeds [`PRIME_CEILING`].
pub fn next_prime(n: usize) -> Result<usize> {
    verify!(
        n <= PRIME_CEILING,
        "requested size {n} exceeds the prime ceiling {PRIME_CEILING}"
    );

    let mut candidate = n.max(3) | 1;
    while !is_prime(candidate) {
        candidate += 2;
    }
    Ok(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_primes() {
        let primes: Vec<usize> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn squares_of_primes_are_not_prime() {
        for n in [9, 25, 49, 121, 169, 65_521 * 65_521] {
            assert!(!is_prime(n), "{n}");
        }
    }

    #[test]
    fn next_prime_is_odd_and_not_below_request() {
        assert_eq!(next_prime(0).unwrap(), 3);
        assert_eq!(next_prime(2).unwrap(), 3);
        assert_eq!(next_prime(7).unwrap(), 7);
        assert_eq!(next_prime(9).unwrap(), 11);
        assert_eq!(next_prime(14).unwrap(), 17);
        assert_eq!(next_prime(512).unwrap(), 521);
        assert_eq!(next_prime(1024).unwrap(), 1031);
    }

    #[test]
    fn ceiling_is_prime_and_enforced() {
        assert_eq!(next_prime(PRIME_CEILING).unwrap(), PRIME_CEILING);
        let err = next_prime(PRIME_CEILING + 1).unwrap_err();
        assert!(err.is_internal());
    }
}
