use rand::Rng;
use crate::rsa::config::PRIME_LIMIT_MAX;
use crate::rsa::error::RsaError;
use crate::RSA;

impl RSA {
    /// Exact trial division over `6k +- 1`.
    pub fn is_prime(n: i64) -> bool {
        if n <= 1 { return false; }
        if n == 2 || n == 3 { return true; }
        if n % 2 == 0 || n % 3 == 0 { return false; }
        let mut i: i64 = 5;
        while i <= n / i {
            if n % i == 0 || n % (i + 2) == 0 { return false; }
            i += 6;
        }
        true
    }

    /// All primes `<= limit`, ascending. Recomputed on every call.
    pub fn sieve_of_eratosthenes(limit: usize) -> Vec<i64> {
        if limit < 2 { return Vec::new(); }
        let mut is_prime = vec![true; limit + 1];
        let mut p = 2;
        while p * p <= limit {
            if is_prime[p] {
                for i in (p * p..=limit).step_by(p) {
                    is_prime[i] = false;
                }
            }
            p += 1;
        }
        (2..=limit)
            .filter(|&p| is_prime[p])
            .map(|p| p as i64)
            .collect()
    }

    /// Draws uniformly from the sieve output and re-validates each draw before
    /// accepting it. Gives up after `self.attempts` draws.
    pub fn generate_random_prime<R: Rng>(&self, rng: &mut R) -> Result<i64, RsaError> {
        if self.prime_limit > PRIME_LIMIT_MAX {
            return Err(RsaError::InvalidConfig(format!(
                "prime limit {} above {}", self.prime_limit, PRIME_LIMIT_MAX)));
        }
        let primes = RSA::sieve_of_eratosthenes(self.prime_limit);
        if primes.is_empty() {
            return Err(RsaError::EmptyCandidatePool(self.prime_limit));
        }
        for _ in 0..self.attempts {
            let candidate = primes[rng.gen_range(0..primes.len())];
            if RSA::is_prime(candidate) {
                return Ok(candidate);
            }
        }
        Err(RsaError::NoCandidateFound("prime", self.attempts))
    }

    /// Splits `n` into its smallest prime factor and the cofactor.
    /// Only practical for toy moduli.
    pub fn factor(n: i64) -> Option<(i64, i64)> {
        if n < 4 { return None; }
        if n % 2 == 0 { return Some((2, n / 2)); }
        let mut i: i64 = 3;
        while i <= n / i {
            if n % i == 0 { return Some((i, n / i)); }
            i += 2;
        }
        None
    }
}
