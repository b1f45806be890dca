use num::Integer;
use num_traits::{One, Zero};
use crate::rsa::error::RsaError;
use crate::RSA;

impl RSA {
    /// Square-and-multiply `base ^ exponent mod modulus`, result in `[0, modulus)`.
    /// Products are widened to `i128` so a 64-bit modulus never overflows.
    pub fn mod_pow(base: i64, exponent: i64, modulus: i64) -> Result<i64, RsaError> {
        if modulus < 1 { return Err(RsaError::InvalidModulus(modulus)); }
        let n = modulus as i128;
        let mut a = (base as i128).rem_euclid(n);
        let mut q = exponent;
        let mut r: i128 = 1 % n;
        while q > 0 {
            if q.is_odd() { r = (r * a) % n; }
            q >>= 1;
            a = (a * a) % n;
        }
        Ok(r as i64)
    }

    pub fn gcd(a: i64, b: i64) -> i64 {
        let (mut a, mut b) = (a.abs(), b.abs());
        while !b.is_zero() {
            let r = a % b;
            a = b;
            b = r;
        }
        a
    }

    /// Returns `(gcd, x, y)` with `a * x + b * y == gcd`.
    fn extended_euclid(a: i64, b: i64) -> (i64, i64, i64) {
        if b.is_zero() {
            return (a, 1, 0);
        }
        let (q, r) = a.div_rem(&b);
        let (d, x, y) = RSA::extended_euclid(b, r);
        (d, y, x - q * y)
    }

    /// Inverse of `a` modulo `m` in `[0, m)`. `mod_inverse(a, 1) == 0`.
    pub fn mod_inverse(a: i64, m: i64) -> Result<i64, RsaError> {
        if m < 1 { return Err(RsaError::InvalidModulus(m)); }
        if m.is_one() { return Ok(0); }
        let (d, x, _) = RSA::extended_euclid(a.rem_euclid(m), m);
        if !d.is_one() {
            return Err(RsaError::NoInverseExists(a, m));
        }
        Ok(x.rem_euclid(m))
    }

    pub fn euler(p: i64, q: i64) -> Result<i64, RsaError> {
        (p - 1).checked_mul(q - 1).ok_or(RsaError::Overflow)
    }
}
