use lazy_static::lazy_static;
use mut_static::MutStatic;
use crate::RSA;

/// Sieve memory stays bounded and `p * q` stays far below `i64::MAX`.
pub const PRIME_LIMIT_MAX: usize = 1 << 26;

lazy_static! {
    pub static ref CONFIG_DEF: RSA = RSA {
        mode: String::from("demo"),
        message: 747257,
        signature: 0,
        exponent: 0,
        modulus: 0,
        prime_limit: 10000,
        exponent_min: 2, exponent_max: 10001,
        attempts: 100000,
        seed: 0,
        strict: false,
        rounds: 64,
        silent: false,
        threads: num_cpus::get(),
    };
    pub static ref SILENT: MutStatic<bool> =
        MutStatic::new();
}

/// Unset counts as verbose.
pub fn is_silent() -> bool {
    SILENT.read().map(|s| *s).unwrap_or(false)
}
