pub mod key_pair;

pub use key_pair::*;

use crate::rsa::error::RsaError;

/// Common view of a public or private exponent paired with its modulus.
pub trait Key {
    fn exponent(&self) -> i64;
    fn modulus(&self) -> i64;

    /// Messages and signatures must lie in `[0, modulus)`.
    fn check_range(&self, value: i64) -> Result<(), RsaError> {
        if value < 0 || value >= self.modulus() {
            return Err(RsaError::MessageOutOfRange(value, self.modulus()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    pub exponent: i64,
    pub modulus: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey {
    pub exponent: i64,
    pub modulus: i64,
}

impl Key for PublicKey {
    fn exponent(&self) -> i64 { self.exponent }
    fn modulus(&self) -> i64 { self.modulus }
}

impl Key for PrivateKey {
    fn exponent(&self) -> i64 { self.exponent }
    fn modulus(&self) -> i64 { self.modulus }
}
