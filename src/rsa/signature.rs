//! Unpadded textbook RSA signatures.
//!
//! Signing raises the message to the private exponent and verifying raises the
//! signature to the public exponent. The verify step is the same computation as
//! decryption, which is why it is exposed both as `verify_signature` and as
//! `recover_message`.

use crate::rsa::error::RsaError;
use crate::rsa::keys::{Key, PrivateKey, PublicKey};
use crate::RSA;

impl RSA {
    /// s = m^d mod n
    pub fn sign(&self, message: i64, key: &PrivateKey) -> Result<i64, RsaError> {
        if self.strict { key.check_range(message)?; }
        RSA::mod_pow(message, key.exponent(), key.modulus())
    }

    /// m' = s^e mod n
    pub fn verify(&self, signature: i64, key: &PublicKey) -> Result<i64, RsaError> {
        if self.strict { key.check_range(signature)?; }
        RSA::mod_pow(signature, key.exponent(), key.modulus())
    }

    pub fn verify_signature(&self, signature: i64, key: &PublicKey) -> Result<i64, RsaError> {
        self.verify(signature, key)
    }

    pub fn recover_message(&self, signature: i64, key: &PublicKey) -> Result<i64, RsaError> {
        self.verify(signature, key)
    }

    /// True iff the signature recovers exactly `message`.
    pub fn check_signature(&self, signature: i64, message: i64, key: &PublicKey) -> Result<bool, RsaError> {
        if self.strict { key.check_range(message)?; }
        Ok(self.verify(signature, key)? == message)
    }
}
