use std::fmt::{Display, Formatter};
use crate::rsa::keys::{PrivateKey, PublicKey};

/// Both halves always share one modulus, so the fields stay private.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    public: PublicKey,
    private: PrivateKey,
}

impl KeyPair {
    pub(crate) fn new(public: PublicKey, private: PrivateKey) -> Self {
        debug_assert_eq!(public.modulus, private.modulus);
        Self { public, private }
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    pub fn private(&self) -> &PrivateKey {
        &self.private
    }

    pub fn modulus(&self) -> i64 {
        self.public.modulus
    }
}

impl Display for KeyPair {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "PUBLIC_ key: {{exponent: {}, modulus: {}}}", self.public.exponent, self.public.modulus)?;
        write!(f, "PRIVATE key: {{exponent: {}, modulus: {}}}", self.private.exponent, self.private.modulus)
    }
}
