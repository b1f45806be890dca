use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

#[derive(PartialEq)]
pub enum RsaError {
    InvalidModulus(i64),
    NoInverseExists(i64, i64),
    EmptyCandidatePool(usize),
    MessageOutOfRange(i64, i64),
    NoCandidateFound(&'static str, usize),
    EqualPrimes(i64),
    Overflow,
    InvalidConfig(String),
}

impl RsaError {
    fn display(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RsaError::InvalidModulus(m) => write!(f, "Invalid modulus {}, must be >= 1", m),
            RsaError::NoInverseExists(a, m) => write!(f, "No inverse of {} modulo {}: not coprime", a, m),
            RsaError::EmptyCandidatePool(limit) => write!(f, "No prime candidates below {}", limit),
            RsaError::MessageOutOfRange(v, m) => write!(f, "Value {} out of range [0, {})", v, m),
            RsaError::NoCandidateFound(what, attempts) => write!(f, "No {} found after {} attempts", what, attempts),
            RsaError::EqualPrimes(p) => write!(f, "p == q == {}, modulus would be a perfect square", p),
            RsaError::Overflow => write!(f, "Modulus does not fit in 64 bits"),
            RsaError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl Display for RsaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display(f)
    }
}

impl Debug for RsaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.display(f)
    }
}

impl Error for RsaError {}
