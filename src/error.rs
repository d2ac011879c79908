//! Error types.

use crate::FIELD_BYTES;
use alloc::{boxed::Box, string::String};
use core::fmt;

/// Result type with the `fermat-chain` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested modulus name is not registered.
    UnknownModulus(String),

    /// A byte encoding did not have the length a field element needs.
    MalformedInput {
        /// Required length in bytes.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// The chain evaluator disagreed with the reference oracle, or a field-inverse property
    /// failed, on a specific input.
    VerificationMismatch(Box<Mismatch>),

    /// The input stream feeding the streamed population is closed or unreadable.
    EntropyUnavailable,

    /// An addition chain failed its load-time checks.
    InvalidChain(ChainDefect),

    /// A harness parameter exceeds its upper bound.
    ConfigOutOfRange {
        /// Name of the parameter.
        parameter: &'static str,
        /// Largest accepted value.
        max: u64,
        /// Value supplied.
        actual: u64,
    },

    /// A hex string contained a character other than `0-9`, `a-f` or `A-F`.
    InvalidDigit,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownModulus(name) => write!(f, "unknown modulus: {name:?}"),
            Error::MalformedInput { expected, actual } => {
                write!(f, "malformed input: expected {expected} bytes, got {actual}")
            }
            Error::VerificationMismatch(mismatch) => write!(f, "verification failed: {mismatch}"),
            Error::EntropyUnavailable => f.write_str("input stream exhausted"),
            Error::InvalidChain(defect) => write!(f, "invalid addition chain: {defect}"),
            Error::ConfigOutOfRange {
                parameter,
                max,
                actual,
            } => write!(f, "{parameter} = {actual} exceeds the maximum of {max}"),
            Error::InvalidDigit => f.write_str("invalid hex digit"),
        }
    }
}

impl core::error::Error for Error {}

impl From<ChainDefect> for Error {
    fn from(defect: ChainDefect) -> Self {
        Error::InvalidChain(defect)
    }
}

impl From<Mismatch> for Error {
    fn from(mismatch: Mismatch) -> Self {
        Error::VerificationMismatch(Box::new(mismatch))
    }
}

/// Structural defect found while validating an [`AdditionChain`][`crate::AdditionChain`].
///
/// `step` is the zero-based index of the offending step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainDefect {
    /// The chain has no steps.
    Empty,
    /// `Square(0)` does nothing and is almost certainly a typo.
    ZeroSquaring {
        /// Offending step.
        step: usize,
    },
    /// A register slot is outside the register file.
    RegisterOutOfRange {
        /// Offending step.
        step: usize,
    },
    /// `Save` targets the input register.
    InputOverwritten {
        /// Offending step.
        step: usize,
    },
    /// `Multiply` references a register that has not been saved yet.
    UndefinedRegister {
        /// Offending step.
        step: usize,
    },
    /// Two different names refer to the same register slot.
    RegisterNameConflict {
        /// Offending step.
        step: usize,
    },
    /// The total number of squarings no longer fits in a `u32`.
    TooManySquarings {
        /// Offending step.
        step: usize,
    },
    /// The total number of multiplications no longer fits in a `u32`.
    TooManyMultiplications {
        /// Offending step.
        step: usize,
    },
}

impl fmt::Display for ChainDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChainDefect::Empty => f.write_str("no steps"),
            ChainDefect::ZeroSquaring { step } => write!(f, "step {step}: zero squarings"),
            ChainDefect::RegisterOutOfRange { step } => {
                write!(f, "step {step}: register slot out of range")
            }
            ChainDefect::InputOverwritten { step } => {
                write!(f, "step {step}: saves over the input register")
            }
            ChainDefect::UndefinedRegister { step } => {
                write!(f, "step {step}: multiplies by a register before it is saved")
            }
            ChainDefect::RegisterNameConflict { step } => {
                write!(f, "step {step}: register slot reused under another name")
            }
            ChainDefect::TooManySquarings { step } => {
                write!(f, "step {step}: squaring count overflows u32")
            }
            ChainDefect::TooManyMultiplications { step } => {
                write!(f, "step {step}: multiplication count overflows u32")
            }
        }
    }
}

/// Field-inverse property checked by the verification harness.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Property {
    /// The chain expands to an exponent other than `p - 2`.
    ChainExponent,
    /// The result is not in `[0, p)`.
    CanonicalRange,
    /// The result differs from the arbitrary-precision oracle.
    OracleEquivalence,
    /// `x * inverse(x) ≢ 1` for a non-zero `x`, or `inverse(0) ≠ 0`.
    Correctness,
    /// `inverse(inverse(x)) ≢ x`.
    RoundTrip,
    /// Two encodings of the same residue produced different results.
    ReductionAgreement,
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Property::ChainExponent => "chain exponent",
            Property::CanonicalRange => "canonical range",
            Property::OracleEquivalence => "oracle equivalence",
            Property::Correctness => "correctness",
            Property::RoundTrip => "round trip",
            Property::ReductionAgreement => "reduction agreement",
        })
    }
}

/// A failing `(modulus, input)` pair, with the literal bytes needed to reproduce it.
///
/// All byte strings are the canonical 32-byte little-endian encoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Name of the modulus under test.
    pub modulus: &'static str,
    /// Property that failed.
    pub property: Property,
    /// Input as supplied to the evaluator.
    pub input: [u8; FIELD_BYTES],
    /// Value the property required, where there is a single right answer.
    pub expected: Option<[u8; FIELD_BYTES]>,
    /// Value the evaluator produced.
    pub actual: [u8; FIELD_BYTES],
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} failed for input ", self.modulus, self.property)?;
        write_hex(f, &self.input)?;
        if let Some(expected) = &self.expected {
            f.write_str(" expected ")?;
            write_hex(f, expected)?;
        }
        f.write_str(" got ")?;
        write_hex(f, &self.actual)
    }
}

/// Bytes in storage order (little-endian), so the output can be piped straight back in.
fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for byte in bytes {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}
