//! Constant-time inversion in 256-bit prime fields by Fermat's little theorem.
//!
//! # About
//! For a prime `p`, `x^(p - 2) ≡ x^-1 (mod p)` for every `x ≢ 0`, and `0^(p - 2) = 0`. This
//! crate evaluates that power with a hand-tuned [`AdditionChain`] per modulus: a fixed, public
//! sequence of squarings and multiplications by saved intermediate powers. The operations
//! performed never depend on the input, only on the chain.
//!
//! Chains are provided for six moduli, see [`MODULI`]:
//!
//! | Name           | Modulus                      |
//! |----------------|------------------------------|
//! | `BTC_p`        | secp256k1 base field         |
//! | `BTC_n`        | secp256k1 group order        |
//! | `P256_p`       | NIST P-256 base field        |
//! | `P256_n`       | NIST P-256 group order       |
//! | `SM2_p`        | SM2 base field               |
//! | `Curve25519_p` | Curve25519 base field        |
//!
//! Field arithmetic is four 64-bit limbs in Montgomery form ([`modular::MontyParams`]), all
//! `const fn`, so every modulus and its parameters are computed at compile time. Each chain is
//! also checked structurally at compile time.
//!
//! # Usage
//! ```
//! use fermat_chain::{ModulusId, U256};
//!
//! let p = ModulusId::Curve25519P.modulus();
//! let two = U256::from_u64(2);
//!
//! // 2^-1 = (p + 1) / 2
//! assert_eq!(
//!     p.invert(&two),
//!     U256::from_be_hex("3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7")
//! );
//! // 0 has no inverse and maps to 0
//! assert_eq!(p.invert(&U256::ZERO), U256::ZERO);
//! ```
//!
//! Byte-oriented callers use the canonical 32-byte little-endian encoding:
//!
//! ```
//! # fn main() -> fermat_chain::Result<()> {
//! let btc = fermat_chain::lookup("secp256k1_p")?;
//! let mut three = [0u8; 32];
//! three[0] = 3;
//! let inverse = btc.invert_bytes(&three)?;
//! assert_eq!(fermat_chain::oracle::oracle_inverse(btc, &three)?, inverse);
//! # Ok(())
//! # }
//! ```
//!
//! # Verification
//! The `harness` module checks every chain against an arbitrary-precision `oracle` over
//! structured adversarial inputs and unbounded random streams. The `invcheck` binary (feature
//! `cli`) drives it from the command line.
//!
//! # Features
//! - `std` (default): the `oracle`, `harness` and `bench` modules, with their `num-bigint`,
//!   `num-modular` and `log` dependencies. Without it the crate is `no_std` and needs only
//!   `alloc`, for the error type.
//! - `rand` (default): [`FieldElement::random`] and the RNG entropy source.
//! - `zeroize`: `DefaultIsZeroes` for [`U256`] and [`modular::MontyForm`].
//! - `cli`: the `invcheck` binary.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

extern crate alloc;

mod arithmetic;
pub mod catalog;
pub mod chain;
mod error;
mod evaluator;
mod field;
mod limb;
pub mod modular;
pub mod modulus;
mod primitives;
mod uint;
mod word;

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod bench;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod harness;
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod oracle;

pub use crate::{
    arithmetic::FieldArithmetic,
    chain::{AdditionChain, Register, Step},
    error::{ChainDefect, Error, Mismatch, Property, Result},
    evaluator::evaluate,
    field::FieldElement,
    limb::Limb,
    modulus::{MODULI, Modulus, ModulusId, get_chain, lookup},
    uint::U256,
    word::{WideWord, Word},
};
pub use subtle;

#[cfg(feature = "rand_core")]
pub use rand_core;

#[cfg(feature = "zeroize")]
pub use zeroize;

/// Length of the canonical little-endian encoding of a field element.
pub const FIELD_BYTES: usize = U256::BYTES;
