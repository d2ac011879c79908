//! Canonical elements of a registered prime field.

use crate::{FIELD_BYTES, ModulusId, Result, U256};
use core::{fmt, ops::Mul};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "rand_core")]
use {
    crate::{Word, uint::LIMBS},
    rand_core::RngCore,
};

/// An integer in `[0, p)` for one of the registered moduli.
///
/// Every constructor reduces, so a `FieldElement` is always canonical.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement {
    modulus: ModulusId,
    value: U256,
}

impl FieldElement {
    /// The additive identity.
    pub const fn zero(modulus: ModulusId) -> Self {
        Self {
            modulus,
            value: U256::ZERO,
        }
    }

    /// The multiplicative identity.
    pub const fn one(modulus: ModulusId) -> Self {
        Self {
            modulus,
            value: U256::ONE,
        }
    }

    /// Reduce an arbitrary 256-bit integer into the field.
    pub fn from_uint(modulus: ModulusId, value: &U256) -> Self {
        Self {
            modulus,
            value: modulus.modulus().reduce(value),
        }
    }

    /// Decode the canonical 32-byte little-endian encoding, reducing values `>= p`.
    pub fn from_le_bytes(modulus: ModulusId, bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_uint(modulus, &U256::from_le_slice(bytes)?))
    }

    /// Sample a uniformly random element by rejection.
    #[cfg(feature = "rand_core")]
    pub fn random<R: RngCore + ?Sized>(modulus: ModulusId, rng: &mut R) -> Self {
        let p = modulus.modulus().value();
        let mask = Word::MAX >> p.as_limbs()[LIMBS - 1].0.leading_zeros();

        loop {
            let mut words = [0; LIMBS];
            for word in &mut words {
                *word = rng.next_u64();
            }
            words[LIMBS - 1] &= mask;

            let candidate = U256::from_words(words);
            if candidate.lt(p) {
                return Self {
                    modulus,
                    value: candidate,
                };
            }
        }
    }

    /// Which field this element belongs to.
    pub const fn modulus(&self) -> ModulusId {
        self.modulus
    }

    /// The canonical integer representative.
    pub const fn value(&self) -> &U256 {
        &self.value
    }

    /// Canonical little-endian encoding.
    pub const fn to_le_bytes(&self) -> [u8; FIELD_BYTES] {
        self.value.to_le_bytes()
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> Choice {
        self.value.is_zero()
    }

    /// Multiplicative inverse by Fermat's little theorem. Zero maps to zero.
    pub fn invert(&self) -> Self {
        Self {
            modulus: self.modulus,
            value: self.modulus.modulus().invert(&self.value),
        }
    }

    /// Square this element.
    pub fn square(&self) -> Self {
        *self * *self
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        debug_assert_eq!(self.modulus, rhs.modulus);
        let params = self.modulus.modulus().params();
        let product = params.mul(
            &params.to_montgomery(&self.value),
            &params.to_montgomery(&rhs.value),
        );
        Self {
            modulus: self.modulus,
            value: params.retrieve(&product),
        }
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        debug_assert_eq!(a.modulus, b.modulus);
        Self {
            modulus: a.modulus,
            value: U256::conditional_select(&a.value, &b.value, choice),
        }
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        Choice::from(u8::from(self.modulus == other.modulus)) & self.value.ct_eq(&other.value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x} mod {}", self.value, self.modulus)
    }
}
