//! Modular arithmetic support.
//!
//! This module provides the constant-time [`FieldArithmetic`] backend used in production,
//! implemented in terms of Montgomery form with `R = 2^256`.

mod reduction;

pub use self::reduction::montgomery_reduction;

use crate::{FieldArithmetic, Limb, U256};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Parameters to efficiently go to/from the Montgomery form for an odd modulus.
///
/// Every field is derived from the modulus in `const` context, so the parameters for the
/// registered moduli are computed at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontyParams {
    /// The constant modulus
    modulus: U256,
    /// Parameter used in Montgomery reduction
    one: U256,
    /// R^2, used to move into Montgomery form
    r2: U256,
    /// The lowest limbs of -(MODULUS^-1) mod R
    /// We only need the LSB because during reduction this value is multiplied modulo 2**Limb::BITS.
    mod_neg_inv: Limb,
}

impl MontyParams {
    /// Instantiates a new set of `MontyParams` representing the given `modulus`.
    ///
    /// # Panics
    /// - if the modulus is even or smaller than 3.
    pub const fn new(modulus: U256) -> Self {
        assert!(modulus.is_odd(), "modulus must be odd");
        assert!(U256::ONE.lt(&modulus), "modulus must be greater than one");

        // R mod m and R^2 mod m by repeated doubling, which needs nothing beyond `add_mod`.
        let mut one = U256::ONE;
        let mut i = 0;
        while i < U256::BITS {
            one = one.double_mod(&modulus);
            i += 1;
        }

        let mut r2 = one;
        let mut i = 0;
        while i < U256::BITS {
            r2 = r2.double_mod(&modulus);
            i += 1;
        }

        let mod_neg_inv = modulus.as_limbs()[0].inv_mod_word().wrapping_neg();

        Self {
            modulus,
            one,
            r2,
            mod_neg_inv,
        }
    }

    /// Returns the modulus which was used to initialize these parameters.
    pub const fn modulus(&self) -> &U256 {
        &self.modulus
    }

    /// `R mod m`, i.e. the value `1` in Montgomery form.
    pub const fn one(&self) -> MontyForm {
        MontyForm {
            montgomery_form: self.one,
        }
    }

    /// Move an arbitrary 256-bit integer into Montgomery form, reducing it modulo `m`.
    ///
    /// `x * R^2 < m * R` holds for every `x < 2^256`, so no prior reduction is needed.
    pub const fn to_montgomery(&self, integer: &U256) -> MontyForm {
        let product = integer.split_mul(&self.r2);
        MontyForm {
            montgomery_form: montgomery_reduction(&product, &self.modulus, self.mod_neg_inv),
        }
    }

    /// Retrieve the canonical integer represented by a value in Montgomery form.
    pub const fn retrieve(&self, x: &MontyForm) -> U256 {
        montgomery_reduction(
            &(x.montgomery_form, U256::ZERO),
            &self.modulus,
            self.mod_neg_inv,
        )
    }

    /// Multiply two values in Montgomery form.
    pub const fn mul(&self, a: &MontyForm, b: &MontyForm) -> MontyForm {
        let product = a.montgomery_form.split_mul(&b.montgomery_form);
        MontyForm {
            montgomery_form: montgomery_reduction(&product, &self.modulus, self.mod_neg_inv),
        }
    }

    /// Square a value in Montgomery form.
    pub const fn square(&self, a: &MontyForm) -> MontyForm {
        let product = a.montgomery_form.square_wide();
        MontyForm {
            montgomery_form: montgomery_reduction(&product, &self.modulus, self.mod_neg_inv),
        }
    }

    /// Fully reduce an arbitrary 256-bit integer modulo `m`.
    pub const fn reduce(&self, integer: &U256) -> U256 {
        self.retrieve(&self.to_montgomery(integer))
    }
}

impl FieldArithmetic for MontyParams {
    type Element = MontyForm;

    fn modulus(&self) -> &U256 {
        &self.modulus
    }

    fn reduce(&self, x: &U256) -> MontyForm {
        self.to_montgomery(x)
    }

    fn mul(&self, a: &MontyForm, b: &MontyForm) -> MontyForm {
        MontyParams::mul(self, a, b)
    }

    fn square(&self, a: &MontyForm) -> MontyForm {
        MontyParams::square(self, a)
    }

    fn retrieve(&self, a: &MontyForm) -> U256 {
        MontyParams::retrieve(self, a)
    }
}

/// An integer in Montgomery form, `x * R mod m`.
///
/// Carries no modulus of its own; it is only meaningful alongside the [`MontyParams`] that
/// produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MontyForm {
    montgomery_form: U256,
}

impl MontyForm {
    /// Access the value in Montgomery form.
    pub const fn as_montgomery(&self) -> &U256 {
        &self.montgomery_form
    }
}

impl ConditionallySelectable for MontyForm {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            montgomery_form: U256::conditional_select(
                &a.montgomery_form,
                &b.montgomery_form,
                choice,
            ),
        }
    }
}

impl ConstantTimeEq for MontyForm {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.montgomery_form.ct_eq(&other.montgomery_form)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::DefaultIsZeroes for MontyForm {}
