//! The field-arithmetic capability the chain evaluator is written against.

use crate::U256;

/// Fixed-width modular arithmetic for a single odd modulus.
///
/// The evaluator only ever asks for reductions, multiplications, squarings and a final
/// retrieval, so any backend providing those can execute an addition chain: the constant-time
/// Montgomery backend ([`MontyParams`][`crate::modular::MontyParams`]) in production, or an
/// exact arbitrary-precision backend ([`OracleArithmetic`][`crate::oracle::OracleArithmetic`])
/// when a chain needs to be checked in isolation from the arithmetic.
///
/// Implementations used for secret data must run in time independent of operand values.
pub trait FieldArithmetic {
    /// Internal representation of a field element.
    type Element: Clone;

    /// The modulus this backend reduces by.
    fn modulus(&self) -> &U256;

    /// Bring any 256-bit integer into the field, reducing it modulo [`Self::modulus`].
    fn reduce(&self, x: &U256) -> Self::Element;

    /// Modular multiplication.
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element;

    /// Modular squaring.
    fn square(&self, a: &Self::Element) -> Self::Element {
        self.mul(a, a)
    }

    /// The canonical integer in `[0, modulus)` represented by `a`.
    fn retrieve(&self, a: &Self::Element) -> U256;
}

impl<T: FieldArithmetic + ?Sized> FieldArithmetic for &T {
    type Element = T::Element;

    fn modulus(&self) -> &U256 {
        T::modulus(self)
    }

    fn reduce(&self, x: &U256) -> Self::Element {
        T::reduce(self, x)
    }

    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        T::mul(self, a, b)
    }

    fn square(&self, a: &Self::Element) -> Self::Element {
        T::square(self, a)
    }

    fn retrieve(&self, a: &Self::Element) -> U256 {
        T::retrieve(self, a)
    }
}
