//! Big integers are represented as an array of smaller CPU word-size integers
//! called "limbs".

use crate::{
    Word,
    primitives::{borrowing_sub, carrying_add, carrying_mul_add},
};
use core::fmt;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A single 64-bit word of a [`U256`][`crate::U256`].
///
/// All bits of the inner [`Word`] are used; there is no unsaturated representation.
// Our PartialEq impl only differs from the default one by being constant-time, so this is safe
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Default, Hash)]
#[repr(transparent)]
pub struct Limb(pub Word);

impl Limb {
    /// The value `0`.
    pub const ZERO: Self = Limb(0);

    /// The value `1`.
    pub const ONE: Self = Limb(1);

    /// Maximum value this [`Limb`] can express.
    pub const MAX: Self = Limb(Word::MAX);

    /// Size of the inner integer in bits.
    pub const BITS: u32 = 64;

    /// Size of the inner integer in bytes.
    pub const BYTES: usize = 8;

    /// Computes `self + rhs + carry`, returning the result along with the new carry.
    #[inline(always)]
    pub const fn carrying_add(self, rhs: Limb, carry: Limb) -> (Limb, Limb) {
        let (res, carry) = carrying_add(self.0, rhs.0, carry.0);
        (Limb(res), Limb(carry))
    }

    /// Computes `self - (rhs + borrow)`, returning the result along with the new borrow.
    #[inline(always)]
    pub const fn borrowing_sub(self, rhs: Limb, borrow: Limb) -> (Limb, Limb) {
        let (res, borrow) = borrowing_sub(self.0, rhs.0, borrow.0);
        (Limb(res), Limb(borrow))
    }

    /// Computes `self + (b * c) + carry`, returning the result along with the new carry.
    #[inline(always)]
    pub const fn mac(self, b: Limb, c: Limb, carry: Limb) -> (Limb, Limb) {
        let (res, carry) = carrying_mul_add(b.0, c.0, self.0, carry.0);
        (Limb(res), Limb(carry))
    }

    /// Perform wrapping multiplication, discarding overflow.
    #[inline(always)]
    pub const fn wrapping_mul(&self, rhs: Self) -> Self {
        Limb(self.0.wrapping_mul(rhs.0))
    }

    /// Perform wrapping negation.
    #[inline(always)]
    pub const fn wrapping_neg(&self) -> Self {
        Limb(self.0.wrapping_neg())
    }

    /// Calculates `a & b`.
    #[inline(always)]
    pub const fn bitand(self, rhs: Self) -> Self {
        Limb(self.0 & rhs.0)
    }

    /// Calculates `!a`.
    #[inline(always)]
    pub const fn not(self) -> Self {
        Limb(!self.0)
    }

    /// Multiplicative inverse of an odd limb modulo `2^64`, by Newton iteration.
    ///
    /// Each round doubles the number of correct low bits, starting from the one bit that
    /// `x * 1 ≡ 1 (mod 2)` gives for free.
    pub(crate) const fn inv_mod_word(self) -> Self {
        debug_assert!(self.0 & 1 == 1);
        let mut inv: Word = 1;
        let mut i = 0;
        while i < 6 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(self.0.wrapping_mul(inv)));
            i += 1;
        }
        Limb(inv)
    }

    /// Serialize this [`Limb`] as little-endian bytes.
    #[inline]
    pub const fn to_le_bytes(self) -> [u8; Self::BYTES] {
        self.0.to_le_bytes()
    }
}

impl ConditionallySelectable for Limb {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(Word::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Limb {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Eq for Limb {}

impl PartialEq for Limb {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Debug for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Limb(0x{self:X})")
    }
}

impl fmt::Display for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::LowerHex for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$x}", &self.0, width = Self::BYTES * 2)
    }
}

impl fmt::UpperHex for Limb {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$X}", &self.0, width = Self::BYTES * 2)
    }
}

#[cfg(test)]
mod tests {
    use super::Limb;
    use crate::Word;

    #[test]
    fn carrying_add_with_carry() {
        let (res, carry) = Limb::MAX.carrying_add(Limb::ZERO, Limb::ONE);
        assert_eq!(res, Limb::ZERO);
        assert_eq!(carry, Limb::ONE);
    }

    #[test]
    fn borrowing_sub_with_borrow() {
        let (res, borrow) = Limb::ZERO.borrowing_sub(Limb::ONE, Limb::ZERO);
        assert_eq!(res, Limb::MAX);
        assert_eq!(borrow, Limb::MAX);
    }

    #[test]
    fn mac_no_overflow() {
        let (res, carry) = Limb(1).mac(Limb::MAX, Limb::MAX, Limb::MAX);
        // 1 + (2^64 - 1)^2 + (2^64 - 1) = 2^128 - 2^64 + 1
        assert_eq!(res, Limb::ONE);
        assert_eq!(carry, Limb(Word::MAX));
    }

    #[test]
    fn inv_mod_word() {
        for x in [1u64, 3, 0xffff_ffff_ffff_ffff, 0xd838_091d_d225_3531, 0xfffffffefffffc2f] {
            let inv = Limb(x).inv_mod_word();
            assert_eq!(x.wrapping_mul(inv.0), 1);
        }
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(format!("{:x}", Limb(0xab)), "00000000000000ab");
        assert_eq!(format!("{}", Limb(0xab)), "00000000000000AB");
    }
}
