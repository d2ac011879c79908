//! Fixed-width 256-bit unsigned integer.

mod encoding;

use crate::{Limb, Word};
use core::fmt;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::DefaultIsZeroes;

/// Number of limbs in a [`U256`].
pub const LIMBS: usize = 4;

/// 256-bit unsigned integer stored as four little-endian 64-bit [`Limb`]s.
///
/// Every operation on this type that touches secret data runs in constant time with respect to
/// the limb values: carries and borrows are propagated through every limb, and conditional
/// results are produced by masking rather than branching.
// Our PartialEq impl only differs from the default one by being constant-time, so this is safe
#[allow(clippy::derived_hash_with_manual_eq)]
#[derive(Copy, Clone, Hash)]
pub struct U256 {
    /// Inner limb array. Stored from least significant to most significant.
    limbs: [Limb; LIMBS],
}

impl U256 {
    /// The value `0`.
    pub const ZERO: Self = Self::from_u64(0);

    /// The value `1`.
    pub const ONE: Self = Self::from_u64(1);

    /// Maximum value this [`U256`] can express.
    pub const MAX: Self = Self {
        limbs: [Limb::MAX; LIMBS],
    };

    /// Total size of the represented integer in bits.
    pub const BITS: u32 = 256;

    /// Total size of the represented integer in bytes.
    pub const BYTES: usize = 32;

    /// Const-friendly [`U256`] constructor.
    pub const fn new(limbs: [Limb; LIMBS]) -> Self {
        Self { limbs }
    }

    /// Create a [`U256`] from a `u64`.
    pub const fn from_u64(n: u64) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        limbs[0] = Limb(n);
        Self { limbs }
    }

    /// Create a [`U256`] from an array of [`Word`]s (i.e. word-sized unsigned integers).
    #[inline]
    pub const fn from_words(arr: [Word; LIMBS]) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = Limb(arr[i]);
            i += 1;
        }

        Self { limbs }
    }

    /// Create an array of [`Word`]s from a [`U256`].
    #[inline]
    pub const fn to_words(self) -> [Word; LIMBS] {
        let mut arr = [0; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            arr[i] = self.limbs[i].0;
            i += 1;
        }

        arr
    }

    /// Borrow the limbs of this [`U256`].
    pub const fn as_limbs(&self) -> &[Limb; LIMBS] {
        &self.limbs
    }

    /// Convert this [`U256`] into its inner limbs.
    pub const fn to_limbs(self) -> [Limb; LIMBS] {
        self.limbs
    }

    /// Computes `self + rhs + carry`, returning the result along with the new carry.
    #[inline(always)]
    pub const fn carrying_add(&self, rhs: &Self, mut carry: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, c) = self.limbs[i].carrying_add(rhs.limbs[i], carry);
            limbs[i] = w;
            carry = c;
            i += 1;
        }

        (Self { limbs }, carry)
    }

    /// Computes `self - (rhs + borrow)`, returning the result along with the new borrow.
    ///
    /// The returned borrow is `Limb::MAX` on underflow and `Limb::ZERO` otherwise.
    #[inline(always)]
    pub const fn borrowing_sub(&self, rhs: &Self, mut borrow: Limb) -> (Self, Limb) {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let (w, b) = self.limbs[i].borrowing_sub(rhs.limbs[i], borrow);
            limbs[i] = w;
            borrow = b;
            i += 1;
        }

        (Self { limbs }, borrow)
    }

    /// Perform wrapping addition, discarding overflow.
    pub const fn wrapping_add(&self, rhs: &Self) -> Self {
        self.carrying_add(rhs, Limb::ZERO).0
    }

    /// Perform wrapping subtraction, discarding underflow.
    pub const fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.borrowing_sub(rhs, Limb::ZERO).0
    }

    /// Compute "wide" multiplication, returning the `(lo, hi)` halves of the 512-bit product.
    pub const fn split_mul(&self, rhs: &Self) -> (Self, Self) {
        let mut lo = [Limb::ZERO; LIMBS];
        let mut hi = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let mut carry = Limb::ZERO;
            let mut j = 0;

            while j < LIMBS {
                let k = i + j;

                if k >= LIMBS {
                    let (n, c) = hi[k - LIMBS].mac(self.limbs[i], rhs.limbs[j], carry);
                    hi[k - LIMBS] = n;
                    carry = c;
                } else {
                    let (n, c) = lo[k].mac(self.limbs[i], rhs.limbs[j], carry);
                    lo[k] = n;
                    carry = c;
                }

                j += 1;
            }

            hi[i] = carry;
            i += 1;
        }

        (Self { limbs: lo }, Self { limbs: hi })
    }

    /// Square self, returning a "wide" `(lo, hi)` result.
    pub const fn square_wide(&self) -> (Self, Self) {
        self.split_mul(self)
    }

    /// Computes `self + carry * 2^256 - rhs`, adding `p` back if the result went negative.
    ///
    /// Assumes `self + carry * 2^256 - rhs` lies in `[-p, p)` and `carry` is `0` or `1`.
    pub(crate) const fn sub_mod_with_carry(&self, carry: Limb, rhs: &Self, p: &Self) -> Self {
        debug_assert!(carry.0 <= 1);
        let (out, borrow) = self.borrowing_sub(rhs, Limb::ZERO);

        // The new `borrow = Word::MAX` iff `carry == 0` and `borrow == Word::MAX`.
        let mask = carry.wrapping_neg().not().bitand(borrow);

        // If underflow occurred on the final limb, `mask` is all ones, otherwise all zeros.
        // Thus, we use it to conditionally add the modulus.
        out.wrapping_add(&p.bitand_limb(mask))
    }

    /// Computes `self + rhs mod p`.
    ///
    /// Assumes `self < p` and `rhs < p`.
    pub const fn add_mod(&self, rhs: &Self, p: &Self) -> Self {
        let (w, carry) = self.carrying_add(rhs, Limb::ZERO);
        w.sub_mod_with_carry(carry, p, p)
    }

    /// Computes `self - rhs mod p`.
    ///
    /// Assumes `self < p` and `rhs < p`.
    pub const fn sub_mod(&self, rhs: &Self, p: &Self) -> Self {
        let (out, borrow) = self.borrowing_sub(rhs, Limb::ZERO);
        out.wrapping_add(&p.bitand_limb(borrow))
    }

    /// Computes `self + self mod p`.
    pub const fn double_mod(&self, p: &Self) -> Self {
        self.add_mod(self, p)
    }

    /// AND every limb with `mask`.
    const fn bitand_limb(&self, mask: Limb) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];
        let mut i = 0;

        while i < LIMBS {
            limbs[i] = self.limbs[i].bitand(mask);
            i += 1;
        }

        Self { limbs }
    }

    /// Is this integer equal to zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is `self < rhs`? Computed from the final borrow of `self - rhs`.
    pub fn ct_lt(&self, rhs: &Self) -> Choice {
        let (_, borrow) = self.borrowing_sub(rhs, Limb::ZERO);
        Choice::from((borrow.0 & 1) as u8)
    }

    /// Is `self < rhs`? Usable in `const` context.
    pub const fn lt(&self, rhs: &Self) -> bool {
        let (_, borrow) = self.borrowing_sub(rhs, Limb::ZERO);
        borrow.0 != 0
    }

    /// Is the lowest bit set?
    pub const fn is_odd(&self) -> bool {
        self.limbs[0].0 & 1 == 1
    }

    /// Calculate the number of bits needed to represent this number.
    ///
    /// Runs in variable time with respect to `self`; intended for public values such as moduli.
    pub const fn bits_vartime(&self) -> u32 {
        let mut i = LIMBS;

        while i > 0 {
            i -= 1;
            let w = self.limbs[i].0;
            if w != 0 {
                return (i as u32) * Limb::BITS + (Limb::BITS - w.leading_zeros());
            }
        }

        0
    }
}

impl Default for U256 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl AsRef<[Limb]> for U256 {
    fn as_ref(&self) -> &[Limb] {
        &self.limbs
    }
}

impl ConditionallySelectable for U256 {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut limbs = [Limb::ZERO; LIMBS];

        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = Limb::conditional_select(&a.limbs[i], &b.limbs[i], choice);
        }

        Self { limbs }
    }
}

impl ConstantTimeEq for U256 {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        self.limbs
            .iter()
            .zip(other.limbs.iter())
            .fold(Choice::from(1), |acc, (a, b)| acc & a.ct_eq(b))
    }
}

impl Eq for U256 {}

impl PartialEq for U256 {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

#[cfg(feature = "zeroize")]
impl DefaultIsZeroes for U256 {}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(0x{self:X})")
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(self, f)
    }
}

impl fmt::LowerHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            fmt::LowerHex::fmt(limb, f)?;
        }
        Ok(())
    }
}

impl fmt::UpperHex for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for limb in self.limbs.iter().rev() {
            fmt::UpperHex::fmt(limb, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::U256;
    use crate::Limb;
    use subtle::{ConditionallySelectable, ConstantTimeEq};

    const P25519: U256 =
        U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");

    #[test]
    fn carrying_add_overflow() {
        let (res, carry) = U256::MAX.carrying_add(&U256::ONE, Limb::ZERO);
        assert_eq!(res, U256::ZERO);
        assert_eq!(carry, Limb::ONE);
    }

    #[test]
    fn borrowing_sub_underflow() {
        let (res, borrow) = U256::ZERO.borrowing_sub(&U256::ONE, Limb::ZERO);
        assert_eq!(res, U256::MAX);
        assert_eq!(borrow, Limb::MAX);
    }

    #[test]
    fn split_mul_max() {
        // (2^256 - 1)^2 = 2^512 - 2^257 + 1
        let (lo, hi) = U256::MAX.square_wide();
        assert_eq!(lo, U256::ONE);
        assert_eq!(hi, U256::MAX.wrapping_sub(&U256::ONE));
    }

    #[test]
    fn split_mul_crosses_limbs() {
        let a = U256::from_words([0, 1, 0, 0]);
        let (lo, hi) = a.split_mul(&U256::from_words([0, 0, 0, 1]));
        assert_eq!(lo, U256::ZERO);
        assert_eq!(hi, U256::ONE);
    }

    #[test]
    fn add_mod_wraps() {
        let p_minus_one = P25519.wrapping_sub(&U256::ONE);
        assert_eq!(p_minus_one.add_mod(&U256::ONE, &P25519), U256::ZERO);
        assert_eq!(
            p_minus_one.add_mod(&p_minus_one, &P25519),
            P25519.wrapping_sub(&U256::from_u64(2))
        );
    }

    #[test]
    fn add_mod_with_carry_out() {
        // Modulus above 2^255, so `a + b` overflows 256 bits.
        let p = U256::from_be_hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
        let a = p.wrapping_sub(&U256::ONE);
        assert_eq!(a.add_mod(&a, &p), p.wrapping_sub(&U256::from_u64(2)));
    }

    #[test]
    fn sub_mod_underflow() {
        assert_eq!(
            U256::ZERO.sub_mod(&U256::ONE, &P25519),
            P25519.wrapping_sub(&U256::ONE)
        );
        assert_eq!(U256::from_u64(7).sub_mod(&U256::from_u64(5), &P25519), U256::from_u64(2));
    }

    #[test]
    fn comparisons() {
        assert!(bool::from(U256::ONE.ct_lt(&P25519)));
        assert!(!bool::from(P25519.ct_lt(&P25519)));
        assert!(U256::ZERO.lt(&U256::ONE));
        assert!(bool::from(U256::ZERO.is_zero()));
        assert!(bool::from(P25519.ct_eq(&P25519)));
    }

    #[test]
    fn conditional_select() {
        let a = U256::from_u64(1);
        let b = U256::MAX;
        assert_eq!(U256::conditional_select(&a, &b, 0.into()), a);
        assert_eq!(U256::conditional_select(&a, &b, 1.into()), b);
    }

    #[test]
    fn bits_vartime() {
        assert_eq!(U256::ZERO.bits_vartime(), 0);
        assert_eq!(U256::ONE.bits_vartime(), 1);
        assert_eq!(P25519.bits_vartime(), 255);
        assert_eq!(U256::MAX.bits_vartime(), 256);
    }

    #[test]
    fn display_is_big_endian_hex() {
        assert_eq!(
            format!("{:x}", P25519),
            "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
        );
        assert_eq!(format!("{}", U256::ONE).len(), 64);
    }
}
