//! Modular reduction implementation.

use crate::{Limb, U256, uint::LIMBS};

/// Algorithm 14.32 in Handbook of Applied Cryptography <https://cacr.uwaterloo.ca/hac/about/chap14.pdf>
///
/// Computes `T * 2^-256 mod m` for `T = lower + upper * 2^256 < m * 2^256`, fully reduced.
pub const fn montgomery_reduction(
    lower_upper: &(U256, U256),
    modulus: &U256,
    mod_neg_inv: Limb,
) -> U256 {
    let mut lower = lower_upper.0.to_limbs();
    let mut upper = lower_upper.1.to_limbs();
    let m = modulus.as_limbs();

    let mut meta_carry = Limb::ZERO;
    let mut i = 0;

    while i < LIMBS {
        let u = lower[i].wrapping_mul(mod_neg_inv);

        let (_, mut carry) = lower[i].mac(u, m[0], Limb::ZERO);
        let mut new_limb;

        let mut j = 1;
        while j < (LIMBS - i) {
            (new_limb, carry) = lower[i + j].mac(u, m[j], carry);
            lower[i + j] = new_limb;
            j += 1;
        }
        while j < LIMBS {
            (new_limb, carry) = upper[i + j - LIMBS].mac(u, m[j], carry);
            upper[i + j - LIMBS] = new_limb;
            j += 1;
        }

        let (new_sum, new_meta_carry) = upper[i].carrying_add(carry, meta_carry);
        upper[i] = new_sum;
        meta_carry = new_meta_carry;

        i += 1;
    }

    // Division is simply taking the upper half of the limbs
    // Final reduction (at this point, the value is at most 2 * modulus,
    // so `meta_carry` is either 0 or 1)
    U256::new(upper).sub_mod_with_carry(meta_carry, modulus, modulus)
}

#[cfg(test)]
mod tests {
    use super::montgomery_reduction;
    use crate::{Limb, U256};

    const P: U256 =
        U256::from_be_hex("ffffffff00000001000000000000000000000000ffffffffffffffffffffffff");

    fn mod_neg_inv() -> Limb {
        P.as_limbs()[0].inv_mod_word().wrapping_neg()
    }

    #[test]
    fn reduces_zero() {
        assert_eq!(
            montgomery_reduction(&(U256::ZERO, U256::ZERO), &P, mod_neg_inv()),
            U256::ZERO
        );
    }

    #[test]
    fn reduces_modulus_multiple_to_zero() {
        // p * 2^256 is the largest admissible multiple of p and must reduce to zero.
        assert_eq!(
            montgomery_reduction(&(U256::ZERO, P), &P, mod_neg_inv()),
            U256::ZERO
        );
    }

    #[test]
    fn divides_by_r() {
        // (x * 2^256) * 2^-256 = x
        let x = U256::from_u64(0x1234_5678);
        assert_eq!(montgomery_reduction(&(U256::ZERO, x), &P, mod_neg_inv()), x);
    }
}
