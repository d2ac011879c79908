//! Arbitrary-precision reference implementations.
//!
//! Nothing here shares code with the fixed-width evaluator: inverses are computed with
//! [`num_bigint`] directly from the input bytes, so agreement between the two is meaningful.
//! None of these functions are constant-time. They exist to check the production path.

use crate::{
    AdditionChain, Error, FIELD_BYTES, FieldArithmetic, Modulus, Result, U256,
    chain::{MAX_REGISTERS, Step},
};
use num_bigint::BigUint;
use num_modular::ModularUnaryOps;

/// `U256` to [`BigUint`].
pub fn to_biguint(x: &U256) -> BigUint {
    BigUint::from_bytes_le(&x.to_le_bytes())
}

/// [`BigUint`] to `U256`, or `None` if it does not fit in 256 bits.
pub fn from_biguint(x: &BigUint) -> Option<U256> {
    if x.bits() > u64::from(U256::BITS) {
        return None;
    }
    Some(U256::from_le_bytes(to_le_array(x)))
}

/// Fermat inverse `x^(p - 2) mod p` of a 32-byte little-endian encoding.
///
/// Any 256-bit `x` is accepted and reduced first; `x ≡ 0` maps to `0`.
pub fn oracle_inverse(modulus: &Modulus, bytes: &[u8]) -> Result<[u8; FIELD_BYTES]> {
    let x = parse(bytes)?;
    let p = to_biguint(modulus.value());
    let exponent = &p - 2u32;
    Ok(to_le_array(&(x % &p).modpow(&exponent, &p)))
}

/// Inverse of a 32-byte little-endian encoding via the extended Euclidean algorithm.
///
/// Agrees with [`oracle_inverse`] for every input when the modulus is prime; elements with no
/// inverse map to `0`.
pub fn oracle_inverse_euclid(modulus: &Modulus, bytes: &[u8]) -> Result<[u8; FIELD_BYTES]> {
    let x = parse(bytes)?;
    let p = to_biguint(modulus.value());
    let inverse = (x % &p).invm(&p).unwrap_or_default();
    Ok(to_le_array(&inverse))
}

/// Expand a chain into the exponent `e` such that it computes `z^e`.
pub fn chain_exponent(chain: &AdditionChain<'_>) -> BigUint {
    let mut registers: [BigUint; MAX_REGISTERS] = core::array::from_fn(|_| BigUint::from(1u8));
    let mut acc = BigUint::from(1u8);

    for step in chain.steps() {
        match *step {
            Step::Square(k) => acc <<= k,
            Step::Multiply(reg) => acc += &registers[reg.slot()],
            Step::Save(reg) => registers[reg.slot()] = acc.clone(),
        }
    }

    acc
}

/// Exact [`FieldArithmetic`] backed by [`BigUint`].
///
/// Running a chain over this backend isolates defects in the chain itself from defects in the
/// Montgomery arithmetic.
#[derive(Clone, Debug)]
pub struct OracleArithmetic {
    modulus: U256,
    p: BigUint,
}

impl OracleArithmetic {
    /// Exact arithmetic modulo `modulus`.
    pub fn new(modulus: U256) -> Self {
        Self {
            modulus,
            p: to_biguint(&modulus),
        }
    }
}

impl From<&Modulus> for OracleArithmetic {
    fn from(modulus: &Modulus) -> Self {
        Self::new(*modulus.value())
    }
}

impl FieldArithmetic for OracleArithmetic {
    type Element = BigUint;

    fn modulus(&self) -> &U256 {
        &self.modulus
    }

    fn reduce(&self, x: &U256) -> BigUint {
        to_biguint(x) % &self.p
    }

    fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    fn retrieve(&self, a: &BigUint) -> U256 {
        U256::from_le_bytes(to_le_array(a))
    }
}

fn parse(bytes: &[u8]) -> Result<BigUint> {
    if bytes.len() != FIELD_BYTES {
        return Err(Error::MalformedInput {
            expected: FIELD_BYTES,
            actual: bytes.len(),
        });
    }
    Ok(BigUint::from_bytes_le(bytes))
}

/// Low 256 bits of `x`, little-endian.
fn to_le_array(x: &BigUint) -> [u8; FIELD_BYTES] {
    let mut out = [0u8; FIELD_BYTES];
    for (dst, src) in out.iter_mut().zip(x.to_bytes_le()) {
        *dst = src;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{chain_exponent, from_biguint, oracle_inverse, oracle_inverse_euclid, to_biguint};
    use crate::{
        AdditionChain, Error, U256,
        chain::{Register, Step},
        modulus::{BTC_N, CURVE25519_P},
    };
    use num_bigint::BigUint;

    #[test]
    fn biguint_conversions() {
        let x = U256::from_be_hex("0123456789abcdef00000000000000000000000000000000fedcba9876543210");
        assert_eq!(from_biguint(&to_biguint(&x)), Some(x));
        assert_eq!(from_biguint(&(BigUint::from(1u8) << 256)), None);
        assert_eq!(from_biguint(&to_biguint(&U256::MAX)), Some(U256::MAX));
    }

    #[test]
    fn inverse_of_two() {
        // 2^-1 = (p + 1) / 2
        let mut two = [0u8; 32];
        two[0] = 2;
        let expected =
            U256::from_be_hex("3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7");
        assert_eq!(oracle_inverse(&CURVE25519_P, &two), Ok(expected.to_le_bytes()));
        assert_eq!(oracle_inverse_euclid(&CURVE25519_P, &two), Ok(expected.to_le_bytes()));
    }

    #[test]
    fn zero_and_modulus_map_to_zero() {
        for bytes in [[0u8; 32], BTC_N.to_le_bytes()] {
            assert_eq!(oracle_inverse(&BTC_N, &bytes), Ok([0u8; 32]));
            assert_eq!(oracle_inverse_euclid(&BTC_N, &bytes), Ok([0u8; 32]));
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(
            oracle_inverse(&BTC_N, &[0u8; 33]),
            Err(Error::MalformedInput {
                expected: 32,
                actual: 33
            })
        );
    }

    #[test]
    fn expands_exponent() {
        // ((z^2)^2 * z)^(2^3) * z^2 = z^42
        let z2 = Register::new(1, "z2");
        let steps = [
            Step::Square(1),
            Step::Save(z2),
            Step::Square(1),
            Step::Multiply(Register::INPUT),
            Step::Square(3),
            Step::Multiply(z2),
        ];
        let chain = AdditionChain::new(&steps);
        assert_eq!(chain_exponent(&chain), BigUint::from(42u8));
    }
}
