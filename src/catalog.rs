//! Reviewed addition chains computing `z^(p - 2)` for each registered modulus.
//!
//! Register names follow one convention throughout: `zK` holds `z^K` and `xN` holds
//! `z^(2^N - 1)`, a run of `N` one bits. Squaring `xN` `M` times and multiplying by `xM`
//! therefore yields `x(N + M)`, which is how the long runs of ones in these primes are built.
//!
//! Each chain is validated when the crate is compiled. Whether it computes the right exponent
//! is checked by the test suite and by [`Verifier::check_chain`][`crate::harness::Verifier::check_chain`].

mod curve25519_p;
mod p256_n;
mod p256_p;
mod secp256k1_n;
mod secp256k1_p;
mod sm2_p;

use crate::AdditionChain;

/// NIST P-256 base field.
pub const P256_P: AdditionChain<'static> = p256_p::CHAIN;

/// NIST P-256 group order.
pub const P256_N: AdditionChain<'static> = p256_n::CHAIN;

/// SM2 base field.
pub const SM2_P: AdditionChain<'static> = sm2_p::CHAIN;

/// Curve25519 base field.
pub const CURVE25519_P: AdditionChain<'static> = curve25519_p::CHAIN;

/// secp256k1 base field.
pub const SECP256K1_P: AdditionChain<'static> = secp256k1_p::CHAIN;

/// secp256k1 group order.
pub const SECP256K1_N: AdditionChain<'static> = secp256k1_n::CHAIN;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_counts() {
        for (chain, squarings, multiplications, registers) in [
            (P256_P, 255, 12, 7),
            (P256_N, 253, 39, 12),
            (SM2_P, 255, 16, 5),
            (CURVE25519_P, 254, 11, 9),
            (SECP256K1_P, 255, 15, 7),
            (SECP256K1_N, 253, 42, 12),
        ] {
            assert_eq!(chain.squarings(), squarings);
            assert_eq!(chain.multiplications(), multiplications);
            assert_eq!(chain.registers(), registers);
        }
    }
}
