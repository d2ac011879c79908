//! Common functionality shared between tests.

// Different tests may use only a subset of the available functionality
#![allow(dead_code)]

use fermat_chain::{Limb, MODULI, Modulus, U256};
use num_bigint::BigUint;
use proptest::prelude::*;

/// `U256` to `num_bigint::BigUint`, assembled limb by limb.
pub fn to_biguint<T>(uint: &T) -> BigUint
where
    T: AsRef<[Limb]>,
{
    let mut bytes = Vec::with_capacity(uint.as_ref().len() * Limb::BYTES);

    for limb in uint.as_ref() {
        bytes.extend_from_slice(&limb.to_le_bytes());
    }

    BigUint::from_bytes_le(&bytes)
}

prop_compose! {
    /// Any 256-bit integer, including values above every modulus.
    pub fn uint()(bytes in any::<[u8; 32]>()) -> U256 {
        U256::from_le_bytes(bytes)
    }
}

/// One of the registered moduli.
pub fn modulus() -> impl Strategy<Value = &'static Modulus> {
    prop::sample::select(MODULI.to_vec())
}
