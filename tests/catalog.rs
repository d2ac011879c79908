//! The registered chains compute `z^(p - 2)`, and known inverses come out right.

mod common;

use common::to_biguint;
use fermat_chain::{
    AdditionChain, ChainDefect, Error, MODULI, ModulusId, Register, Step, U256, get_chain,
    harness::Verifier,
    oracle::chain_exponent,
};
use hex_literal::hex;

#[test]
fn chain_exponents_are_p_minus_two() {
    for m in MODULI {
        let p = to_biguint(m.value());
        assert_eq!(chain_exponent(m.chain()), p - 2u32, "{}", m.name());
        Verifier::new(m).check_chain().unwrap();
    }
}

#[test]
fn chains_by_name() {
    for id in ModulusId::ALL {
        let chain = get_chain(id.name()).unwrap();
        assert_eq!(chain, id.modulus().chain());
    }
    assert_eq!(
        get_chain("Curve448_p"),
        Err(Error::UnknownModulus("Curve448_p".into()))
    );
}

#[test]
fn runtime_chains_are_validated() {
    let forward = [Step::Multiply(Register::new(3, "x3"))];
    assert_eq!(
        AdditionChain::try_new(&forward).map_err(Error::from),
        Err(Error::InvalidChain(ChainDefect::UndefinedRegister { step: 0 }))
    );
}

mod curve25519 {
    use fermat_chain::{FieldElement, ModulusId, U256};
    use hex_literal::hex;

    const P: U256 =
        U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");

    fn invert(x: &U256) -> U256 {
        ModulusId::Curve25519P.modulus().invert(x)
    }

    #[test]
    fn one() {
        assert_eq!(invert(&U256::ONE), U256::ONE);
    }

    #[test]
    fn two() {
        assert_eq!(
            invert(&U256::from_u64(2)),
            U256::from_be_hex("3ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7")
        );
    }

    #[test]
    fn modulus_is_zero() {
        assert_eq!(invert(&P), U256::ZERO);
    }

    #[test]
    fn minus_one() {
        let minus_one = P.wrapping_sub(&U256::ONE);
        assert_eq!(invert(&minus_one), minus_one);
    }

    #[test]
    fn low_weight_value_and_its_lift() {
        // 2^63 + 2^30 - 2^10
        let x = U256::from_u64(0x8000_0000_3fff_fc00);
        let expected =
            U256::from_be_hex("1a8de3e64c9ec4fc48cfcfe6d1bffa53159f39647502fbfabf49a5aab83b0321");
        assert_eq!(invert(&x), expected);
        assert_eq!(invert(&x.wrapping_add(&P)), expected);

        let bytes = x.wrapping_add(&P).to_le_bytes();
        let element = FieldElement::from_le_bytes(ModulusId::Curve25519P, &bytes).unwrap();
        assert_eq!(
            element.invert().to_le_bytes(),
            hex!("21033bb8aaa549bffafb027564399f1553fabfd1e6cfcf48fcc49e4ce6e38d1a")
        );
    }
}

#[test]
fn known_secp256k1_inverse() {
    // 3^-1 mod p = (2p + 1) / 3
    let m = ModulusId::BtcP.modulus();
    let mut three = [0u8; 32];
    three[0] = 3;
    assert_eq!(
        m.invert_bytes(&three).unwrap(),
        U256::from_be_hex("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa9fffffd75")
            .to_le_bytes()
    );
    assert_eq!(
        m.invert_bytes(&hex!("0100000000000000000000000000000000000000000000000000000000000000"))
            .unwrap(),
        U256::ONE.to_le_bytes()
    );
}
