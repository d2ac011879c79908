//! End-to-end behaviour of the verification harness.

use fermat_chain::{
    AdditionChain, Error, MODULI, ModulusId, Property, Step, U256,
    harness::{EntropySource, Harness, HarnessConfig, Population, ReaderSource, Verifier},
    oracle::{oracle_inverse, oracle_inverse_euclid},
};
use proptest::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

#[test]
fn wrong_chain_is_rejected() {
    let m = ModulusId::Curve25519P.modulus();
    // z^(2(p - 2)): the correct chain followed by one extra squaring
    let mut steps = m.chain().steps().to_vec();
    steps.push(Step::Square(1));
    let chain = AdditionChain::try_new(&steps).unwrap();
    let verifier = Verifier::with_chain(m, chain);

    match verifier.check_chain() {
        Err(Error::VerificationMismatch(mismatch)) => {
            assert_eq!(mismatch.property, Property::ChainExponent);
            assert_eq!(mismatch.modulus, "Curve25519_p");
        }
        other => panic!("expected a chain exponent mismatch, got {other:?}"),
    }

    let mut two = [0u8; 32];
    two[0] = 2;
    match verifier.check(&two) {
        Err(Error::VerificationMismatch(mismatch)) => {
            assert_eq!(mismatch.property, Property::OracleEquivalence);
            assert_eq!(mismatch.input, two);
            assert_eq!(
                mismatch.expected,
                Some(oracle_inverse(m, &two).unwrap())
            );
        }
        other => panic!("expected an oracle mismatch, got {other:?}"),
    }

    // zero and one are fixed points of every power, so they slip through
    verifier.check(&[0u8; 32]).unwrap();
    verifier.check(&U256::ONE.to_le_bytes()).unwrap();
}

#[test]
fn structured_run_over_every_modulus() {
    let harness = Harness::new(HarnessConfig {
        window: 2,
        powers: 2,
        low_weight_bits: 4..=4,
        ..HarnessConfig::default()
    });
    // per modulus: 4 near p, 2 near 2^256, 2 * 4 scaled, 4 * 8 * 2 low weight
    assert_eq!(
        harness.run_structured().unwrap(),
        MODULI.len() as u64 * (4 + 2 + 8 + 64)
    );
}

#[test]
fn single_population() {
    let harness = Harness::new(HarnessConfig {
        moduli: vec![ModulusId::P256P],
        populations: vec![Population::NearModulus],
        window: 50,
        ..HarnessConfig::default()
    });
    assert_eq!(harness.run_structured().unwrap(), 100);
}

#[test]
fn exhausted_stream_stops_gracefully() {
    let harness = Harness::default();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut bytes = vec![0u8; 32 * 5 + 31];
    rng.fill_bytes(&mut bytes);

    let mut source = ReaderSource::new(bytes.as_slice());
    assert_eq!(harness.run_stream(&mut source, None).unwrap(), 5);
    assert_eq!(source.next_block(), Err(Error::EntropyUnavailable));
}

#[test]
fn streamed_blocks_at_the_ceiling() {
    let harness = Harness::default();
    let bytes = [0xffu8; 32 * 2];
    let mut source = ReaderSource::new(&bytes[..]);
    assert_eq!(harness.run_stream(&mut source, None).unwrap(), 2);
}

#[test]
fn rng_stream_honours_limit() {
    let harness = Harness::new(HarnessConfig {
        moduli: vec![ModulusId::BtcN],
        ..HarnessConfig::default()
    });
    let mut source = fermat_chain::harness::RngSource::new(ChaCha8Rng::seed_from_u64(3));
    assert_eq!(harness.run_stream(&mut source, Some(16)).unwrap(), 16);
}

proptest! {
    #[test]
    fn fermat_and_euclid_oracles_agree(bytes in any::<[u8; 32]>()) {
        for m in MODULI {
            prop_assert_eq!(
                oracle_inverse(m, &bytes).unwrap(),
                oracle_inverse_euclid(m, &bytes).unwrap()
            );
        }
    }

    #[test]
    fn verifier_accepts_random_inputs(bytes in any::<[u8; 32]>()) {
        for m in MODULI {
            prop_assert_eq!(Verifier::new(m).check(&bytes), Ok(()));
        }
    }
}
