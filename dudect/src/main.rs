//! Constant-time checks for `fermat-chain`.
//!
//! These use the `dudect_bencher` crate to compare the timing of inverting zero against
//! inverting random field elements.

use dudect_bencher::{BenchRng, Class, CtRunner, ctbench_main};
use fermat_chain::{FieldElement, ModulusId};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

fn invert(runner: &mut CtRunner, id: ModulusId) {
    const ITERATIONS_OUTER: usize = 10_000;
    const ITERATIONS_INNER: usize = 100;

    // BenchRng implements an older rand_core
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    // Precomputing the inputs appears to eliminate some noise
    let mut inputs = Vec::with_capacity(2 * ITERATIONS_OUTER);
    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Left, FieldElement::zero(id)));
    }
    for _ in 0..ITERATIONS_OUTER {
        inputs.push((Class::Right, FieldElement::random(id, &mut rng)));
    }

    for (class, input) in inputs {
        runner.run_one(class, || {
            for _ in 0..ITERATIONS_INNER {
                core::hint::black_box(input.invert());
            }
        })
    }
}

fn invert_p256(runner: &mut CtRunner, _rng: &mut BenchRng) {
    invert(runner, ModulusId::P256P)
}

fn invert_curve25519(runner: &mut CtRunner, _rng: &mut BenchRng) {
    invert(runner, ModulusId::Curve25519P)
}

fn invert_secp256k1_n(runner: &mut CtRunner, _rng: &mut BenchRng) {
    invert(runner, ModulusId::BtcN)
}

ctbench_main!(invert_p256, invert_curve25519, invert_secp256k1_n);
