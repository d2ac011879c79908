//! Executes an [`AdditionChain`] over a [`FieldArithmetic`] backend.

use crate::{
    AdditionChain, FieldArithmetic, U256,
    chain::{MAX_REGISTERS, Step},
};

/// Compute `x^e mod p`, where `e` is the exponent `chain` encodes and `p` is `field`'s modulus.
///
/// `x` may be any 256-bit integer; it is reduced into the field before the first step. The
/// register file always has [`MAX_REGISTERS`] slots regardless of how many the chain uses, and
/// the only branches taken depend on the chain's (public) step kinds, so with a constant-time
/// backend the sequence of field operations and memory accesses is the same for every `x`.
///
/// With one of the registered chains this is Fermat inversion: the result is `x^-1 mod p` for
/// `x ≢ 0` and `0` for `x ≡ 0`.
pub fn evaluate<A: FieldArithmetic>(chain: &AdditionChain<'_>, field: &A, x: &U256) -> U256 {
    let z = field.reduce(x);
    let mut registers: [A::Element; MAX_REGISTERS] = core::array::from_fn(|_| z.clone());
    let mut acc = z;

    for step in chain.steps() {
        match *step {
            Step::Square(k) => {
                for _ in 0..k {
                    acc = field.square(&acc);
                }
            }
            Step::Multiply(reg) => acc = field.mul(&acc, &registers[reg.slot()]),
            Step::Save(reg) => registers[reg.slot()] = acc.clone(),
        }
    }

    field.retrieve(&acc)
}

#[cfg(test)]
mod tests {
    use super::evaluate;
    use crate::{
        AdditionChain, U256,
        chain::{Register, Step},
        modular::MontyParams,
    };

    const P: U256 = U256::from_u64(1_000_003);

    // z^11
    const Z11: AdditionChain<'static> = AdditionChain::new(&[
        Step::Square(1),
        Step::Save(Register::new(1, "z2")),
        Step::Square(2),
        Step::Multiply(Register::INPUT),
        Step::Multiply(Register::new(1, "z2")),
    ]);

    #[test]
    fn computes_chain_exponent() {
        let params = MontyParams::new(P);
        for x in [0u64, 1, 2, 3, 999_999, 1_000_002] {
            let expected = (0..11).fold(1u128, |acc, _| acc * x as u128 % 1_000_003) as u64;
            assert_eq!(evaluate(&Z11, &params, &U256::from_u64(x)), U256::from_u64(expected));
        }
    }

    #[test]
    fn reduces_input_first() {
        let params = MontyParams::new(P);
        let x = U256::from_u64(5);
        let congruent = x.wrapping_add(&P).wrapping_add(&P);
        assert_eq!(evaluate(&Z11, &params, &congruent), evaluate(&Z11, &params, &x));
    }
}
