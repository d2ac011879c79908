//! Verification of the inversion chains against the reference oracle.
//!
//! A [`Verifier`] checks one modulus on one input. A [`Harness`] drives verifiers over the
//! structured [`Population`]s and over an unbounded [`EntropySource`], stopping at the first
//! failure with [`Error::VerificationMismatch`].

mod population;
mod source;

pub use self::{
    population::Population,
    source::{EntropySource, ReaderSource},
};

#[cfg(feature = "rand_core")]
pub use self::source::RngSource;

use crate::{
    AdditionChain, Error, FIELD_BYTES, Limb, Mismatch, Modulus, ModulusId, Property, Result,
    U256, evaluate,
    oracle::{chain_exponent, from_biguint, oracle_inverse, to_biguint},
};
use core::ops::RangeInclusive;
use log::{debug, info, warn};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Checks the field-inverse properties of one chain for one modulus.
#[derive(Debug)]
pub struct Verifier<'a> {
    modulus: &'a Modulus,
    chain: AdditionChain<'a>,
    p: BigUint,
}

impl<'a> Verifier<'a> {
    /// Verify the chain registered for `modulus`.
    pub fn new(modulus: &'a Modulus) -> Self {
        Self::with_chain(modulus, *modulus.chain())
    }

    /// Verify an arbitrary chain claiming to compute `z^(p - 2)` for `modulus`.
    pub fn with_chain(modulus: &'a Modulus, chain: AdditionChain<'a>) -> Self {
        Self {
            modulus,
            chain,
            p: to_biguint(modulus.value()),
        }
    }

    /// The modulus under test.
    pub fn modulus(&self) -> &'a Modulus {
        self.modulus
    }

    /// Confirm the chain expands to exactly `p - 2`.
    pub fn check_chain(&self) -> Result<()> {
        let exponent = chain_exponent(&self.chain);
        let expected = &self.p - 2u32;
        if exponent == expected {
            return Ok(());
        }

        Err(Mismatch {
            modulus: self.modulus.name(),
            property: Property::ChainExponent,
            input: [0; FIELD_BYTES],
            expected: from_biguint(&expected).map(|e| e.to_le_bytes()),
            actual: from_biguint(&exponent)
                .map(|e| e.to_le_bytes())
                .unwrap_or([0xff; FIELD_BYTES]),
        }
        .into())
    }

    /// Check one candidate, given in its 32-byte little-endian encoding.
    ///
    /// In order: the result is canonical; it matches the oracle; it is a true inverse (or zero
    /// for zero); inverting it again recovers the input's residue; and every other encoding of
    /// the same residue below `2^256` inverts to the identical bytes.
    pub fn check(&self, input: &[u8; FIELD_BYTES]) -> Result<()> {
        let x = U256::from_le_bytes(*input);
        let y = self.invert(&x);
        let p = self.modulus.value();

        if !y.lt(p) {
            return Err(self.mismatch(Property::CanonicalRange, input, None, &y));
        }

        let expected = oracle_inverse(self.modulus, input)?;
        if y.to_le_bytes() != expected {
            return Err(self.mismatch(Property::OracleEquivalence, input, Some(expected), &y));
        }

        let x_residue = to_biguint(&x) % &self.p;
        let y_big = to_biguint(&y);
        let inverts = if x_residue.is_zero() {
            y_big.is_zero()
        } else {
            ((&x_residue * &y_big) % &self.p).is_one()
        };
        if !inverts {
            return Err(self.mismatch(Property::Correctness, input, None, &y));
        }

        let z = self.invert(&y);
        if !z.lt(p) || to_biguint(&z) != x_residue {
            let expected = from_biguint(&x_residue).map(|r| r.to_le_bytes());
            return Err(self.mismatch(Property::RoundTrip, input, expected, &z));
        }

        for congruent in congruent_encodings(&x, p) {
            let actual = self.invert(&congruent);
            if actual != y {
                return Err(self.mismatch(
                    Property::ReductionAgreement,
                    &congruent.to_le_bytes(),
                    Some(y.to_le_bytes()),
                    &actual,
                ));
            }
        }

        Ok(())
    }

    fn invert(&self, x: &U256) -> U256 {
        evaluate(&self.chain, self.modulus.params(), x)
    }

    fn mismatch(
        &self,
        property: Property,
        input: &[u8; FIELD_BYTES],
        expected: Option<[u8; FIELD_BYTES]>,
        actual: &U256,
    ) -> Error {
        Mismatch {
            modulus: self.modulus.name(),
            property,
            input: *input,
            expected,
            actual: actual.to_le_bytes(),
        }
        .into()
    }
}

/// `x - kp >= 0` and `x + kp < 2^256` for every `k >= 1`.
fn congruent_encodings(x: &U256, p: &U256) -> Vec<U256> {
    let mut out = Vec::new();

    let mut below = *x;
    loop {
        let (next, borrow) = below.borrowing_sub(p, Limb::ZERO);
        if borrow != Limb::ZERO {
            break;
        }
        out.push(next);
        below = next;
    }

    let mut above = *x;
    loop {
        let (next, carry) = above.carrying_add(p, Limb::ZERO);
        if carry != Limb::ZERO {
            break;
        }
        out.push(next);
        above = next;
    }

    out
}

/// Largest accepted [`HarnessConfig::window`].
pub const MAX_WINDOW: u64 = 1 << 32;

/// Largest accepted [`HarnessConfig::powers`]: one per bit of a field element.
pub const MAX_POWERS: u32 = U256::BITS;

/// Harness parameters. [`Default`] reproduces the full sweep.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Moduli to verify, in order.
    pub moduli: Vec<ModulusId>,
    /// Structured populations to run, in order.
    pub populations: Vec<Population>,
    /// Half-width `w` of the near-modulus, near-ceiling and scaled-residue windows. At most
    /// [`MAX_WINDOW`].
    pub window: u64,
    /// Number of powers of two `j` in the scaled-residue population. At most [`MAX_POWERS`].
    pub powers: u32,
    /// Range of the leading bit `a` in the low-Hamming-weight population. Capped at 63.
    pub low_weight_bits: RangeInclusive<u32>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            moduli: ModulusId::ALL.to_vec(),
            populations: Population::ALL.to_vec(),
            window: 1000,
            powers: 256,
            low_weight_bits: 10..=63,
        }
    }
}

impl HarnessConfig {
    /// Reject parameters outside [`MAX_WINDOW`] and [`MAX_POWERS`].
    pub fn validate(&self) -> Result<()> {
        if self.window > MAX_WINDOW {
            return Err(Error::ConfigOutOfRange {
                parameter: "window",
                max: MAX_WINDOW,
                actual: self.window,
            });
        }
        if self.powers > MAX_POWERS {
            return Err(Error::ConfigOutOfRange {
                parameter: "powers",
                max: MAX_POWERS.into(),
                actual: self.powers.into(),
            });
        }
        Ok(())
    }
}

/// Drives [`Verifier`]s over the configured moduli and populations.
#[derive(Clone, Debug, Default)]
pub struct Harness {
    config: HarnessConfig,
}

impl Harness {
    /// Create a harness.
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Check every chain's exponent, then every structured population for every modulus.
    ///
    /// Returns the number of candidates checked, or [`Error::ConfigOutOfRange`] before checking
    /// anything if the configuration is out of bounds.
    pub fn run_structured(&self) -> Result<u64> {
        self.config.validate()?;
        let mut total = 0;

        for id in &self.config.moduli {
            let verifier = Verifier::new(id.modulus());
            verifier.check_chain()?;
            debug!("{id}: chain exponent is p - 2");

            for population in &self.config.populations {
                let mut checked = 0u64;
                for x in population.candidates(id.modulus(), &self.config) {
                    verifier.check(&x.to_le_bytes())?;
                    checked += 1;
                }
                info!("{id}: {population} population passed ({checked} inputs)");
                total += checked;
            }
        }

        Ok(total)
    }

    /// Check blocks from `source` against every configured modulus until the source runs dry
    /// or `limit` blocks have been checked.
    ///
    /// Exhaustion is not an error. Returns the number of blocks checked.
    pub fn run_stream<S: EntropySource + ?Sized>(
        &self,
        source: &mut S,
        limit: Option<u64>,
    ) -> Result<u64> {
        let verifiers: Vec<_> = self
            .config
            .moduli
            .iter()
            .map(|id| Verifier::new(id.modulus()))
            .collect();

        let mut count = 0u64;
        while limit.is_none_or(|limit| count < limit) {
            let block = match source.next_block() {
                Ok(block) => block,
                Err(Error::EntropyUnavailable) => {
                    warn!("input stream exhausted after {count} blocks");
                    break;
                }
                Err(err) => return Err(err),
            };

            for verifier in &verifiers {
                verifier.check(&block)?;
            }

            count += 1;
            if count.is_power_of_two() {
                info!("{count} streamed inputs passed");
            }
        }

        Ok(count)
    }
}
