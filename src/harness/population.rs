//! Structured adversarial input populations.

use super::{HarnessConfig, MAX_POWERS, MAX_WINDOW};
use crate::{
    Modulus, U256,
    oracle::{from_biguint, to_biguint},
};
use core::fmt;
use num_bigint::BigUint;
use num_traits::CheckedSub;

/// A family of candidate inputs, each yielded as an integer below `2^256`.
///
/// The fifth population, unbounded blocks from an
/// [`EntropySource`][`crate::harness::EntropySource`], is driven by
/// [`Harness::run_stream`][`crate::harness::Harness::run_stream`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Population {
    /// The literal integers `p - w ..= p + w - 1`. Values `>= p` are not pre-reduced.
    NearModulus,
    /// The integers `2^256 - w ..= 2^256 - 1`.
    NearCeiling,
    /// `(i * 2^j) mod p` for `j` below the configured number of powers and `i ∈ [-w, w)`.
    ScaledResidues,
    /// `±(2^a ± 2^b ± 2^c ± 2^d) mod p` for `a > b > c > d`, with `a` in the configured range.
    LowHammingWeight,
}

impl Population {
    /// Every structured population, in the order they are run.
    pub const ALL: [Population; 4] = [
        Population::NearModulus,
        Population::NearCeiling,
        Population::ScaledResidues,
        Population::LowHammingWeight,
    ];

    /// Lazily generate this population's candidates for `modulus`.
    ///
    /// The window and number of powers are clamped to [`MAX_WINDOW`] and [`MAX_POWERS`].
    pub fn candidates<'a>(
        self,
        modulus: &'a Modulus,
        config: &HarnessConfig,
    ) -> Box<dyn Iterator<Item = U256> + 'a> {
        let window = config.window.min(MAX_WINDOW);
        match self {
            Population::NearModulus => Box::new(near(to_biguint(modulus.value()), window)),
            Population::NearCeiling => Box::new((1..=window).rev().map(|k| {
                U256::MAX.wrapping_sub(&U256::from_u64(k - 1))
            })),
            Population::ScaledResidues => {
                Box::new(scaled_residues(modulus, config.powers.min(MAX_POWERS), window))
            }
            Population::LowHammingWeight => {
                let top = (*config.low_weight_bits.end()).min(LOW_WEIGHT_MAX_BIT);
                let bottom = *config.low_weight_bits.start();
                Box::new(low_hamming_weight(*modulus.value(), bottom, top))
            }
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Population::NearModulus => "near-modulus",
            Population::NearCeiling => "near-ceiling",
            Population::ScaledResidues => "scaled-residues",
            Population::LowHammingWeight => "low-hamming-weight",
        })
    }
}

/// Highest leading bit in the low-weight population; the sum must fit in a `u64`.
const LOW_WEIGHT_MAX_BIT: u32 = 63;

const SIGNS: [(i128, i128, i128); 8] = [
    (1, 1, 1),
    (1, 1, -1),
    (1, -1, 1),
    (1, -1, -1),
    (-1, 1, 1),
    (-1, 1, -1),
    (-1, -1, 1),
    (-1, -1, -1),
];

/// `center - w ..= center + w - 1`, skipping anything outside `[0, 2^256)`.
fn near(center: BigUint, window: u64) -> impl Iterator<Item = U256> {
    let w = BigUint::from(window);
    (0..2 * window).filter_map(move |k| {
        let v = (&center + k).checked_sub(&w)?;
        from_biguint(&v)
    })
}

fn scaled_residues(modulus: &Modulus, powers: u32, window: u64) -> impl Iterator<Item = U256> {
    let p = to_biguint(modulus.value());
    let w = i128::from(window);
    (0..powers).flat_map(move |j| {
        let p = p.clone();
        (-w..w).filter_map(move |i| {
            let t = (BigUint::from(i.unsigned_abs()) << j) % &p;
            let v = if i < 0 { (&p - t) % &p } else { t };
            from_biguint(&v)
        })
    })
}

fn low_hamming_weight(p: U256, bottom: u32, top: u32) -> impl Iterator<Item = U256> {
    (bottom..=top).rev().flat_map(move |a| {
        (2..a).rev().flat_map(move |b| {
            (1..b).rev().flat_map(move |c| {
                (0..c).rev().flat_map(move |d| {
                    SIGNS.into_iter().flat_map(move |(sb, sc, sd)| {
                        // 2^a exceeds the sum of the other three terms, so t is positive
                        let t = (1i128 << a)
                            + sb * (1i128 << b)
                            + sc * (1i128 << c)
                            + sd * (1i128 << d);
                        let t = U256::from_u64(t as u64);
                        [t, U256::ZERO.sub_mod(&t, &p)]
                    })
                })
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::Population;
    use crate::{
        U256,
        harness::HarnessConfig,
        modulus::{BTC_P, CURVE25519_P},
    };

    fn small_config() -> HarnessConfig {
        HarnessConfig {
            window: 4,
            powers: 3,
            low_weight_bits: 3..=4,
            ..HarnessConfig::default()
        }
    }

    #[test]
    fn near_modulus_is_literal() {
        let config = small_config();
        let values: Vec<_> = Population::NearModulus
            .candidates(&CURVE25519_P, &config)
            .collect();
        let p = *CURVE25519_P.value();
        assert_eq!(values.len(), 8);
        assert_eq!(values[0], p.wrapping_sub(&U256::from_u64(4)));
        assert_eq!(values[4], p);
        assert_eq!(values[7], p.wrapping_add(&U256::from_u64(3)));
    }

    #[test]
    fn oversized_window_is_clamped() {
        let config = HarnessConfig {
            window: u64::MAX,
            powers: u32::MAX,
            ..HarnessConfig::default()
        };
        let p = *BTC_P.value();
        let first: Vec<_> = Population::NearModulus
            .candidates(&BTC_P, &config)
            .take(2)
            .collect();
        let w = U256::from_u64(super::MAX_WINDOW);
        assert_eq!(first, [p.wrapping_sub(&w), p.wrapping_sub(&w).wrapping_add(&U256::ONE)]);

        let ceiling = Population::NearCeiling.candidates(&BTC_P, &config).next();
        assert_eq!(ceiling, Some(U256::MAX.wrapping_sub(&w.wrapping_sub(&U256::ONE))));

        // j = 0, i = -2^32
        let scaled = Population::ScaledResidues.candidates(&BTC_P, &config).next();
        assert_eq!(scaled, Some(p.wrapping_sub(&w)));
    }

    #[test]
    fn near_ceiling_ends_at_max() {
        let config = small_config();
        let values: Vec<_> = Population::NearCeiling
            .candidates(&CURVE25519_P, &config)
            .collect();
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], U256::MAX.wrapping_sub(&U256::from_u64(3)));
        assert_eq!(values[3], U256::MAX);
    }

    #[test]
    fn scaled_residues_cover_negatives() {
        let config = small_config();
        let values: Vec<_> = Population::ScaledResidues
            .candidates(&CURVE25519_P, &config)
            .collect();
        let p = *CURVE25519_P.value();
        assert_eq!(values.len(), 3 * 8);
        // j = 0, i = -4
        assert_eq!(values[0], p.wrapping_sub(&U256::from_u64(4)));
        // j = 2, i = 3
        assert_eq!(values[23], U256::from_u64(12));
        assert!(values.iter().all(|v| v.lt(&p)));
    }

    #[test]
    fn low_hamming_weight_terms() {
        let config = small_config();
        let values: Vec<_> = Population::LowHammingWeight
            .candidates(&CURVE25519_P, &config)
            .collect();
        // a = 4 admits C(4, 3) triples (b, c, d) and a = 3 admits one, each with 8 sign
        // patterns and both signs of t
        assert_eq!(values.len(), (4 + 1) * 8 * 2);
        // a = 4, b = 3, c = 2, d = 1, all positive
        assert_eq!(values[0], U256::from_u64(16 + 8 + 4 + 2));
        assert_eq!(
            values[1],
            CURVE25519_P.value().wrapping_sub(&U256::from_u64(30))
        );
    }
}
