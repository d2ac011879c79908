//! Registry of the supported moduli and their inversion chains.

use crate::{
    AdditionChain, Error, FIELD_BYTES, Result, U256, catalog, evaluate, modular::MontyParams,
};
use core::{fmt, str::FromStr};

/// A registered odd modulus together with everything needed to invert modulo it.
///
/// Instances are built in `const` context and live in `static`s; they are never mutated.
#[derive(Debug)]
pub struct Modulus {
    id: ModulusId,
    value: U256,
    bits: u32,
    params: MontyParams,
    chain: AdditionChain<'static>,
}

impl Modulus {
    const fn new(id: ModulusId, hex: &str, chain: AdditionChain<'static>) -> Self {
        let value = U256::from_be_hex(hex);
        Self {
            id,
            value,
            bits: value.bits_vartime(),
            params: MontyParams::new(value),
            chain,
        }
    }

    /// Identifier of this modulus.
    pub const fn id(&self) -> ModulusId {
        self.id
    }

    /// Canonical name, e.g. `BTC_p`.
    pub const fn name(&self) -> &'static str {
        self.id.name()
    }

    /// The modulus `p`.
    pub const fn value(&self) -> &U256 {
        &self.value
    }

    /// Bit length of `p`.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Montgomery parameters for arithmetic modulo `p`.
    pub const fn params(&self) -> &MontyParams {
        &self.params
    }

    /// The addition chain computing `z^(p - 2)`.
    pub const fn chain(&self) -> &AdditionChain<'static> {
        &self.chain
    }

    /// Canonical little-endian encoding of `p`.
    pub const fn to_le_bytes(&self) -> [u8; FIELD_BYTES] {
        self.value.to_le_bytes()
    }

    /// Reduce any 256-bit integer into `[0, p)`.
    pub const fn reduce(&self, x: &U256) -> U256 {
        self.params.reduce(x)
    }

    /// Compute `x^(p - 2) mod p`, the inverse of `x` when `x ≢ 0`, and `0` otherwise.
    ///
    /// `x` may be any 256-bit integer, including values `>= p`.
    pub fn invert(&self, x: &U256) -> U256 {
        evaluate(&self.chain, &self.params, x)
    }

    /// Invert a canonical 32-byte little-endian encoding.
    pub fn invert_bytes(&self, bytes: &[u8]) -> Result<[u8; FIELD_BYTES]> {
        let x = U256::from_le_slice(bytes)?;
        Ok(self.invert(&x).to_le_bytes())
    }
}

impl fmt::Display for Modulus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = 0x{:x}", self.name(), self.value)
    }
}

/// NIST P-256 base field prime.
pub static P256_P: Modulus = Modulus::new(
    ModulusId::P256P,
    "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff",
    catalog::P256_P,
);

/// NIST P-256 group order.
pub static P256_N: Modulus = Modulus::new(
    ModulusId::P256N,
    "ffffffff00000000ffffffffffffffffbce6faada7179e84f3b9cac2fc632551",
    catalog::P256_N,
);

/// SM2 base field prime.
pub static SM2_P: Modulus = Modulus::new(
    ModulusId::Sm2P,
    "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff",
    catalog::SM2_P,
);

/// Curve25519 base field prime, `2^255 - 19`.
pub static CURVE25519_P: Modulus = Modulus::new(
    ModulusId::Curve25519P,
    "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed",
    catalog::CURVE25519_P,
);

/// secp256k1 base field prime.
pub static BTC_P: Modulus = Modulus::new(
    ModulusId::BtcP,
    "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f",
    catalog::SECP256K1_P,
);

/// secp256k1 group order.
pub static BTC_N: Modulus = Modulus::new(
    ModulusId::BtcN,
    "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141",
    catalog::SECP256K1_N,
);

/// Every registered modulus, in registry order.
pub static MODULI: [&Modulus; 6] = [&BTC_P, &BTC_N, &P256_P, &P256_N, &SM2_P, &CURVE25519_P];

/// Identifier of a registered modulus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ModulusId {
    /// secp256k1 base field.
    #[cfg_attr(feature = "cli", value(name = "BTC_p", alias = "secp256k1_p"))]
    BtcP,
    /// secp256k1 group order.
    #[cfg_attr(feature = "cli", value(name = "BTC_n", alias = "secp256k1_n"))]
    BtcN,
    /// NIST P-256 base field.
    #[cfg_attr(feature = "cli", value(name = "P256_p"))]
    P256P,
    /// NIST P-256 group order.
    #[cfg_attr(feature = "cli", value(name = "P256_n"))]
    P256N,
    /// SM2 base field.
    #[cfg_attr(feature = "cli", value(name = "SM2_p"))]
    Sm2P,
    /// Curve25519 base field.
    #[cfg_attr(feature = "cli", value(name = "Curve25519_p", alias = "25519_p"))]
    Curve25519P,
}

impl ModulusId {
    /// All identifiers, in registry order.
    pub const ALL: [ModulusId; 6] = [
        ModulusId::BtcP,
        ModulusId::BtcN,
        ModulusId::P256P,
        ModulusId::P256N,
        ModulusId::Sm2P,
        ModulusId::Curve25519P,
    ];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            ModulusId::BtcP => "BTC_p",
            ModulusId::BtcN => "BTC_n",
            ModulusId::P256P => "P256_p",
            ModulusId::P256N => "P256_n",
            ModulusId::Sm2P => "SM2_p",
            ModulusId::Curve25519P => "Curve25519_p",
        }
    }

    /// The registered modulus.
    pub fn modulus(self) -> &'static Modulus {
        match self {
            ModulusId::BtcP => &BTC_P,
            ModulusId::BtcN => &BTC_N,
            ModulusId::P256P => &P256_P,
            ModulusId::P256N => &P256_N,
            ModulusId::Sm2P => &SM2_P,
            ModulusId::Curve25519P => &CURVE25519_P,
        }
    }
}

impl fmt::Display for ModulusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const ALIASES: [(&str, ModulusId); 3] = [
    ("secp256k1_p", ModulusId::BtcP),
    ("secp256k1_n", ModulusId::BtcN),
    ("25519_p", ModulusId::Curve25519P),
];

impl FromStr for ModulusId {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .map(|id| (id.name(), id))
            .chain(ALIASES)
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, id)| id)
            .ok_or_else(|| Error::UnknownModulus(name.into()))
    }
}

/// Look up a registered modulus by name.
pub fn lookup(name: &str) -> Result<&'static Modulus> {
    name.parse::<ModulusId>().map(ModulusId::modulus)
}

/// Look up the inversion chain registered for a modulus name.
pub fn get_chain(name: &str) -> Result<&'static AdditionChain<'static>> {
    lookup(name).map(Modulus::chain)
}

#[cfg(test)]
mod tests {
    use super::{MODULI, ModulusId, get_chain, lookup};
    use crate::{Error, U256};

    #[test]
    fn registry_order() {
        let names: Vec<_> = MODULI.iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            ["BTC_p", "BTC_n", "P256_p", "P256_n", "SM2_p", "Curve25519_p"]
        );
        for (m, id) in MODULI.iter().zip(ModulusId::ALL) {
            assert_eq!(m.id(), id);
            assert!(core::ptr::eq(*m, id.modulus()));
        }
    }

    #[test]
    fn bit_lengths() {
        for m in MODULI {
            let expected = if m.id() == ModulusId::Curve25519P { 255 } else { 256 };
            assert_eq!(m.bits(), expected, "{}", m.name());
            assert!(m.value().is_odd());
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(lookup("P256_p").map(|m| m.id()), Ok(ModulusId::P256P));
        assert_eq!(lookup("p256_P").map(|m| m.id()), Ok(ModulusId::P256P));
        assert_eq!(lookup("secp256k1_n").map(|m| m.id()), Ok(ModulusId::BtcN));
        assert_eq!(lookup("25519_p").map(|m| m.id()), Ok(ModulusId::Curve25519P));
        assert_eq!(
            lookup("P384_p").map(|m| m.id()),
            Err(Error::UnknownModulus("P384_p".into()))
        );
        assert!(get_chain("SM2_p").is_ok());
        assert!(matches!(get_chain(""), Err(Error::UnknownModulus(_))));
    }

    #[test]
    fn invert_small_values() {
        for m in MODULI {
            assert_eq!(m.invert(&U256::ZERO), U256::ZERO);
            assert_eq!(m.invert(&U256::ONE), U256::ONE);
            assert_eq!(m.invert(m.value()), U256::ZERO);
        }
    }

    #[test]
    fn invert_bytes_rejects_wrong_length() {
        let m = ModulusId::BtcP.modulus();
        assert_eq!(
            m.invert_bytes(&[1u8; 31]),
            Err(Error::MalformedInput {
                expected: 32,
                actual: 31
            })
        );
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(m.invert_bytes(&one), Ok(one));
    }

    #[test]
    fn display() {
        assert_eq!(
            super::CURVE25519_P.to_string(),
            "Curve25519_p = 0x7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
        );
    }
}
