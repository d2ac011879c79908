//! Const-friendly decoding/encoding operations for [`U256`].

use super::{LIMBS, U256};
use crate::{Error, Limb, Result, Word};

impl U256 {
    /// Create a new [`U256`] from the provided big endian bytes.
    pub const fn from_be_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut res = [Limb::ZERO; LIMBS];
        let mut buf = [0u8; Limb::BYTES];
        let mut i = 0;

        while i < LIMBS {
            let mut j = 0;
            while j < Limb::BYTES {
                buf[j] = bytes[i * Limb::BYTES + j];
                j += 1;
            }
            res[LIMBS - i - 1] = Limb(Word::from_be_bytes(buf));
            i += 1;
        }

        U256::new(res)
    }

    /// Create a new [`U256`] from the provided little endian bytes.
    pub const fn from_le_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut res = [Limb::ZERO; LIMBS];
        let mut buf = [0u8; Limb::BYTES];
        let mut i = 0;

        while i < LIMBS {
            let mut j = 0;
            while j < Limb::BYTES {
                buf[j] = bytes[i * Limb::BYTES + j];
                j += 1;
            }
            res[i] = Limb(Word::from_le_bytes(buf));
            i += 1;
        }

        U256::new(res)
    }

    /// Create a new [`U256`] from a little endian byte slice.
    ///
    /// Fails with [`Error::MalformedInput`] unless the slice is exactly 32 bytes long.
    pub fn from_le_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::BYTES] = bytes.try_into().map_err(|_| Error::MalformedInput {
            expected: Self::BYTES,
            actual: bytes.len(),
        })?;
        Ok(Self::from_le_bytes(bytes))
    }

    /// Create a new [`U256`] from the provided big endian hex string.
    ///
    /// # Panics
    /// - if the hex is malformed or not zero-padded accordingly for the size.
    pub const fn from_be_hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();

        assert!(
            bytes.len() == Self::BYTES * 2,
            "hex string is not the expected size"
        );

        let mut res = [Limb::ZERO; LIMBS];
        let mut buf = [0u8; Limb::BYTES];
        let mut i = 0;
        let mut err = 0;

        while i < LIMBS {
            let mut j = 0;
            while j < Limb::BYTES {
                let offset = (i * Limb::BYTES + j) * 2;
                let (result, byte_err) = decode_hex_byte([bytes[offset], bytes[offset + 1]]);
                err |= byte_err;
                buf[j] = result;
                j += 1;
            }
            res[LIMBS - i - 1] = Limb(Word::from_be_bytes(buf));
            i += 1;
        }

        assert!(err == 0, "invalid hex byte");

        U256::new(res)
    }

    /// Parse the 64 hex digits of a little-endian encoding, as printed by `to_le_bytes`.
    ///
    /// Fails with [`Error::MalformedInput`] on any other length and [`Error::InvalidDigit`] on
    /// anything but `0-9`, `a-f` and `A-F`.
    pub fn from_le_hex(hex: &str) -> Result<Self> {
        let digits = hex.as_bytes();
        if digits.len() != Self::BYTES * 2 {
            return Err(Error::MalformedInput {
                expected: Self::BYTES,
                actual: digits.len() / 2,
            });
        }

        let mut bytes = [0u8; Self::BYTES];
        let mut err = 0;
        for (byte, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            let (result, byte_err) = decode_hex_byte([pair[0], pair[1]]);
            err |= byte_err;
            *byte = result;
        }

        if err != 0 {
            return Err(Error::InvalidDigit);
        }
        Ok(Self::from_le_bytes(bytes))
    }

    /// Serialize this [`U256`] as big-endian.
    pub const fn to_be_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        let limbs = self.as_limbs();
        let mut i = 0;

        while i < LIMBS {
            let bytes = limbs[LIMBS - i - 1].0.to_be_bytes();
            let mut j = 0;
            while j < Limb::BYTES {
                out[i * Limb::BYTES + j] = bytes[j];
                j += 1;
            }
            i += 1;
        }

        out
    }

    /// Serialize this [`U256`] as little-endian.
    pub const fn to_le_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        let limbs = self.as_limbs();
        let mut i = 0;

        while i < LIMBS {
            let bytes = limbs[i].to_le_bytes();
            let mut j = 0;
            while j < Limb::BYTES {
                out[i * Limb::BYTES + j] = bytes[j];
                j += 1;
            }
            i += 1;
        }

        out
    }
}

/// Decode a single nibble of upper or lower hex
#[inline(always)]
const fn decode_nibble(src: u8) -> u16 {
    let byte = src as i16;
    let mut ret: i16 = -1;

    // 0-9  0x30-0x39
    // if (byte > 0x2f && byte < 0x3a) ret += byte - 0x30 + 1; // -47
    ret += (((0x2fi16 - byte) & (byte - 0x3a)) >> 8) & (byte - 47);
    // A-F  0x41-0x46
    // if (byte > 0x40 && byte < 0x47) ret += byte - 0x41 + 10 + 1; // -54
    ret += (((0x40i16 - byte) & (byte - 0x47)) >> 8) & (byte - 54);
    // a-f  0x61-0x66
    // if (byte > 0x60 && byte < 0x67) ret += byte - 0x61 + 10 + 1; // -86
    ret += (((0x60i16 - byte) & (byte - 0x67)) >> 8) & (byte - 86);

    ret as u16
}

/// Decode a single byte encoded as two hexadecimal characters.
/// Second element of the tuple is non-zero if the `bytes` values are not in the valid range
/// (0-9, a-z, A-Z).
#[inline(always)]
const fn decode_hex_byte(bytes: [u8; 2]) -> (u8, u16) {
    let hi = decode_nibble(bytes[0]);
    let lo = decode_nibble(bytes[1]);
    let byte = (hi << 4) | lo;
    let err = byte >> 8;
    let result = byte as u8;
    (result, err)
}
