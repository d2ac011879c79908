//! `Word` is the integer type wrapped by [`Limb`][`crate::Limb`].
//!
//! Limbs are 64 bits on every target, so Montgomery parameters and the order in which limbs
//! are laid out are identical across platforms.

/// Inner integer type that the [`Limb`][`crate::Limb`] newtype wraps.
pub type Word = u64;

/// Unsigned wide integer type: double the width of [`Word`].
pub type WideWord = u128;
