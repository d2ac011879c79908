//! NIST P-256 base field, `p = 2^256 - 2^224 + 2^192 + 2^96 - 1`.
//!
//! `p - 2 = ffffffff 00000001 00000000 00000000 00000000 ffffffff ffffffff fffffffd`, which
//! is runs of ones separated by long runs of zeros, so a handful of `xN` windows suffice.

use crate::chain::{
    AdditionChain, Register,
    Step::{Multiply, Save, Square},
};

const Z: Register = Register::INPUT;
const X2: Register = Register::new(1, "x2");
const X3: Register = Register::new(2, "x3");
const X6: Register = Register::new(3, "x6");
const X15: Register = Register::new(4, "x15");
const X30: Register = Register::new(5, "x30");
const X32: Register = Register::new(6, "x32");

/// 255 squarings and 12 multiplications.
#[rustfmt::skip]
pub const CHAIN: AdditionChain<'static> = AdditionChain::new(&[
    Square(1), Multiply(Z), Save(X2),
    Square(1), Multiply(Z), Save(X3),
    Square(3), Multiply(X3), Save(X6),
    Square(6), Multiply(X6), Square(3), Multiply(X3), Save(X15),
    Square(15), Multiply(X15), Save(X30),
    Square(2), Multiply(X2), Save(X32),
    // ffffffff 00000001
    Square(32), Multiply(Z),
    // 00000000 00000000 00000000 ffffffff
    Square(128), Multiply(X32),
    // ffffffff
    Square(32), Multiply(X32),
    // fffffffd
    Square(30), Multiply(X30),
    Square(2), Multiply(Z),
]);
