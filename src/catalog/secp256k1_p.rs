//! secp256k1 base field, `p = 2^256 - 2^32 - 977`.
//!
//! `p - 2` is 223 ones, a zero, 22 ones, then `0000101101`.

use crate::chain::{
    AdditionChain, Register,
    Step::{Multiply, Save, Square},
};

const Z: Register = Register::INPUT;
const X2: Register = Register::new(1, "x2");
const X3: Register = Register::new(2, "x3");
const X11: Register = Register::new(3, "x11");
const X22: Register = Register::new(4, "x22");
const X44: Register = Register::new(5, "x44");
const X88: Register = Register::new(6, "x88");

/// 255 squarings and 15 multiplications.
#[rustfmt::skip]
pub const CHAIN: AdditionChain<'static> = AdditionChain::new(&[
    Square(1), Multiply(Z), Save(X2),
    Square(1), Multiply(Z), Save(X3),
    Square(3), Multiply(X3), Square(3), Multiply(X3), Square(2), Multiply(X2), Save(X11),
    Square(11), Multiply(X11), Save(X22),
    Square(22), Multiply(X22), Save(X44),
    Square(44), Multiply(X44), Save(X88),
    Square(88), Multiply(X88),
    Square(44), Multiply(X44),
    // x223
    Square(3), Multiply(X3),
    Square(23), Multiply(X22),
    Square(5), Multiply(Z),
    Square(3), Multiply(X2),
    Square(2), Multiply(Z),
]);
