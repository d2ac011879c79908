//! SM2 base field, `p = 2^256 - 2^224 - 2^96 + 2^64 - 1`.

use crate::chain::{
    AdditionChain, Register,
    Step::{Multiply, Save, Square},
};

const Z: Register = Register::INPUT;
const X3: Register = Register::new(1, "x3");
const X6: Register = Register::new(2, "x6");
const X15: Register = Register::new(3, "x15");
const X31: Register = Register::new(4, "x31");

/// 255 squarings and 16 multiplications.
#[rustfmt::skip]
pub const CHAIN: AdditionChain<'static> = AdditionChain::new(&[
    Square(1), Multiply(Z), Square(1), Multiply(Z), Save(X3),
    Square(3), Multiply(X3), Save(X6),
    Square(6), Multiply(X6), Square(3), Multiply(X3), Save(X15),
    Square(15), Multiply(X15), Square(1), Multiply(Z), Save(X31),
    // fffffffe followed by 128 ones
    Square(32), Multiply(X31),
    Square(31), Multiply(X31),
    Square(31), Multiply(X31),
    Square(31), Multiply(X31),
    Square(3), Multiply(X3),
    Square(1), Multiply(Z),
    // 00000000 ffffffff fffffffd
    Square(63), Multiply(X31),
    Square(31), Multiply(X31),
    Square(2), Multiply(Z),
]);
