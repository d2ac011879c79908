//! secp256k1 group order.
//!
//! The top 124 bits of `n - 2` are all ones and come from `xN` windows; the remaining 132 bits
//! are consumed with a 4-bit sliding window over the odd powers `z^1 ..= z^15`.

use crate::chain::{
    AdditionChain, Register,
    Step::{Multiply, Save, Square},
};

const Z: Register = Register::INPUT;
const Z2: Register = Register::new(1, "z2");
const Z3: Register = Register::new(2, "z3");
const Z5: Register = Register::new(3, "z5");
const Z7: Register = Register::new(4, "z7");
const Z9: Register = Register::new(5, "z9");
const Z11: Register = Register::new(6, "z11");
const Z13: Register = Register::new(7, "z13");
const Z15: Register = Register::new(8, "z15");
const X8: Register = Register::new(9, "x8");
const X16: Register = Register::new(10, "x16");
const X32: Register = Register::new(11, "x32");

/// 253 squarings and 42 multiplications.
#[rustfmt::skip]
pub const CHAIN: AdditionChain<'static> = AdditionChain::new(&[
    Square(1), Save(Z2),
    Multiply(Z), Save(Z3),
    Multiply(Z2), Save(Z5),
    Multiply(Z2), Save(Z7),
    Multiply(Z2), Save(Z9),
    Multiply(Z2), Save(Z11),
    Multiply(Z2), Save(Z13),
    Multiply(Z2), Save(Z15),
    Square(4), Multiply(Z15), Save(X8),
    Square(8), Multiply(X8), Save(X16),
    Square(16), Multiply(X16), Save(X32),
    Square(32), Multiply(X32),
    Square(32), Multiply(X32),
    Square(16), Multiply(X16),
    Square(8), Multiply(X8),
    Square(4), Multiply(Z15),
    Square(3), Multiply(Z7), Square(5), Multiply(Z11), Square(3), Multiply(Z5),
    Square(4), Multiply(Z5), Square(4), Multiply(Z7), Square(5), Multiply(Z13),
    Square(2), Multiply(Z3), Square(5), Multiply(Z7), Square(6), Multiply(Z13),
    Square(5), Multiply(Z11), Square(4), Multiply(Z13), Square(3), Multiply(Z),
    Square(6), Multiply(Z5), Square(10), Multiply(Z7), Square(4), Multiply(Z7),
    Square(5), Multiply(Z15), Square(4), Multiply(Z15), Square(5), Multiply(Z9),
    Square(6), Multiply(Z11), Square(4), Multiply(Z13), Square(5), Multiply(Z3),
    Square(6), Multiply(Z13), Square(10), Multiply(Z13), Square(4), Multiply(Z9),
    Square(9), Multiply(Z9), Square(4), Multiply(Z15), Square(1), Multiply(Z),
]);
