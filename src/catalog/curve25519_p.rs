//! Curve25519 base field, `p = 2^255 - 19`.
//!
//! `p - 2 = 2^255 - 21`: 250 ones followed by `01011`.

use crate::chain::{
    AdditionChain, Register,
    Step::{Multiply, Save, Square},
};

const Z: Register = Register::INPUT;
const Z2: Register = Register::new(1, "z2");
const Z9: Register = Register::new(2, "z9");
const Z11: Register = Register::new(3, "z11");
const X5: Register = Register::new(4, "x5");
const X10: Register = Register::new(5, "x10");
const X20: Register = Register::new(6, "x20");
const X50: Register = Register::new(7, "x50");
const X100: Register = Register::new(8, "x100");

/// 254 squarings and 11 multiplications.
#[rustfmt::skip]
pub const CHAIN: AdditionChain<'static> = AdditionChain::new(&[
    Square(1), Save(Z2),                               // 2
    Square(2), Multiply(Z), Save(Z9),                  // 8 + 1
    Multiply(Z2), Save(Z11),                           // 9 + 2
    Square(1), Multiply(Z9), Save(X5),                 // 22 + 9 = 2^5 - 1
    Square(5), Multiply(X5), Save(X10),                // 2^10 - 1
    Square(10), Multiply(X10), Save(X20),              // 2^20 - 1
    Square(20), Multiply(X20), Square(10), Multiply(X10), Save(X50), // 2^50 - 1
    Square(50), Multiply(X50), Save(X100),             // 2^100 - 1
    Square(100), Multiply(X100),                       // 2^200 - 1
    Square(50), Multiply(X50),                         // 2^250 - 1
    Square(5), Multiply(Z11),                          // 2^255 - 32 + 11 = 2^255 - 21
]);
