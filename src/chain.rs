//! Addition chains: fixed, public plans for computing `x^e` with squarings and
//! multiplications by saved intermediate powers.
//!
//! A chain is plain data. The step sequence and every register it references are fixed when
//! the chain is defined; only the field values flowing through the registers vary from call to
//! call. Executing one with [`evaluate`][`crate::evaluate`] therefore performs the same
//! sequence of field operations for every input.
//!
//! Each value held in a register is `z^e` for the input `z`. Squaring `k` times multiplies the
//! working exponent by `2^k`; multiplying by a register adds that register's exponent. The
//! exponent a chain computes can be recovered with
//! [`chain_exponent`][`crate::oracle::chain_exponent`].

use crate::ChainDefect;
use core::fmt;

/// Number of register slots available to a chain, including the input.
pub const MAX_REGISTERS: usize = 16;

/// A named register slot holding an intermediate power of the input.
///
/// Slot `0` is always the input itself, [`Register::INPUT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Register {
    slot: u8,
    name: &'static str,
}

impl Register {
    /// The chain's input `z`.
    pub const INPUT: Self = Self { slot: 0, name: "z" };

    /// Declare a register occupying `slot`.
    pub const fn new(slot: u8, name: &'static str) -> Self {
        Self { slot, name }
    }

    /// Index into the register file.
    pub const fn slot(&self) -> usize {
        self.slot as usize
    }

    /// Human-readable name, e.g. `x32` for `z^(2^32 - 1)`.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

/// One step of an addition chain, applied to the working value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// Square the working value `k` times, i.e. raise it to the `2^k`-th power.
    Square(u32),
    /// Multiply the working value by a previously saved register.
    Multiply(Register),
    /// Bind the current working value to a register for later reuse.
    Save(Register),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Square(k) => write!(f, "sqr^{k}"),
            Step::Multiply(reg) => write!(f, "mul {}", reg.name),
            Step::Save(reg) => write!(f, "save {}", reg.name),
        }
    }
}

/// A validated sequence of [`Step`]s.
///
/// Validation guarantees that every `Multiply` reads a register written by an earlier `Save`
/// (or the input), that no `Save` clobbers the input, that every register fits in the
/// [`MAX_REGISTERS`]-slot register file and keeps a single name, and that every `Square` does
/// at least one squaring. It does not check which exponent the chain computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdditionChain<'a> {
    steps: &'a [Step],
    registers: usize,
    squarings: u32,
    multiplications: u32,
}

impl<'a> AdditionChain<'a> {
    /// Validate `steps` in `const` context.
    ///
    /// # Panics
    /// - if the steps fail validation. For chains defined as constants this is a compile error.
    pub const fn new(steps: &'a [Step]) -> Self {
        match Self::try_new(steps) {
            Ok(chain) => chain,
            Err(_) => panic!("malformed addition chain"),
        }
    }

    /// Validate `steps`, reporting the first defect found.
    pub const fn try_new(steps: &'a [Step]) -> Result<Self, ChainDefect> {
        if steps.is_empty() {
            return Err(ChainDefect::Empty);
        }

        let mut names = [""; MAX_REGISTERS];
        names[0] = Register::INPUT.name;
        let mut named: u32 = 1;
        let mut saved: u32 = 1;
        let mut registers = 1;
        let mut squarings: u32 = 0;
        let mut multiplications: u32 = 0;

        let mut step = 0;
        while step < steps.len() {
            match steps[step] {
                Step::Square(k) => {
                    if k == 0 {
                        return Err(ChainDefect::ZeroSquaring { step });
                    }
                    squarings = match squarings.checked_add(k) {
                        Some(total) => total,
                        None => return Err(ChainDefect::TooManySquarings { step }),
                    };
                }
                Step::Multiply(reg) | Step::Save(reg) => {
                    let slot = reg.slot();
                    if slot >= MAX_REGISTERS {
                        return Err(ChainDefect::RegisterOutOfRange { step });
                    }

                    let bit = 1u32 << slot;
                    if named & bit == 0 {
                        names[slot] = reg.name;
                        named |= bit;
                    } else if !str_eq(names[slot], reg.name) {
                        return Err(ChainDefect::RegisterNameConflict { step });
                    }

                    if let Step::Save(_) = steps[step] {
                        if slot == Register::INPUT.slot() {
                            return Err(ChainDefect::InputOverwritten { step });
                        }
                        saved |= bit;
                    } else {
                        if saved & bit == 0 {
                            return Err(ChainDefect::UndefinedRegister { step });
                        }
                        multiplications = match multiplications.checked_add(1) {
                            Some(total) => total,
                            None => return Err(ChainDefect::TooManyMultiplications { step }),
                        };
                    }

                    if slot + 1 > registers {
                        registers = slot + 1;
                    }
                }
            }
            step += 1;
        }

        Ok(Self {
            steps,
            registers,
            squarings,
            multiplications,
        })
    }

    /// The steps, in execution order.
    pub const fn steps(&self) -> &'a [Step] {
        self.steps
    }

    /// Declared register budget: one more than the highest slot referenced.
    pub const fn registers(&self) -> usize {
        self.registers
    }

    /// Total number of squarings performed.
    pub const fn squarings(&self) -> u32 {
        self.squarings
    }

    /// Total number of multiplications performed.
    pub const fn multiplications(&self) -> u32 {
        self.multiplications
    }
}

impl fmt::Display for AdditionChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(step, f)?;
        }
        Ok(())
    }
}

const fn str_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }

    let mut i = 0;
    while i < a.len() {
        if a[i] != b[i] {
            return false;
        }
        i += 1;
    }

    true
}
