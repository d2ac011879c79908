#![no_main]
use arbitrary::Arbitrary;
use fermat_chain::{ModulusId, oracle::oracle_inverse};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
pub struct Input {
    modulus: u8,
    bytes: [u8; 32],
}

fuzz_target!(|input: Input| {
    let id = ModulusId::ALL[usize::from(input.modulus) % ModulusId::ALL.len()];
    let m = id.modulus();
    let actual = m.invert_bytes(&input.bytes).unwrap();
    assert_eq!(actual, oracle_inverse(m, &input.bytes).unwrap(), "{id}");
});
