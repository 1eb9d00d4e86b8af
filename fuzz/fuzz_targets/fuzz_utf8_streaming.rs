#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_verify::{Utf8Validator, validate_utf8};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    cuts: Vec<u16>,
}

fuzz_target!(|input: Input| {
    let Input { data, cuts } = input;

    let mut cuts: Vec<usize> = cuts
        .into_iter()
        .map(|c| usize::from(c) % (data.len() + 1))
        .collect();
    cuts.sort_unstable();

    let mut validator = Utf8Validator::new();
    let mut start = 0;
    for cut in cuts.into_iter().chain(std::iter::once(data.len())) {
        let _ = validator.update(&data[start..cut]);
        start = cut;
    }

    // Chunking must never change the outcome.
    assert_eq!(validator.finish(), validate_utf8(&data));
});
