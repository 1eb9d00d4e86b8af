#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_verify::{is_valid_utf8, is_valid_utf8_prefix, validate_utf8};

fuzz_target!(|data: &[u8]| {
    let expected = core::str::from_utf8(data);

    // Strict validation must agree with the standard library exactly.
    assert_eq!(is_valid_utf8(data), expected.is_ok());

    match (validate_utf8(data), expected) {
        (Ok(()), Ok(_)) => {}
        (Err(ours), Err(theirs)) => {
            assert_eq!(ours.valid_up_to(), theirs.valid_up_to());
            assert_eq!(ours.is_incomplete(), theirs.error_len().is_none());

            // Prefix validation only fails for structurally wrong input.
            assert_eq!(is_valid_utf8_prefix(data), ours.is_incomplete());
        }
        (ours, theirs) => panic!("disagreement: {ours:?} vs {theirs:?}"),
    }
});
