//! Property-based tests using proptest.
//!
//! Tests invariants that should hold for all inputs, using fuzzing-like techniques.

use proptest::collection::vec;
use proptest::prelude::*;

use crate::crc32c::{CRC32C_OK_REM, Crc32c, crc32c, crc32c_update, is_sealed, seal};
use crate::error::Utf8Error;
use crate::utf8::{Utf8Validator, is_valid_utf8, is_valid_utf8_prefix, validate_utf8};

/// Valid UTF-8 with at most one byte overwritten or the tail cut off.
fn mostly_utf8() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        any::<String>().prop_map(String::into_bytes),
        (any::<String>(), any::<usize>(), any::<u8>()).prop_map(|(s, pos, byte)| {
            let mut bytes = s.into_bytes();
            if !bytes.is_empty() {
                let i = pos % bytes.len();
                bytes[i] = byte;
            }
            bytes
        }),
        (any::<String>(), any::<usize>()).prop_map(|(s, cut)| {
            let mut bytes = s.into_bytes();
            bytes.truncate(cut % (bytes.len() + 1));
            bytes
        }),
        vec(any::<u8>(), 0..64),
    ]
}

proptest! {
    // ========================================================================
    // CRC32C
    // ========================================================================

    /// Chaining finalized checksums equals checksumming the concatenation
    #[test]
    fn crc32c_update_composes(seed: u32, a: Vec<u8>, b: Vec<u8>) {
        let mut joined = a.clone();
        joined.extend_from_slice(&b);

        prop_assert_eq!(
            crc32c_update(crc32c_update(seed, &a), &b),
            crc32c_update(seed, &joined)
        );
    }

    /// Any buffer followed by its own checksum lands on the fixed remainder
    #[test]
    fn trailing_checksum_yields_ok_rem(seed: u32, data: Vec<u8>) {
        let crc = crc32c_update(seed, &data);
        let mut record = data;
        record.extend_from_slice(&crc.to_le_bytes());

        prop_assert_eq!(crc32c_update(seed, &record), CRC32C_OK_REM);
    }

    /// Streaming hasher matches one-shot for any split
    #[test]
    fn hasher_chunking_invariant(data: Vec<u8>, split: usize) {
        let split = split % (data.len() + 1);
        let mut hasher = Crc32c::new();
        hasher.update(&data[..split]);
        hasher.update(&data[split..]);

        prop_assert_eq!(hasher.finalize(), crc32c(&data));
    }

    /// Flipping any single bit of a sealed buffer is detected
    #[test]
    fn single_bit_flip_breaks_seal(data in vec(any::<u8>(), 0..256), flip: usize) {
        let mut record = data;
        seal(&mut record);
        prop_assert!(is_sealed(&record));

        let bit = flip % (record.len() * 8);
        record[bit / 8] ^= 1 << (bit % 8);
        prop_assert!(!is_sealed(&record));
    }

    /// Two-bit errors within the checksum window are detected
    #[test]
    fn double_bit_flip_breaks_seal(
        data in vec(any::<u8>(), 1..64),
        first: usize,
        second: usize,
    ) {
        let mut record = data;
        seal(&mut record);

        let bits = record.len() * 8;
        let a = first % bits;
        let b = second % bits;
        prop_assume!(a != b);

        record[a / 8] ^= 1 << (a % 8);
        record[b / 8] ^= 1 << (b % 8);
        prop_assert!(!is_sealed(&record));
    }

    // ========================================================================
    // UTF-8
    // ========================================================================

    /// Any ASCII-only sequence is valid
    #[test]
    fn ascii_is_always_valid(data in vec(0u8..0x80, 0..512)) {
        prop_assert!(is_valid_utf8(&data));
        prop_assert!(is_valid_utf8_prefix(&data));
    }

    /// Every Rust string is valid UTF-8
    #[test]
    fn strings_are_valid(s: String) {
        prop_assert!(is_valid_utf8(s.as_bytes()));
    }

    /// Cutting a string anywhere yields a valid prefix, and a valid
    /// sequence exactly at character boundaries
    #[test]
    fn string_prefixes(s: String, cut: usize) {
        let cut = cut % (s.len() + 1);
        let prefix = &s.as_bytes()[..cut];

        prop_assert!(is_valid_utf8_prefix(prefix));
        prop_assert_eq!(is_valid_utf8(prefix), s.is_char_boundary(cut));
    }

    /// Strict validation agrees with the standard library on arbitrary bytes
    #[test]
    fn strict_matches_std(data in mostly_utf8()) {
        prop_assert_eq!(is_valid_utf8(&data), std::str::from_utf8(&data).is_ok());
    }

    /// Error positions and kinds agree with the standard library
    #[test]
    fn validate_matches_std_error(data in mostly_utf8()) {
        match (validate_utf8(&data), std::str::from_utf8(&data)) {
            (Ok(()), Ok(_)) => {}
            (Err(ours), Err(theirs)) => {
                prop_assert_eq!(ours.valid_up_to(), theirs.valid_up_to());
                prop_assert_eq!(ours.is_incomplete(), theirs.error_len().is_none());
            }
            (ours, theirs) => prop_assert!(false, "disagreement: {:?} vs {:?}", ours, theirs),
        }
    }

    /// Prefix validity is exactly "valid, or fails only by running out"
    #[test]
    fn prefix_means_not_malformed(data in mostly_utf8()) {
        let malformed = matches!(validate_utf8(&data), Err(Utf8Error::Malformed { .. }));
        prop_assert_eq!(is_valid_utf8_prefix(&data), !malformed);
    }

    /// Feeding any chunking to the streaming validator matches one-shot validation
    #[test]
    fn chunked_validator_matches_whole(data in mostly_utf8(), cuts in vec(any::<usize>(), 0..8)) {
        let mut cuts: Vec<usize> = cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
        cuts.sort_unstable();

        let mut validator = Utf8Validator::new();
        let mut start = 0;
        for cut in cuts.into_iter().chain(std::iter::once(data.len())) {
            let _ = validator.update(&data[start..cut]);
            start = cut;
        }

        prop_assert_eq!(validator.finish(), validate_utf8(&data));
    }
}
