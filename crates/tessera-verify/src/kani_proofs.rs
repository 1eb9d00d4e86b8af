//! Kani verification harnesses for the verification primitives
//!
//! Bounded model checking proofs over short inputs. Exhaustive coverage of
//! the UTF-8 automaton lives in `tests/utf8_exhaustive.rs`; these proofs pin
//! down the table-level facts that the traversal code relies on.
//!
//! # Running Proofs
//!
//! ```bash
//! # Verify all proofs
//! cargo kani --package tessera-verify
//!
//! # Verify specific proof
//! cargo kani --harness verify_crc32c_seal_any_word
//! ```

#[cfg(kani)]
mod verification {
    use crate::crc32c::{CRC32C_OK_REM, CRC32C_TABLE, POLYNOMIAL, crc32c_update};
    use crate::utf8::{
        CLASS_COUNT, TRANSITION_TABLE, TRANSITION_TABLE_LEN, UTF8_ACCEPT, UTF8_ERROR, class_of,
        is_valid_utf8, is_valid_utf8_prefix,
    };

    // -----------------------------------------------------------------------------
    // CRC32C Proofs
    // -----------------------------------------------------------------------------

    /// **Proof 1: table entries match bitwise reflection**
    ///
    /// **Property:** `CRC32C_TABLE[i]` is 8 reflection rounds of `i`
    #[kani::proof]
    #[kani::unwind(9)]
    fn verify_crc32c_table_entry() {
        let i: u8 = kani::any();
        let mut crc = u32::from(i);
        for _ in 0..8 {
            crc = if crc & 1 == 1 { (crc >> 1) ^ POLYNOMIAL } else { crc >> 1 };
        }

        assert_eq!(CRC32C_TABLE[usize::from(i)], crc);
    }

    /// **Proof 2: sealed words always hit the remainder**
    ///
    /// **Property:** for any 4-byte payload and any seed, appending the
    /// little-endian checksum yields `CRC32C_OK_REM`
    #[kani::proof]
    #[kani::unwind(10)]
    fn verify_crc32c_seal_any_word() {
        let seed: u32 = kani::any();
        let payload: [u8; 4] = kani::any();

        let crc = crc32c_update(seed, &payload);
        let mut record = [0u8; 8];
        record[..4].copy_from_slice(&payload);
        record[4..].copy_from_slice(&crc.to_le_bytes());

        assert_eq!(crc32c_update(seed, &record), CRC32C_OK_REM);
    }

    /// **Proof 3: chaining composes**
    ///
    /// **Property:** splitting a 2-byte message does not change the checksum
    #[kani::proof]
    #[kani::unwind(4)]
    fn verify_crc32c_split_two_bytes() {
        let seed: u32 = kani::any();
        let data: [u8; 2] = kani::any();

        let whole = crc32c_update(seed, &data);
        let split = crc32c_update(crc32c_update(seed, &data[..1]), &data[1..]);

        assert_eq!(whole, split);
    }

    // -----------------------------------------------------------------------------
    // UTF-8 Proofs
    // -----------------------------------------------------------------------------

    /// **Proof 4: transitions never index past the table**
    ///
    /// **Property:** every stored next state is a row base or the error marker
    #[kani::proof]
    fn verify_transition_targets_in_range() {
        let index: usize = kani::any();
        kani::assume(index < TRANSITION_TABLE_LEN);

        let next = usize::from(TRANSITION_TABLE[index]);
        assert_eq!(next % CLASS_COUNT, 0);
        assert!(next < TRANSITION_TABLE_LEN || next == usize::from(UTF8_ERROR));
    }

    /// **Proof 5: every high byte has a class**
    #[kani::proof]
    fn verify_class_in_range() {
        let byte: u8 = kani::any();
        kani::assume(byte >= 0x80);

        assert!(usize::from(class_of(byte)) < CLASS_COUNT);
    }

    /// **Proof 6: strict validity implies prefix validity**
    #[kani::proof]
    #[kani::unwind(5)]
    fn verify_valid_implies_prefix() {
        let data: [u8; 3] = kani::any();

        if is_valid_utf8(&data) {
            assert!(is_valid_utf8_prefix(&data));
        }
    }

    /// **Proof 7: a lone high byte is never complete**
    #[kani::proof]
    fn verify_single_high_byte_invalid() {
        let byte: u8 = kani::any();
        kani::assume(byte >= 0x80);

        assert!(!is_valid_utf8(&[byte]));
        assert_ne!(UTF8_ACCEPT, UTF8_ERROR);
    }
}
