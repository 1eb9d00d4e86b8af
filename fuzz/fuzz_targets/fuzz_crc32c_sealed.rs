#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_verify::{
    CHECKSUM_LEN, CRC32C_OK_REM, ChecksumError, Crc32c, crc32c, crc32c_update, is_sealed,
    open_sealed, seal,
};

fuzz_target!(|data: &[u8]| {
    // Test 1: open_sealed on arbitrary data never panics and agrees with is_sealed
    match open_sealed(data) {
        Ok(payload) => {
            assert!(is_sealed(data));
            assert_eq!(payload.len(), data.len() - CHECKSUM_LEN);
        }
        Err(ChecksumError::TooShort { len }) => assert!(len < CHECKSUM_LEN),
        Err(ChecksumError::Mismatch { stored, computed }) => {
            assert!(!is_sealed(data));
            assert_ne!(stored, computed);
        }
    }

    // Test 2: sealing any payload lands on the fixed remainder for any seed
    let seed = data
        .get(..4)
        .map_or(0, |b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]));
    let crc = crc32c_update(seed, data);
    let mut record = data.to_vec();
    record.extend_from_slice(&crc.to_le_bytes());
    assert_eq!(crc32c_update(seed, &record), CRC32C_OK_REM);

    // Test 3: seal/open round-trip returns the original payload
    let mut sealed = data.to_vec();
    seal(&mut sealed);
    assert_eq!(open_sealed(&sealed), Ok(data));

    // Test 4: streaming split at the midpoint matches one-shot
    let split = data.len() / 2;
    let mut hasher = Crc32c::new();
    hasher.update(&data[..split]);
    hasher.update(&data[split..]);
    assert_eq!(hasher.finalize(), crc32c(data));
});
