//! # tessera-verify: Byte-stream verification primitives for `Tessera`
//!
//! This crate provides the two integrity checks that Tessera's framing and
//! storage layers run over raw bytes:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`crc32c`] | Table-driven CRC32C (Castagnoli) with self-verifying trailers |
//! | [`utf8`] | Minimized DFA for strict and prefix UTF-8 validation |
//! | [`error`] | Typed failures for the `Result`-returning helpers |
//!
//! Every lookup table is a `const` computed at compile time, so all functions
//! here are pure, allocation-free and safe to call from any thread.
//!
//! ## Quick Start
//!
//! ```
//! use tessera_verify::{CRC32C_OK_REM, crc32c, crc32c_update, is_valid_utf8, is_valid_utf8_prefix};
//!
//! // Append a checksum, then verify the whole buffer in one pass.
//! let mut record = b"hello there".to_vec();
//! let crc = crc32c(&record);
//! record.extend_from_slice(&crc.to_le_bytes());
//! assert_eq!(crc32c_update(0, &record), CRC32C_OK_REM);
//!
//! // A truncated multi-byte character is incomplete, not malformed.
//! assert!(!is_valid_utf8(&[0xE2, 0x82]));
//! assert!(is_valid_utf8_prefix(&[0xE2, 0x82]));
//! ```

pub mod crc32c;
pub mod error;
pub mod utf8;

mod kani_proofs;


// Re-export primary types at crate root for convenience
pub use crc32c::{
    CHECKSUM_LEN, CRC32C_INIT, CRC32C_OK_REM, CRC32C_TABLE, Crc32c, build_crc32c_table, crc32c,
    crc32c_update, is_sealed, open_sealed, seal,
};
pub use error::{ChecksumError, Utf8Error};
pub use utf8::{
    Utf8Validator, build_utf8_class_table, build_utf8_transition_table, is_valid_utf8,
    is_valid_utf8_prefix, validate_utf8,
};
