//! Verification error types

use thiserror::Error;

/// Failure to open a buffer sealed with a trailing CRC32C.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("sealed buffer is {len} bytes, too short to hold a 4-byte checksum")]
    TooShort { len: usize },

    #[error("checksum mismatch: stored {stored:#010x}, computed {computed:#010x}")]
    Mismatch { stored: u32, computed: u32 },
}

/// Failure to validate a byte sequence as UTF-8.
///
/// `Malformed` means no continuation can make the input valid. `Incomplete`
/// means the input stopped partway through a multi-byte character and more
/// bytes could still complete it.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Error {
    #[error("malformed UTF-8 at byte {offset} (valid up to {valid_up_to})")]
    Malformed { valid_up_to: usize, offset: usize },

    #[error("incomplete UTF-8 sequence at end of input (valid up to {valid_up_to})")]
    Incomplete { valid_up_to: usize },
}

impl Utf8Error {
    /// Length of the longest prefix that is complete, valid UTF-8.
    pub fn valid_up_to(&self) -> usize {
        match *self {
            Utf8Error::Malformed { valid_up_to, .. } | Utf8Error::Incomplete { valid_up_to } => {
                valid_up_to
            }
        }
    }

    /// Returns true if the input was cut short rather than structurally wrong.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Utf8Error::Incomplete { .. })
    }
}
