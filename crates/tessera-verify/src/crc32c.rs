//! CRC32C (Castagnoli) checksum implementation.
//!
//! Table-driven, reflected-input/reflected-output CRC-32C using the reversed
//! Castagnoli polynomial (0x82F63B78), bit-exact with the iSCSI/SCTP
//! definition (RFC 3720). Used to protect framed records and stored blocks.
//!
//! ## Self-verifying trailers
//!
//! Appending the little-endian checksum of a buffer to that buffer makes the
//! checksum of the combined bytes a fixed value, [`CRC32C_OK_REM`], no matter
//! what the buffer held or which seed was used. A reader can therefore verify
//! "payload + trailer" in a single pass without splitting out and comparing
//! the stored value.
//!
//! ## Usage
//!
//! ```
//! use tessera_verify::crc32c::{self, CRC32C_OK_REM, Crc32c};
//!
//! // One-shot calculation
//! let checksum = crc32c::crc32c(b"123456789");
//! assert_eq!(checksum, 0xE306_9283);
//!
//! // Incremental calculation for streaming data
//! let mut hasher = Crc32c::new();
//! hasher.update(b"1234");
//! hasher.update(b"56789");
//! assert_eq!(hasher.finalize(), checksum);
//!
//! // Sealed buffers checksum to the fixed remainder
//! let mut record = b"hello there".to_vec();
//! crc32c::seal(&mut record);
//! assert_eq!(crc32c::crc32c(&record), CRC32C_OK_REM);
//! ```
//!
//! ## Streaming contract
//!
//! [`crc32c_update`] takes and returns *finalized* checksums. Chaining calls
//! is exact (`update(update(s, a), b) == update(s, a ++ b)`) because the
//! inversion applied on entry cancels the inversion applied on the previous
//! exit. [`Crc32c`] instead keeps the raw register between calls and inverts
//! only when created and when finalized; the raw register is never exposed.

use crate::error::ChecksumError;

/// CRC-32C polynomial (reversed): 0x82F63B78
pub const POLYNOMIAL: u32 = 0x82F6_3B78;

/// Conventional starting seed for a new message.
pub const CRC32C_INIT: u32 = 0;

/// Size of a little-endian checksum trailer.
pub const CHECKSUM_LEN: usize = 4;

/// Precomputed CRC32C lookup table (256 entries).
/// Generated at compile time using const evaluation.
pub const CRC32C_TABLE: [u32; 256] = build_crc32c_table();

/// Checksum of any buffer followed by its own little-endian checksum.
///
/// Equal to the checksum of four zero bytes from [`CRC32C_INIT`], which is
/// `0x48674BC7`.
pub const CRC32C_OK_REM: u32 = crc32c_update(CRC32C_INIT, &[0u8; CHECKSUM_LEN]);

/// Builds the CRC32C lookup table.
///
/// Entry `i` is `i` shifted through 8 rounds of reflected polynomial
/// division: when the low bit is set the shifted value is XORed with
/// [`POLYNOMIAL`].
pub const fn build_crc32c_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLYNOMIAL;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

#[inline]
const fn step(state: u32, byte: u8) -> u32 {
    let index = ((state & 0xFF) ^ byte as u32) as usize;
    (state >> 8) ^ CRC32C_TABLE[index]
}

/// Continues a CRC32C computation from a finalized checksum `seed`.
///
/// Pass [`CRC32C_INIT`] to start a new message. The result is itself a
/// finalized checksum and can be passed back in as the seed for the next
/// chunk of the same message.
///
/// # Examples
///
/// ```
/// use tessera_verify::crc32c::crc32c_update;
///
/// let whole = crc32c_update(0, b"hello there");
/// let chained = crc32c_update(crc32c_update(0, b"hello "), b"there");
/// assert_eq!(whole, chained);
/// ```
pub const fn crc32c_update(seed: u32, data: &[u8]) -> u32 {
    let mut state = !seed;
    let mut i = 0;
    while i < data.len() {
        state = step(state, data[i]);
        i += 1;
    }
    !state
}

/// Computes the CRC32C checksum of the given data in one shot.
pub fn crc32c(data: &[u8]) -> u32 {
    crc32c_update(CRC32C_INIT, data)
}

/// Incremental CRC32C hasher for streaming or chunked data.
///
/// # Examples
///
/// ```
/// use tessera_verify::crc32c::{Crc32c, crc32c};
///
/// let mut hasher = Crc32c::new();
/// hasher.update(b"hello ");
/// hasher.update(b"there");
/// assert_eq!(hasher.finalize(), crc32c(b"hello there"));
/// ```
#[derive(Debug, Clone)]
pub struct Crc32c {
    // Raw register: inverted relative to the finalized checksum.
    state: u32,
}

impl Crc32c {
    /// Creates a new CRC32C hasher starting from [`CRC32C_INIT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(CRC32C_INIT)
    }

    /// Creates a hasher that resumes from a previously finalized checksum.
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self { state: !seed }
    }

    /// Updates the CRC32C state with the given data.
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.state = step(self.state, byte);
        }
    }

    /// Finalizes the CRC32C computation and returns the checksum.
    ///
    /// Consumes the hasher to prevent reuse after finalization.
    #[must_use]
    pub fn finalize(self) -> u32 {
        !self.state
    }
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}

/// Appends the little-endian CRC32C of `buf` to `buf`.
///
/// Afterwards [`is_sealed`] holds for the buffer.
pub fn seal(buf: &mut Vec<u8>) {
    let crc = crc32c(buf);
    buf.extend_from_slice(&crc.to_le_bytes());
}

/// Returns true if `buf` ends with the little-endian CRC32C of the bytes
/// before it.
///
/// Runs a single pass over the whole buffer and compares against
/// [`CRC32C_OK_REM`].
pub fn is_sealed(buf: &[u8]) -> bool {
    buf.len() >= CHECKSUM_LEN && crc32c(buf) == CRC32C_OK_REM
}

/// Verifies a sealed buffer and returns the payload without its trailer.
///
/// # Errors
///
/// - [`ChecksumError::TooShort`] if the buffer cannot hold a trailer
/// - [`ChecksumError::Mismatch`] if the trailer does not match the payload
pub fn open_sealed(buf: &[u8]) -> Result<&[u8], ChecksumError> {
    let Some(split) = buf.len().checked_sub(CHECKSUM_LEN) else {
        tracing::debug!(len = buf.len(), "sealed buffer shorter than checksum trailer");
        return Err(ChecksumError::TooShort { len: buf.len() });
    };

    let (payload, trailer) = buf.split_at(split);
    if crc32c(buf) == CRC32C_OK_REM {
        return Ok(payload);
    }

    let stored = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
    let computed = crc32c(payload);
    tracing::debug!(
        len = payload.len(),
        stored = format_args!("{stored:#010x}"),
        computed = format_args!("{computed:#010x}"),
        "sealed buffer failed checksum verification"
    );
    Err(ChecksumError::Mismatch { stored, computed })
}
