//! # tessera-bench: Throughput benchmarks for Tessera verification primitives
//!
//! This crate provides deterministic input corpora shared by the criterion
//! benches, so runs are comparable across machines and baselines.
//!
//! ## Benchmarks
//!
//! - **checksum**: CRC32C one-shot, streaming, and sealed-buffer verification
//! - **utf8**: strict, prefix, and streaming validation against `std::str::from_utf8`
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p tessera-bench
//!
//! # Run specific benchmark
//! cargo bench -p tessera-bench --bench utf8
//!
//! # Save baseline for comparison
//! cargo bench -p tessera-bench --bench checksum -- --save-baseline main
//!
//! # Compare against baseline
//! cargo bench -p tessera-bench --bench checksum -- --baseline main
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Payload sizes exercised by every bench group.
pub const SIZES: [usize; 5] = [64, 256, 1024, 4096, 65536];

/// Fixed seed so corpora are identical between runs.
pub const CORPUS_SEED: u64 = 0x7E55_E2A0;

// Mix of 1-, 2-, 3- and 4-byte characters.
const MIXED_ALPHABET: &[&str] = &[
    "a", "Z", " ", "7", "é", "ß", "Ж", "ع", "€", "日", "本", "語", "한", "🦀", "🌍", "𝄞",
];

/// Pseudo-random bytes; almost never valid UTF-8 beyond the first few bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(CORPUS_SEED);
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf[..]);
    buf
}

/// Printable ASCII text, which takes the validator's ASCII fast path.
pub fn ascii_text(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(CORPUS_SEED);
    (0..len).map(|_| rng.gen_range(0x20u8..0x7F)).collect()
}

/// Valid UTF-8 text of exactly `len` bytes mixing all encoding lengths.
///
/// Padded with ASCII spaces when the next character would not fit.
pub fn mixed_text(len: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(CORPUS_SEED);
    let mut buf = Vec::with_capacity(len);
    while buf.len() < len {
        let ch = MIXED_ALPHABET[rng.gen_range(0..MIXED_ALPHABET.len())].as_bytes();
        if buf.len() + ch.len() <= len {
            buf.extend_from_slice(ch);
        } else {
            buf.push(b' ');
        }
    }
    buf
}

/// `len` payload bytes followed by their CRC32C trailer.
pub fn sealed_record(len: usize) -> Vec<u8> {
    let mut buf = random_bytes(len);
    tessera_verify::seal(&mut buf);
    buf
}
