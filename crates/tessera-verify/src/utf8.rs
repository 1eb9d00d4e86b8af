//! UTF-8 validation with a minimized deterministic finite automaton.
//!
//! The automaton follows the RFC 3629 section 4 grammar. Bytes below 0x80
//! never touch the tables: ASCII is legal exactly when no multi-byte
//! character is pending. The 128 high-bit bytes are partitioned into 11
//! [`CharClass`]es, and the transition table is indexed by
//! `state + class`, where states are stored pre-multiplied by
//! [`CLASS_COUNT`] so the looked-up value is directly the next row base.
//!
//! The error state is absorbing and traversal stops the moment it is
//! reached, so its row is never stored. Together with the ASCII fast path
//! this keeps both tables at 216 bytes (128 + 8 * 11).
//!
//! Lead bytes restrict the range of the *second* byte (0xE0 needs A0..BF,
//! 0xED needs 80..9F, 0xF0 needs 90..BF, 0xF4 needs 80..8F), so overlong
//! forms, surrogates and code points above U+10FFFF are rejected at the
//! byte where they go wrong rather than at end of input.
//!
//! # Examples
//!
//! ```
//! use tessera_verify::utf8::{is_valid_utf8, is_valid_utf8_prefix};
//!
//! assert!(is_valid_utf8("héllo wörld".as_bytes()));
//!
//! // Truncated: incomplete but not malformed.
//! assert!(!is_valid_utf8(&[0xE2]));
//! assert!(is_valid_utf8_prefix(&[0xE2]));
//!
//! // UTF-16 surrogate lead-in: malformed as soon as the second byte arrives.
//! assert!(!is_valid_utf8_prefix(&[0xED, 0xA0]));
//! ```

use crate::error::Utf8Error;

/// Equivalence classes of the bytes 0x80..=0xFF.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// C2..DF: lead of a 2-byte sequence.
    St2 = 0,
    /// E0: 3-byte lead whose next byte must be A0..BF.
    St3a = 1,
    /// E1..EC, EE..EF: unrestricted 3-byte lead.
    St3b = 2,
    /// ED: 3-byte lead whose next byte must be 80..9F.
    St3c = 3,
    /// F0: 4-byte lead whose next byte must be 90..BF.
    St4a = 4,
    /// F1..F3: unrestricted 4-byte lead.
    St4b = 5,
    /// F4: 4-byte lead whose next byte must be 80..8F.
    St4c = 6,
    /// 80..8F continuation.
    TailA = 7,
    /// 90..9F continuation.
    TailB = 8,
    /// A0..BF continuation.
    TailC = 9,
    /// C0..C1, F5..FF: never legal.
    Error = 10,
}

/// Number of character classes.
pub const CLASS_COUNT: usize = 11;

/// DFA states. `Accept` is both the start state and the only accepting one.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Accept = 0,
    /// One continuation byte of any range left.
    Tail1 = 1,
    /// Two continuation bytes left, next unrestricted.
    Tail2a = 2,
    /// Two left, next in A0..BF.
    Tail2b = 3,
    /// Two left, next in 80..9F.
    Tail2c = 4,
    /// Three left, next in 90..BF.
    Tail3a = 5,
    /// Three left, next unrestricted.
    Tail3b = 6,
    /// Three left, next in 80..8F.
    Tail3c = 7,
    Error = 8,
}

/// Number of DFA states, including the unmaterialized error state.
pub const STATE_COUNT: usize = 9;

impl State {
    /// Encoded table value for this state.
    pub const fn encoded(self) -> u8 {
        self as u8 * CLASS_COUNT as u8
    }
}

/// Encoded value of the accept state.
pub const UTF8_ACCEPT: u8 = State::Accept.encoded();

/// Encoded value of the error state.
pub const UTF8_ERROR: u8 = State::Error.encoded();

/// Transition table length. The error row is not stored.
pub const TRANSITION_TABLE_LEN: usize = (STATE_COUNT - 1) * CLASS_COUNT;

const CLASS_RANGES: [(CharClass, u8, u8); 13] = [
    (CharClass::TailA, 0x80, 0x8F),
    (CharClass::TailB, 0x90, 0x9F),
    (CharClass::TailC, 0xA0, 0xBF),
    (CharClass::Error, 0xC0, 0xC1),
    (CharClass::Error, 0xF5, 0xFF),
    (CharClass::St2, 0xC2, 0xDF),
    (CharClass::St3a, 0xE0, 0xE0),
    (CharClass::St3b, 0xE1, 0xEC),
    (CharClass::St3b, 0xEE, 0xEF),
    (CharClass::St3c, 0xED, 0xED),
    (CharClass::St4a, 0xF0, 0xF0),
    (CharClass::St4b, 0xF1, 0xF3),
    (CharClass::St4c, 0xF4, 0xF4),
];

// Every pair not listed here leads to `State::Error`.
const TRANSITIONS: [(State, CharClass, State); 22] = [
    (State::Accept, CharClass::St2, State::Tail1),
    (State::Accept, CharClass::St3a, State::Tail2b),
    (State::Accept, CharClass::St3b, State::Tail2a),
    (State::Accept, CharClass::St3c, State::Tail2c),
    (State::Accept, CharClass::St4a, State::Tail3a),
    (State::Accept, CharClass::St4b, State::Tail3b),
    (State::Accept, CharClass::St4c, State::Tail3c),
    (State::Tail1, CharClass::TailA, State::Accept),
    (State::Tail1, CharClass::TailB, State::Accept),
    (State::Tail1, CharClass::TailC, State::Accept),
    (State::Tail2a, CharClass::TailA, State::Tail1),
    (State::Tail2a, CharClass::TailB, State::Tail1),
    (State::Tail2a, CharClass::TailC, State::Tail1),
    (State::Tail2b, CharClass::TailC, State::Tail1),
    (State::Tail2c, CharClass::TailA, State::Tail1),
    (State::Tail2c, CharClass::TailB, State::Tail1),
    (State::Tail3a, CharClass::TailB, State::Tail2a),
    (State::Tail3a, CharClass::TailC, State::Tail2a),
    (State::Tail3b, CharClass::TailA, State::Tail2a),
    (State::Tail3b, CharClass::TailB, State::Tail2a),
    (State::Tail3b, CharClass::TailC, State::Tail2a),
    (State::Tail3c, CharClass::TailA, State::Tail2a),
];

/// Class of each byte 0x80..=0xFF, indexed by `byte - 0x80`.
pub const CLASS_TABLE: [u8; 128] = build_utf8_class_table();

/// Next encoded state, indexed by `encoded_state + class`.
pub const TRANSITION_TABLE: [u8; TRANSITION_TABLE_LEN] = build_utf8_transition_table();

/// Builds the byte-class table for the high-bit bytes.
pub const fn build_utf8_class_table() -> [u8; 128] {
    let mut table = [CharClass::Error as u8; 128];
    let mut r = 0;
    while r < CLASS_RANGES.len() {
        let (class, start, end) = CLASS_RANGES[r];
        let mut byte = start as usize;
        while byte <= end as usize {
            table[byte - 0x80] = class as u8;
            byte += 1;
        }
        r += 1;
    }
    table
}

/// Builds the dense transition table.
///
/// Unlisted entries hold [`UTF8_ERROR`].
pub const fn build_utf8_transition_table() -> [u8; TRANSITION_TABLE_LEN] {
    let mut table = [UTF8_ERROR; TRANSITION_TABLE_LEN];
    let mut t = 0;
    while t < TRANSITIONS.len() {
        let (from, class, to) = TRANSITIONS[t];
        table[from.encoded() as usize + class as usize] = to.encoded();
        t += 1;
    }
    table
}

/// Returns the class of a byte 0x80..=0xFF.
#[inline]
pub const fn class_of(byte: u8) -> u8 {
    CLASS_TABLE[(byte & 0x7F) as usize]
}

/// Advances an encoded, non-error state by one byte.
///
/// Returns [`UTF8_ERROR`] for an ASCII byte while a character is pending.
#[inline]
const fn step(state: u8, byte: u8) -> u8 {
    if byte < 0x80 {
        if state == UTF8_ACCEPT {
            UTF8_ACCEPT
        } else {
            UTF8_ERROR
        }
    } else {
        TRANSITION_TABLE[state as usize + class_of(byte) as usize]
    }
}

/// Runs the automaton from `state`, stopping at the first error.
///
/// Returns the final state, or the index of the offending byte.
#[inline]
fn run(mut state: u8, data: &[u8]) -> Result<u8, usize> {
    for (i, &byte) in data.iter().enumerate() {
        state = step(state, byte);
        if state == UTF8_ERROR {
            return Err(i);
        }
    }
    Ok(state)
}

/// Returns true if `data` is complete, well-formed UTF-8.
///
/// Stops at the first malformed byte. Input ending partway through a
/// character is rejected.
pub fn is_valid_utf8(data: &[u8]) -> bool {
    run(UTF8_ACCEPT, data) == Ok(UTF8_ACCEPT)
}

/// Returns true if `data` is a prefix of some well-formed UTF-8 sequence.
///
/// Identical to [`is_valid_utf8`] except that input ending partway through a
/// character is accepted. Use this for chunks of a message whose remaining
/// bytes have not arrived yet.
pub fn is_valid_utf8_prefix(data: &[u8]) -> bool {
    run(UTF8_ACCEPT, data).is_ok()
}

/// Validates `data` and reports where and how it fails.
///
/// # Errors
///
/// - [`Utf8Error::Malformed`] at the first byte that cannot occur at its position
/// - [`Utf8Error::Incomplete`] if the input ends partway through a character
pub fn validate_utf8(data: &[u8]) -> Result<(), Utf8Error> {
    let mut validator = Utf8Validator::new();
    validator.update(data)?;
    validator.finish()
}

/// Incremental UTF-8 validator for data that arrives in chunks.
///
/// Characters may straddle chunk boundaries. Feeding any split of a buffer
/// gives the same outcome as [`validate_utf8`] on the whole buffer.
///
/// # Examples
///
/// ```
/// use tessera_verify::utf8::Utf8Validator;
///
/// let text = "€uro".as_bytes();
/// let mut validator = Utf8Validator::new();
/// validator.update(&text[..2]).unwrap();
/// assert!(!validator.is_char_boundary());
/// validator.update(&text[2..]).unwrap();
/// assert!(validator.finish().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Utf8Validator {
    state: u8,
    consumed: usize,
    valid_up_to: usize,
    failure: Option<Utf8Error>,
}

impl Utf8Validator {
    /// Creates a validator positioned at the start of a message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the next chunk of the message.
    ///
    /// Offsets in errors are relative to the start of the whole message.
    /// Once a chunk fails, every later call returns the same error.
    ///
    /// # Errors
    ///
    /// Returns [`Utf8Error::Malformed`] at the first offending byte.
    pub fn update(&mut self, chunk: &[u8]) -> Result<(), Utf8Error> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }

        let mut state = self.state;
        for (i, &byte) in chunk.iter().enumerate() {
            state = step(state, byte);
            if state == UTF8_ERROR {
                let failure = Utf8Error::Malformed {
                    valid_up_to: self.valid_up_to,
                    offset: self.consumed + i,
                };
                tracing::trace!(%failure, "utf-8 stream rejected");
                self.failure = Some(failure);
                return Err(failure);
            }
            if state == UTF8_ACCEPT {
                self.valid_up_to = self.consumed + i + 1;
            }
        }

        self.state = state;
        self.consumed += chunk.len();
        Ok(())
    }

    /// Returns true if no multi-byte character is pending.
    pub fn is_char_boundary(&self) -> bool {
        self.failure.is_none() && self.state == UTF8_ACCEPT
    }

    /// Total number of bytes accepted so far.
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Length of the longest complete, valid prefix seen so far.
    pub fn valid_up_to(&self) -> usize {
        self.valid_up_to
    }

    /// Ends the message.
    ///
    /// # Errors
    ///
    /// - the stored [`Utf8Error::Malformed`] if an earlier chunk failed
    /// - [`Utf8Error::Incomplete`] if the message ends partway through a character
    pub fn finish(self) -> Result<(), Utf8Error> {
        if let Some(failure) = self.failure {
            return Err(failure);
        }
        if self.state != UTF8_ACCEPT {
            tracing::trace!(valid_up_to = self.valid_up_to, "utf-8 stream ended mid-character");
            return Err(Utf8Error::Incomplete {
                valid_up_to: self.valid_up_to,
            });
        }
        Ok(())
    }
}
