//! Base-26 identity decoding.
//!
//! A textual identity is 56 letters `A`-`Z`, most significant first, `A = 0`. The
//! 32-byte identity is the low 256 bits of that number, big-endian.

use primitive_types::U512;
use qf_ledger::domain::Identity;
use thiserror::Error;

/// Characters in a textual identity.
pub const IDENTITY_CHARS: usize = 56;

const RADIX: u64 = 26;

/// Why a textual identity could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Wrong number of characters.
    #[error("identity must be {IDENTITY_CHARS} characters, got {actual}")]
    InvalidLength {
        /// Characters supplied.
        actual: usize,
    },

    /// A character outside `A`-`Z`.
    #[error("invalid character {found:?} at position {position}; expected A-Z")]
    InvalidCharacter {
        /// Zero-based position.
        position: usize,
        /// Offending character.
        found: char,
    },
}

/// Decodes a 56-letter identity.
///
/// # Errors
///
/// `InvalidLength` or `InvalidCharacter`.
pub fn decode_identity(text: &str) -> Result<Identity, IdentityError> {
    let actual = text.chars().count();
    if actual != IDENTITY_CHARS {
        return Err(IdentityError::InvalidLength { actual });
    }

    // 26^56 < 2^264, so the accumulator never overflows 512 bits.
    let mut value = U512::zero();
    for (position, found) in text.chars().enumerate() {
        if !found.is_ascii_uppercase() {
            return Err(IdentityError::InvalidCharacter { position, found });
        }
        let digit = u64::from(found as u8 - b'A');
        value = value * U512::from(RADIX) + U512::from(digit);
    }

    let mut wide = [0u8; 64];
    value.to_big_endian(&mut wide);
    let mut bytes = [0u8; Identity::LEN];
    bytes.copy_from_slice(&wide[64 - Identity::LEN..]);
    Ok(Identity::new(bytes))
}
