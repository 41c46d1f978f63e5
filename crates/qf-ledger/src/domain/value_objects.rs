//! # Value Objects
//!
//! Immutable domain primitives for the crowdfunding ledger.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary and share quantities, in the smallest currency unit.
pub type Amount = i64;

/// Host-supplied discrete time unit.
pub type Epoch = i64;

/// Fixed-point scaling factor for per-share prices and per-share rates.
pub const QU: i64 = 1_000_000;

// =============================================================================
// IDENTITY (32 bytes)
// =============================================================================

/// A 32-byte participant key (contributor, shareholder, beneficiary, owner).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Identity(pub [u8; 32]);

impl Identity {
    /// The all-zero identity. This is the owner of a never-initialized ledger.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Length of an encoded identity.
    pub const LEN: usize = 32;

    /// Creates an identity from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = slice.try_into().ok()?;
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", hex::encode(self.0))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", hex::encode(&self.0[..4]), hex::encode(&self.0[30..]))
    }
}

impl From<[u8; 32]> for Identity {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Identity> for [u8; 32] {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

// =============================================================================
// CAMPAIGN ID
// =============================================================================

/// Position of a campaign in the ledger. Stable for the lifetime of the deployment.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CampaignId(pub u16);

impl CampaignId {
    /// Decodes a little-endian campaign index.
    #[must_use]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self(u16::from_le_bytes(bytes))
    }

    /// Encodes the index little-endian.
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }

    /// Index into the campaign sequence.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CampaignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u16> for CampaignId {
    fn from(index: u16) -> Self {
        Self(index)
    }
}

// =============================================================================
// FIXED-POINT ARITHMETIC
// =============================================================================

/// Computes `floor(a * b / c)` with a 128-bit intermediate.
///
/// Returns None when `c == 0` or the quotient does not fit in 64 bits.
#[must_use]
pub fn mul_div(a: i64, b: i64, c: i64) -> Option<i64> {
    if c == 0 {
        return None;
    }
    let product = i128::from(a) * i128::from(b);
    i64::try_from(product.div_euclid(i128::from(c))).ok()
}

// =============================================================================
// TESTS
// =============================================================================
