//! # Payload Codecs
//!
//! Packed little-endian encodings of every request payload.
//!
//! | Operation | Layout | Length |
//! |-----------|--------|--------|
//! | Initialize | `00` + ipo_end_epoch(8) + ipo_share_price(8) + creation_fee(8) | 25 |
//! | CreateCampaign | `01` + beneficiary(32) + goal(8) + duration_epochs(8) | 49 |
//! | FinalizeCampaign | `02` + campaign(2) | 3 |
//! | ClaimDividends | `03` | 1 |
//! | Contribute | campaign(2), no opcode | 2 |

use super::opcodes::OpCode;
use crate::domain::value_objects::{Amount, CampaignId, Epoch, Identity};
use crate::errors::PayloadError;
use serde::{Deserialize, Serialize};

// =============================================================================
// READER
// =============================================================================

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Starts a reader after checking the exact length and, if given, the opcode.
    fn open(
        bytes: &'a [u8],
        expected_len: usize,
        opcode: Option<OpCode>,
    ) -> Result<Self, PayloadError> {
        if bytes.len() != expected_len {
            return Err(PayloadError::InvalidLength {
                expected: expected_len,
                actual: bytes.len(),
            });
        }
        let mut reader = Self { bytes, pos: 0 };
        if let Some(op) = opcode {
            let [actual] = reader.take::<1>()?;
            if actual != op.as_byte() {
                return Err(PayloadError::UnexpectedOpcode {
                    expected: op.as_byte(),
                    actual,
                });
            }
        }
        Ok(reader)
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], PayloadError> {
        let end = self.pos + N;
        let chunk = self
            .bytes
            .get(self.pos..end)
            .and_then(|s| <[u8; N]>::try_from(s).ok())
            .ok_or(PayloadError::InvalidLength {
                expected: end,
                actual: self.bytes.len(),
            })?;
        self.pos = end;
        Ok(chunk)
    }

    fn i64(&mut self) -> Result<i64, PayloadError> {
        self.take::<8>().map(i64::from_le_bytes)
    }

    fn campaign(&mut self) -> Result<CampaignId, PayloadError> {
        self.take::<2>().map(CampaignId::from_le_bytes)
    }

    fn identity(&mut self) -> Result<Identity, PayloadError> {
        self.take::<32>().map(Identity::new)
    }
}

// =============================================================================
// INITIALIZE
// =============================================================================

/// Deployment configuration fixed by the initialize request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializePayload {
    /// Buy-ins are accepted strictly before this epoch.
    pub ipo_end_epoch: Epoch,
    /// Price of one whole share.
    pub ipo_share_price: Amount,
    /// Exact amount a create-campaign request must carry.
    pub creation_fee: Amount,
}

impl InitializePayload {
    /// Encoded length.
    pub const LEN: usize = OpCode::Initialize.payload_len();

    /// Encodes the payload, opcode included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.push(OpCode::Initialize.as_byte());
        out.extend_from_slice(&self.ipo_end_epoch.to_le_bytes());
        out.extend_from_slice(&self.ipo_share_price.to_le_bytes());
        out.extend_from_slice(&self.creation_fee.to_le_bytes());
        out
    }

    /// Decodes a payload, opcode included.
    ///
    /// # Errors
    ///
    /// Wrong length or opcode.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let mut r = Reader::open(bytes, Self::LEN, Some(OpCode::Initialize))?;
        Ok(Self {
            ipo_end_epoch: r.i64()?,
            ipo_share_price: r.i64()?,
            creation_fee: r.i64()?,
        })
    }
}

// =============================================================================
// CREATE CAMPAIGN
// =============================================================================

/// Parameters of a new campaign.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCampaignPayload {
    /// Recipient of the pool on success.
    pub beneficiary: Identity,
    /// Target amount.
    pub goal: Amount,
    /// Campaign length; `end_epoch = start_epoch + duration_epochs`.
    pub duration_epochs: Epoch,
}

impl CreateCampaignPayload {
    /// Encoded length.
    pub const LEN: usize = OpCode::CreateCampaign.payload_len();

    /// Encodes the payload, opcode included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.push(OpCode::CreateCampaign.as_byte());
        out.extend_from_slice(self.beneficiary.as_bytes());
        out.extend_from_slice(&self.goal.to_le_bytes());
        out.extend_from_slice(&self.duration_epochs.to_le_bytes());
        out
    }

    /// Decodes a payload, opcode included.
    ///
    /// # Errors
    ///
    /// Wrong length or opcode.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let mut r = Reader::open(bytes, Self::LEN, Some(OpCode::CreateCampaign))?;
        Ok(Self {
            beneficiary: r.identity()?,
            goal: r.i64()?,
            duration_epochs: r.i64()?,
        })
    }
}

// =============================================================================
// FINALIZE CAMPAIGN
// =============================================================================

/// Campaign to finalize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeCampaignPayload {
    /// Target campaign.
    pub campaign: CampaignId,
}

impl FinalizeCampaignPayload {
    /// Encoded length.
    pub const LEN: usize = OpCode::FinalizeCampaign.payload_len();

    /// Encodes the payload, opcode included.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::LEN);
        out.push(OpCode::FinalizeCampaign.as_byte());
        out.extend_from_slice(&self.campaign.to_le_bytes());
        out
    }

    /// Decodes a payload, opcode included.
    ///
    /// # Errors
    ///
    /// Wrong length or opcode.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let mut r = Reader::open(bytes, Self::LEN, Some(OpCode::FinalizeCampaign))?;
        Ok(Self {
            campaign: r.campaign()?,
        })
    }
}

// =============================================================================
// CLAIM DIVIDENDS
// =============================================================================

/// Dividend claim. Carries nothing but the opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDividendsPayload;

impl ClaimDividendsPayload {
    /// Encoded length.
    pub const LEN: usize = OpCode::ClaimDividends.payload_len();

    /// Encodes the payload.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        vec![OpCode::ClaimDividends.as_byte()]
    }

    /// Decodes a payload.
    ///
    /// # Errors
    ///
    /// Wrong length or opcode.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        Reader::open(bytes, Self::LEN, Some(OpCode::ClaimDividends))?;
        Ok(Self)
    }
}

// =============================================================================
// CONTRIBUTE (implicit)
// =============================================================================

/// Contribution target. The only payload without a leading opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionPayload {
    /// Target campaign.
    pub campaign: CampaignId,
}

impl ContributionPayload {
    /// Encoded length.
    pub const LEN: usize = 2;

    /// Encodes the payload.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.campaign.to_le_bytes().to_vec()
    }

    /// Decodes a payload.
    ///
    /// # Errors
    ///
    /// Wrong length.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        let mut r = Reader::open(bytes, Self::LEN, None)?;
        Ok(Self {
            campaign: r.campaign()?,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
