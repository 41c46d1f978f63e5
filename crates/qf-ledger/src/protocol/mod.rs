//! # Wire Protocol
//!
//! The request envelope delivered by the host, the payload codecs, and the classifier
//! that turns raw bytes into an `Operation`.

pub mod classifier;
pub mod opcodes;
pub mod payloads;

pub use classifier::{classify, Operation};
pub use opcodes::OpCode;
pub use payloads::*;

use crate::domain::value_objects::{Amount, Identity};
use serde::{Deserialize, Serialize};

/// One host-delivered request. Signature checks happened before it got here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Verified sender.
    pub source: Identity,
    /// Value transferred into the contract with this request.
    pub amount: Amount,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

impl Request {
    /// Creates a request.
    #[must_use]
    pub fn new(source: Identity, amount: Amount, payload: Vec<u8>) -> Self {
        Self {
            source,
            amount,
            payload,
        }
    }

    /// First payload byte, if any.
    #[must_use]
    pub fn opcode_byte(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Initialize request.
    #[must_use]
    pub fn initialize(source: Identity, payload: InitializePayload) -> Self {
        Self::new(source, 0, payload.encode())
    }

    /// Create-campaign request paying `fee`.
    #[must_use]
    pub fn create_campaign(source: Identity, fee: Amount, payload: CreateCampaignPayload) -> Self {
        Self::new(source, fee, payload.encode())
    }

    /// Finalize request.
    #[must_use]
    pub fn finalize_campaign(source: Identity, payload: FinalizeCampaignPayload) -> Self {
        Self::new(source, 0, payload.encode())
    }

    /// Dividend claim.
    #[must_use]
    pub fn claim_dividends(source: Identity) -> Self {
        Self::new(source, 0, ClaimDividendsPayload.encode())
    }

    /// IPO buy-in.
    #[must_use]
    pub fn buy_shares(source: Identity, amount: Amount) -> Self {
        Self::new(source, amount, Vec::new())
    }

    /// Contribution to a campaign.
    #[must_use]
    pub fn contribute(source: Identity, amount: Amount, payload: ContributionPayload) -> Self {
        Self::new(source, amount, payload.encode())
    }
}
