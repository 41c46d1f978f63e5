//! # Error Types
//!
//! Reasons a request is discarded, and payload decoding failures.
//!
//! None of these reach the host as an error: a rejected request is a silent no-op.
//! They surface in `Outcome::Rejected` for logging and tests.

use crate::domain::entities::CampaignState;
use crate::domain::value_objects::{Amount, CampaignId, Epoch};
use thiserror::Error;

// =============================================================================
// REJECTIONS
// =============================================================================

/// Why a request left the ledger unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Anything other than initialize on a fresh ledger.
    #[error("ledger not initialized")]
    NotInitialized,

    /// Initialize on a ledger that already has a configuration.
    #[error("ledger already initialized")]
    AlreadyInitialized,

    /// Request matched neither an explicit operation nor an implicit shape.
    #[error("unrecognized request: amount {amount}, payload {payload_len} bytes")]
    Unrecognized { amount: Amount, payload_len: usize },

    /// Payload could not be decoded.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] PayloadError),

    /// Create-campaign must carry exactly the creation fee.
    #[error("incorrect creation fee: expected {expected}, paid {paid}")]
    IncorrectCreationFee { expected: Amount, paid: Amount },

    /// Value attached to an operation that cannot absorb it.
    #[error("unexpected transfer of {amount} with a value-less operation")]
    UnexpectedValue { amount: Amount },

    /// Campaign goal below zero.
    #[error("campaign goal must not be negative, got {0}")]
    NegativeGoal(Amount),

    /// No campaign slot left.
    #[error("campaign capacity reached: {max}")]
    CampaignCapacityReached { max: usize },

    /// Campaign index out of range.
    #[error("unknown campaign {0}")]
    UnknownCampaign(CampaignId),

    /// Campaign already finalized.
    #[error("campaign {id} is {state}")]
    CampaignNotActive { id: CampaignId, state: CampaignState },

    /// Contribution at or after the deadline.
    #[error("campaign {id} closed at epoch {end_epoch} (now {now})")]
    CampaignClosed {
        id: CampaignId,
        end_epoch: Epoch,
        now: Epoch,
    },

    /// Finalize before the deadline.
    #[error("campaign {id} still open until epoch {end_epoch} (now {now})")]
    CampaignStillOpen {
        id: CampaignId,
        end_epoch: Epoch,
        now: Epoch,
    },

    /// No contributor slot left in the campaign.
    #[error("contributor capacity reached for campaign {id}: {max}")]
    ContributorCapacityReached { id: CampaignId, max: usize },

    /// No shareholder slot left for a new identity.
    #[error("shareholder capacity reached: {max}")]
    ShareholderCapacityReached { max: usize },

    /// Buy-in at or after `ipo_end_epoch`.
    #[error("IPO closed at epoch {end_epoch} (now {now})")]
    IpoClosed { end_epoch: Epoch, now: Epoch },

    /// IPO configured with a non-positive share price.
    #[error("IPO share price is not positive: {0}")]
    InvalidSharePrice(Amount),

    /// Amount must be strictly positive.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Amount),

    /// Issuing the requested shares would breach the ceiling.
    #[error("share ceiling exceeded: {issued} + {requested} > {max}")]
    ShareCeilingExceeded {
        issued: Amount,
        requested: Amount,
        max: Amount,
    },

    /// Nothing accrued since the last paid claim, or no shares held.
    #[error("no dividends owed")]
    NothingOwed,

    /// Treasury cannot cover the claim.
    #[error("treasury shortfall: claim {claim}, treasury {treasury}")]
    TreasuryShortfall { claim: Amount, treasury: Amount },

    /// A 64-bit quantity would overflow.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

// =============================================================================
// PAYLOAD ERRORS
// =============================================================================

/// Errors from decoding a request payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// Payload length does not match the operation.
    #[error("invalid payload length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Leading byte is not the expected operation code.
    #[error("unexpected opcode: expected 0x{expected:02X}, got 0x{actual:02X}")]
    UnexpectedOpcode { expected: u8, actual: u8 },
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_display() {
        let err = Rejection::IncorrectCreationFee {
            expected: 500,
            paid: 499,
        };
        assert_eq!(err.to_string(), "incorrect creation fee: expected 500, paid 499");

        let err = Rejection::CampaignNotActive {
            id: CampaignId(3),
            state: CampaignState::Failed,
        };
        assert_eq!(err.to_string(), "campaign #3 is failed");
    }

    #[test]
    fn test_payload_error_conversion() {
        let err: Rejection = PayloadError::InvalidLength {
            expected: 3,
            actual: 2,
        }
        .into();
        assert!(matches!(err, Rejection::MalformedPayload(_)));
        assert_eq!(
            err.to_string(),
            "malformed payload: invalid payload length: expected 3, got 2"
        );
    }

    #[test]
    fn test_opcode_error_display() {
        let err = PayloadError::UnexpectedOpcode {
            expected: 0x01,
            actual: 0xFE,
        };
        assert_eq!(err.to_string(), "unexpected opcode: expected 0x01, got 0xFE");
    }
}
