//! # Request Classifier
//!
//! Two-stage interpretation of a raw request.
//!
//! ```text
//! Uninitialized:  payload[0] == 0x00 ──→ Initialize
//!                 anything else      ──→ NotInitialized
//!
//! Initialized:    stage 1 (explicit)  payload[0] ∈ {01, 02, 03} with that
//!                                     operation's exact length, in that order
//!                 stage 2 (by shape)  amount > 0, 0-byte payload ──→ BuyShares
//!                                     amount > 0, 2-byte payload ──→ Contribute
//!                 otherwise           ──→ rejected
//! ```
//!
//! An opcode byte only selects an explicit operation when the payload length matches,
//! so a contribution to campaign 1, 2 or 3 (`[01 00]`, `[02 00]`, `[03 00]`) reaches
//! stage 2.

use super::opcodes::OpCode;
use super::payloads::{
    ClaimDividendsPayload, ContributionPayload, CreateCampaignPayload, FinalizeCampaignPayload,
    InitializePayload,
};
use super::Request;
use crate::domain::entities::Phase;
use crate::errors::Rejection;

/// A request resolved to exactly one handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Explicit opcode 0x00.
    Initialize(InitializePayload),
    /// Explicit opcode 0x01.
    CreateCampaign(CreateCampaignPayload),
    /// Explicit opcode 0x02.
    FinalizeCampaign(FinalizeCampaignPayload),
    /// Explicit opcode 0x03.
    ClaimDividends,
    /// Implicit: value with an empty payload.
    BuyShares,
    /// Implicit: value with a 2-byte campaign index.
    Contribute(ContributionPayload),
}

impl Operation {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Initialize(_) => OpCode::Initialize.name(),
            Self::CreateCampaign(_) => OpCode::CreateCampaign.name(),
            Self::FinalizeCampaign(_) => OpCode::FinalizeCampaign.name(),
            Self::ClaimDividends => OpCode::ClaimDividends.name(),
            Self::BuyShares => "BUY_SHARES",
            Self::Contribute(_) => "CONTRIBUTE",
        }
    }
}

/// Resolves `request` to an operation for the given phase.
///
/// # Errors
///
/// The rejection that makes the request a no-op.
pub fn classify(request: &Request, phase: Phase) -> Result<Operation, Rejection> {
    match phase {
        Phase::Uninitialized => classify_uninitialized(request),
        Phase::Initialized => classify_explicit(request)
            .or_else(|| classify_by_shape(request))
            .transpose()?
            .ok_or_else(|| unrecognized(request)),
    }
}

fn classify_uninitialized(request: &Request) -> Result<Operation, Rejection> {
    match request.opcode_byte() {
        Some(byte) if byte == OpCode::Initialize.as_byte() => {
            Ok(Operation::Initialize(InitializePayload::decode(&request.payload)?))
        }
        _ => Err(Rejection::NotInitialized),
    }
}

/// Stage 1. Returns None when no explicit operation is recognized.
fn classify_explicit(request: &Request) -> Option<Result<Operation, Rejection>> {
    let byte = request.opcode_byte()?;
    let op = OpCode::EXPLICIT
        .into_iter()
        .find(|op| op.as_byte() == byte && op.payload_len() == request.payload.len())?;

    let decoded = match op {
        OpCode::CreateCampaign => {
            CreateCampaignPayload::decode(&request.payload).map(Operation::CreateCampaign)
        }
        OpCode::FinalizeCampaign => {
            FinalizeCampaignPayload::decode(&request.payload).map(Operation::FinalizeCampaign)
        }
        OpCode::ClaimDividends => {
            ClaimDividendsPayload::decode(&request.payload).map(|_| Operation::ClaimDividends)
        }
        OpCode::Initialize => return None,
    };
    Some(decoded.map_err(Rejection::from))
}

/// Stage 2. Returns None when the shape matches no implicit operation.
fn classify_by_shape(request: &Request) -> Option<Result<Operation, Rejection>> {
    if request.amount <= 0 {
        return None;
    }
    match request.payload.len() {
        0 => Some(Ok(Operation::BuyShares)),
        ContributionPayload::LEN => Some(
            ContributionPayload::decode(&request.payload)
                .map(Operation::Contribute)
                .map_err(Rejection::from),
        ),
        _ => None,
    }
}

fn unrecognized(request: &Request) -> Rejection {
    let looks_like_initialize = request.opcode_byte() == Some(OpCode::Initialize.as_byte())
        && request.payload.len() == InitializePayload::LEN;
    if looks_like_initialize {
        Rejection::AlreadyInitialized
    } else {
        Rejection::Unrecognized {
            amount: request.amount,
            payload_len: request.payload.len(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{CampaignId, Identity};

    fn req(amount: i64, payload: Vec<u8>) -> Request {
        Request::new(Identity::new([9; 32]), amount, payload)
    }

    fn init_payload() -> Vec<u8> {
        InitializePayload {
            ipo_end_epoch: 10,
            ipo_share_price: 1,
            creation_fee: 5,
        }
        .encode()
    }

    #[test]
    fn test_uninitialized_accepts_only_initialize() {
        let op = classify(&req(0, init_payload()), Phase::Uninitialized).unwrap();
        assert!(matches!(op, Operation::Initialize(_)));

        assert_eq!(
            classify(&req(100, vec![]), Phase::Uninitialized),
            Err(Rejection::NotInitialized)
        );
        assert_eq!(
            classify(&req(0, vec![0x03]), Phase::Uninitialized),
            Err(Rejection::NotInitialized)
        );
    }

    #[test]
    fn test_uninitialized_malformed_initialize() {
        let result = classify(&req(0, vec![0x00, 0x01]), Phase::Uninitialized);
        assert!(matches!(result, Err(Rejection::MalformedPayload(_))));
    }

    #[test]
    fn test_reinitialize_is_rejected() {
        assert_eq!(
            classify(&req(0, init_payload()), Phase::Initialized),
            Err(Rejection::AlreadyInitialized)
        );
    }

    #[test]
    fn test_explicit_operations() {
        let finalize = FinalizeCampaignPayload {
            campaign: CampaignId(7),
        }
        .encode();
        assert_eq!(
            classify(&req(0, finalize), Phase::Initialized),
            Ok(Operation::FinalizeCampaign(FinalizeCampaignPayload {
                campaign: CampaignId(7)
            }))
        );
        assert_eq!(
            classify(&req(0, vec![0x03]), Phase::Initialized),
            Ok(Operation::ClaimDividends)
        );
    }

    #[test]
    fn test_explicit_wins_over_shape() {
        // Value attached to a claim still routes to the claim handler.
        assert_eq!(
            classify(&req(50, vec![0x03]), Phase::Initialized),
            Ok(Operation::ClaimDividends)
        );
    }

    #[test]
    fn test_implicit_buy_in() {
        assert_eq!(
            classify(&req(1, vec![]), Phase::Initialized),
            Ok(Operation::BuyShares)
        );
    }

    #[test]
    fn test_contribution_to_opcode_like_index() {
        for index in 1u16..=3 {
            let payload = index.to_le_bytes().to_vec();
            assert_eq!(
                classify(&req(10, payload), Phase::Initialized),
                Ok(Operation::Contribute(ContributionPayload {
                    campaign: CampaignId(index)
                }))
            );
        }
    }

    #[test]
    fn test_zero_amount_shapes_are_unrecognized() {
        assert_eq!(
            classify(&req(0, vec![]), Phase::Initialized),
            Err(Rejection::Unrecognized {
                amount: 0,
                payload_len: 0
            })
        );
        assert!(matches!(
            classify(&req(0, vec![0x05, 0x00]), Phase::Initialized),
            Err(Rejection::Unrecognized { .. })
        ));
        assert!(matches!(
            classify(&req(10, vec![0x01, 0x00, 0x00]), Phase::Initialized),
            Err(Rejection::Unrecognized { .. })
        ));
    }
}
