//! Create-campaign request building.

use crate::identity::{decode_identity, IdentityError};
use qf_ledger::domain::{Amount, Epoch, Identity, QU};
use qf_ledger::protocol::{CreateCampaignPayload, OpCode};
use thiserror::Error;

/// Creation fee assumed at initialization, in whole units.
pub const DEFAULT_CREATION_FEE: Amount = 500;

/// Host epochs per day.
pub const DEFAULT_EPOCHS_PER_DAY: Epoch = 2160;

/// Host input type under which the ledger expects create-campaign requests.
pub const CREATE_CAMPAIGN_INPUT_TYPE: u16 = 2;

/// Why a request could not be built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Beneficiary did not decode.
    #[error("invalid beneficiary: {0}")]
    Beneficiary(#[from] IdentityError),

    /// A unit conversion left the 64-bit range.
    #[error("{field} out of range")]
    OutOfRange {
        /// Offending input.
        field: &'static str,
    },
}

/// User-facing campaign parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignSpec {
    /// Textual beneficiary identity.
    pub beneficiary: String,
    /// Goal in whole units.
    pub goal: Amount,
    /// Duration in days.
    pub duration_days: i64,
    /// Creation fee in whole units, as passed to initialize divided by `QU`.
    pub creation_fee: Amount,
    /// Epochs per day.
    pub epochs_per_day: Epoch,
}

/// A request ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    /// Decoded beneficiary.
    pub beneficiary: Identity,
    /// Decoded payload.
    pub payload: CreateCampaignPayload,
    /// Encoded payload bytes.
    pub bytes: Vec<u8>,
    /// Creation fee to attach, in the smallest unit (`creation_fee * QU`).
    pub amount: Amount,
}

impl PreparedRequest {
    /// Payload as lowercase hex.
    #[must_use]
    pub fn hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Operation selector byte.
    #[must_use]
    pub fn opcode(&self) -> u8 {
        OpCode::CreateCampaign.as_byte()
    }

    /// Host command line that submits this request to `contract_id`.
    ///
    /// The signing seed is left as a placeholder.
    #[must_use]
    pub fn submission_command(&self, contract_id: &str) -> String {
        format!(
            "qubic-cli -seed \"YOUR_SEED_HERE\" -sendtransaction {contract_id} {} {} {} {}",
            self.amount,
            CREATE_CAMPAIGN_INPUT_TYPE,
            self.bytes.len(),
            self.hex()
        )
    }
}

impl CampaignSpec {
    /// Converts units and encodes the payload.
    ///
    /// # Errors
    ///
    /// `Beneficiary` for a malformed identity, `OutOfRange` when a conversion overflows.
    pub fn prepare(&self) -> Result<PreparedRequest, BuildError> {
        let beneficiary = decode_identity(&self.beneficiary)?;
        let goal = self
            .goal
            .checked_mul(QU)
            .ok_or(BuildError::OutOfRange { field: "goal" })?;
        let amount = self
            .creation_fee
            .checked_mul(QU)
            .ok_or(BuildError::OutOfRange {
                field: "creation_fee",
            })?;
        let duration_epochs = self
            .duration_days
            .checked_mul(self.epochs_per_day)
            .ok_or(BuildError::OutOfRange { field: "duration" })?;

        let payload = CreateCampaignPayload {
            beneficiary,
            goal,
            duration_epochs,
        };
        Ok(PreparedRequest {
            beneficiary,
            bytes: payload.encode(),
            payload,
            amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qf_ledger::prelude::{
        create_test_service, CrowdfundingApi, InitializePayload, LedgerEvent, Request,
    };

    fn spec(goal: Amount, days: i64) -> CampaignSpec {
        CampaignSpec {
            beneficiary: "B".repeat(56),
            goal,
            duration_days: days,
            creation_fee: DEFAULT_CREATION_FEE,
            epochs_per_day: DEFAULT_EPOCHS_PER_DAY,
        }
    }

    #[test]
    fn test_prepare_converts_units() {
        let prepared = spec(1000, 30).prepare().unwrap();
        assert_eq!(prepared.payload.goal, 1000 * QU);
        assert_eq!(prepared.payload.duration_epochs, 30 * 2160);
        assert_eq!(prepared.amount, 500 * QU);
        assert_eq!(prepared.bytes.len(), CreateCampaignPayload::LEN);
        assert_eq!(prepared.bytes[0], prepared.opcode());
        assert_eq!(prepared.hex().len(), 2 * CreateCampaignPayload::LEN);
    }

    #[test]
    fn test_payload_decodes_in_the_core() {
        let prepared = spec(7, 1).prepare().unwrap();
        let decoded = CreateCampaignPayload::decode(&prepared.bytes).unwrap();
        assert_eq!(decoded, prepared.payload);
        assert_eq!(decoded.beneficiary, prepared.beneficiary);
    }

    #[test]
    fn test_prepare_rejects_overflow() {
        assert_eq!(
            spec(i64::MAX, 1).prepare(),
            Err(BuildError::OutOfRange { field: "goal" })
        );
        assert_eq!(
            spec(1, i64::MAX).prepare(),
            Err(BuildError::OutOfRange { field: "duration" })
        );

        let mut fee = spec(1, 1);
        fee.creation_fee = i64::MAX / 2;
        assert_eq!(
            fee.prepare(),
            Err(BuildError::OutOfRange {
                field: "creation_fee"
            })
        );
    }

    #[test]
    fn test_prepared_request_is_accepted_by_ledger() {
        let mut service = create_test_service();
        service.host_mut().set_epoch(10);
        let init = Request::initialize(
            Identity::new([0xF; 32]),
            InitializePayload {
                ipo_end_epoch: 1000,
                ipo_share_price: QU,
                creation_fee: DEFAULT_CREATION_FEE * QU,
            },
        );
        assert!(service.handle_request(&init).is_accepted());

        let prepared = spec(500, 1).prepare().unwrap();
        let request = Request::new(
            Identity::new([0xC; 32]),
            prepared.amount,
            prepared.bytes.clone(),
        );
        let outcome = service.handle_request(&request);

        let Some(LedgerEvent::CampaignCreated {
            beneficiary,
            goal,
            end_epoch,
            ..
        }) = outcome.event()
        else {
            panic!("campaign not created: {outcome:?}");
        };
        assert_eq!(*beneficiary, prepared.beneficiary);
        assert_eq!(*goal, 500 * QU);
        assert_eq!(*end_epoch, 10 + DEFAULT_EPOCHS_PER_DAY);
    }

    #[test]
    fn test_submission_command_line() {
        let prepared = spec(1000, 30).prepare().unwrap();
        let line = prepared.submission_command("CONTRACT");
        assert_eq!(
            line,
            format!(
                "qubic-cli -seed \"YOUR_SEED_HERE\" -sendtransaction CONTRACT 500000000 2 49 {}",
                prepared.hex()
            )
        );
    }

    #[test]
    fn test_prepare_rejects_bad_beneficiary() {
        let mut bad = spec(1, 1);
        bad.beneficiary = "short".into();
        assert!(matches!(bad.prepare(), Err(BuildError::Beneficiary(_))));
    }
}
