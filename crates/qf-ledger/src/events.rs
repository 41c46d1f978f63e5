//! # Ledger Events
//!
//! What an accepted request did. Handlers return an `Outcome`; the service logs it and
//! tests assert on it. Hosts see only the state change and the transfer calls.

use crate::domain::fees::FeeReceipt;
use crate::domain::value_objects::{Amount, CampaignId, Epoch, Identity};
use crate::errors::Rejection;
use serde::{Deserialize, Serialize};

/// A value transfer issued through the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Recipient.
    pub destination: Identity,
    /// Amount moved out of the contract balance.
    pub amount: Amount,
}

/// State transition performed by an accepted request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Configuration fixed; the ledger is live.
    Initialized {
        /// Deployment owner.
        owner: Identity,
        /// End of the IPO window.
        ipo_end_epoch: Epoch,
        /// Price of one whole share.
        ipo_share_price: Amount,
        /// Campaign creation fee.
        creation_fee: Amount,
    },

    /// A campaign was opened and its creation fee processed.
    CampaignCreated {
        /// New campaign.
        id: CampaignId,
        /// Fee payer.
        creator: Identity,
        /// Recipient on success.
        beneficiary: Identity,
        /// Target.
        goal: Amount,
        /// First epoch.
        start_epoch: Epoch,
        /// Deadline.
        end_epoch: Epoch,
        /// Creation fee effect.
        fee: FeeReceipt,
    },

    /// Value added to a campaign.
    ContributionRecorded {
        /// Target campaign.
        id: CampaignId,
        /// Contributor.
        contributor: Identity,
        /// Amount of this request.
        amount: Amount,
        /// Contributor's running total in this campaign.
        total_contributed: Amount,
        /// Campaign total after this request.
        raised: Amount,
    },

    /// Goal met; pool paid to the beneficiary.
    CampaignSucceeded {
        /// Finalized campaign.
        id: CampaignId,
        /// Pool size.
        raised: Amount,
        /// Success fee effect.
        fee: FeeReceipt,
        /// Beneficiary payout. None when nothing was left to pay.
        payout: Option<Transfer>,
    },

    /// Goal missed; pool refunded pro-rata.
    CampaignFailed {
        /// Finalized campaign.
        id: CampaignId,
        /// Pool size.
        raised: Amount,
        /// Failure fee effect.
        fee: FeeReceipt,
        /// `raised - fee`.
        refund_pool: Amount,
        /// Non-zero refunds, in contribution order.
        refunds: Vec<Transfer>,
    },

    /// IPO buy-in credited.
    SharesIssued {
        /// Buyer.
        holder: Identity,
        /// Value paid.
        amount: Amount,
        /// Shares credited.
        shares: Amount,
        /// Supply after issuance.
        total_shares_issued: Amount,
    },

    /// Dividends paid out of the treasury.
    DividendsClaimed {
        /// Claimant and payout.
        payout: Transfer,
        /// New checkpoint of the claimant.
        checkpoint: Amount,
    },
}

impl LedgerEvent {
    /// Transfers issued while applying this event, in issue order.
    #[must_use]
    pub fn transfers(&self) -> Vec<Transfer> {
        match self {
            Self::CampaignSucceeded { payout, .. } => payout.iter().copied().collect(),
            Self::CampaignFailed { refunds, .. } => refunds.clone(),
            Self::DividendsClaimed { payout, .. } => vec![*payout],
            _ => Vec::new(),
        }
    }

    /// Dust left unrefunded by a failed campaign.
    #[must_use]
    pub fn refund_dust(&self) -> Option<Amount> {
        match self {
            Self::CampaignFailed {
                refund_pool,
                refunds,
                ..
            } => Some(refund_pool - refunds.iter().map(|t| t.amount).sum::<Amount>()),
            _ => None,
        }
    }
}

/// Result of dispatching one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as described.
    Accepted(LedgerEvent),
    /// Request discarded; state untouched.
    Rejected(Rejection),
}

impl Outcome {
    /// True for `Accepted`.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The event, if accepted.
    #[must_use]
    pub fn event(&self) -> Option<&LedgerEvent> {
        match self {
            Self::Accepted(event) => Some(event),
            Self::Rejected(_) => None,
        }
    }

    /// The rejection, if rejected.
    #[must_use]
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }

    /// Transfers issued by this request.
    #[must_use]
    pub fn transfers(&self) -> Vec<Transfer> {
        self.event().map(LedgerEvent::transfers).unwrap_or_default()
    }
}

impl From<Result<LedgerEvent, Rejection>> for Outcome {
    fn from(result: Result<LedgerEvent, Rejection>) -> Self {
        match result {
            Ok(event) => Self::Accepted(event),
            Err(reason) => Self::Rejected(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(b: u8) -> Identity {
        Identity::new([b; 32])
    }

    #[test]
    fn test_refund_dust() {
        let event = LedgerEvent::CampaignFailed {
            id: CampaignId(0),
            raised: 100,
            fee: FeeReceipt::default(),
            refund_pool: 95,
            refunds: vec![
                Transfer {
                    destination: id(1),
                    amount: 31,
                },
                Transfer {
                    destination: id(2),
                    amount: 63,
                },
            ],
        };
        assert_eq!(event.refund_dust(), Some(1));
        assert_eq!(event.transfers().len(), 2);
    }

    #[test]
    fn test_outcome_from_result() {
        let rejected: Outcome = Err(Rejection::NothingOwed).into();
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.rejection(), Some(&Rejection::NothingOwed));
        assert!(rejected.transfers().is_empty());

        let payout = Transfer {
            destination: id(4),
            amount: 9,
        };
        let accepted: Outcome = Ok(LedgerEvent::DividendsClaimed {
            payout,
            checkpoint: 1,
        })
        .into();
        assert_eq!(accepted.transfers(), vec![payout]);
    }
}
