//! # Domain Entities
//!
//! Persistent records of the ledger: shareholders, campaigns, contributions, and the
//! aggregate root that the host keeps across invocations.
//!
//! All collections are append-only. Positions handed out once (campaign ids, registry
//! slots) stay valid for the lifetime of the deployment.

use super::ledger::CampaignLedger;
use super::registry::ShareholderRegistry;
use super::value_objects::{Amount, Epoch, Identity};
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// SHAREHOLDER
// =============================================================================

/// An ownership-share balance and its dividend checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shareholder {
    /// Holder identity. Unique within the registry.
    pub identity: Identity,
    /// Shares credited through the IPO. Burns never touch this value.
    pub shares: Amount,
    /// Value of the revenue-per-share accumulator at the last paid claim.
    pub last_revenue_per_share_claimed: Amount,
}

impl Shareholder {
    /// Creates a zero-balance entry.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            shares: 0,
            last_revenue_per_share_claimed: 0,
        }
    }
}

// =============================================================================
// CAMPAIGN
// =============================================================================

/// Lifecycle of a campaign. Leaves `Active` exactly once, at finalize time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CampaignState {
    /// Accepting contributions until `end_epoch`.
    #[default]
    Active,
    /// Goal reached; funds went to the beneficiary.
    Successful,
    /// Goal missed; funds were refunded pro-rata.
    Failed,
}

impl CampaignState {
    /// Returns true for `Successful` and `Failed`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for CampaignState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Successful => write!(f, "successful"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One contributor's accumulated stake in a campaign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    /// Contributor identity. Unique within its campaign.
    pub contributor: Identity,
    /// Sum of every contribution this identity made to the campaign.
    pub amount: Amount,
}

/// A fundraising campaign.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    /// Identity that paid the creation fee.
    pub creator: Identity,
    /// Recipient of the pool on success.
    pub beneficiary: Identity,
    /// Target amount.
    pub goal: Amount,
    /// Sum of all contributions.
    pub raised: Amount,
    /// Epoch at creation.
    pub start_epoch: Epoch,
    /// First epoch at which contributions close and finalize opens.
    pub end_epoch: Epoch,
    /// Lifecycle state.
    pub state: CampaignState,
    /// Per-identity contributions, in first-contribution order.
    pub contributions: Vec<Contribution>,
}

impl Campaign {
    /// Creates an active campaign with nothing raised.
    #[must_use]
    pub fn new(
        creator: Identity,
        beneficiary: Identity,
        goal: Amount,
        start_epoch: Epoch,
        end_epoch: Epoch,
    ) -> Self {
        Self {
            creator,
            beneficiary,
            goal,
            raised: 0,
            start_epoch,
            end_epoch,
            state: CampaignState::Active,
            contributions: Vec::new(),
        }
    }

    /// Position of `contributor` in the contribution list.
    #[must_use]
    pub fn contribution_index(&self, contributor: &Identity) -> Option<usize> {
        self.contributions
            .iter()
            .position(|c| c.contributor == *contributor)
    }

    /// Accumulated amount contributed by `contributor` (zero if none).
    #[must_use]
    pub fn contributed_by(&self, contributor: &Identity) -> Amount {
        self.contribution_index(contributor)
            .map_or(0, |i| self.contributions[i].amount)
    }

    /// True while contributions are accepted at `now`.
    #[must_use]
    pub fn is_open_at(&self, now: Epoch) -> bool {
        self.state == CampaignState::Active && now < self.end_epoch
    }

    /// True once the goal has been met.
    #[must_use]
    pub fn goal_reached(&self) -> bool {
        self.raised >= self.goal
    }
}

// =============================================================================
// LEDGER STATE (aggregate root)
// =============================================================================

/// Dispatcher phase derived from the `initialized` flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Only an initialize request is accepted.
    Uninitialized,
    /// Configuration is fixed; all other operations are live.
    Initialized,
}

/// The persistent state of one deployment.
///
/// The host owns the single instance and lends it to the dispatcher for each request.
/// `Default` is the state observed on the very first invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Set by the one accepted initialize request.
    pub initialized: bool,
    /// Identity that initialized the deployment.
    pub owner: Identity,
    /// IPO buy-ins are accepted strictly before this epoch.
    pub ipo_end_epoch: Epoch,
    /// Price of one whole share (`QU` share units).
    pub ipo_share_price: Amount,
    /// Exact amount a create-campaign request must carry.
    pub creation_fee: Amount,
    /// Ownership registry.
    pub shareholders: ShareholderRegistry,
    /// Outstanding shares after burns.
    pub total_shares_issued: Amount,
    /// Shares removed from supply by fee burns.
    pub total_shares_burned: Amount,
    /// Dividend-per-share accumulator, scaled by `QU`.
    pub cumulative_revenue_per_share: Amount,
    /// Funds held for dividend claims.
    pub treasury: Amount,
    /// All campaigns ever created.
    pub campaigns: CampaignLedger,
}

impl LedgerState {
    /// Current dispatcher phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.initialized {
            Phase::Initialized
        } else {
            Phase::Uninitialized
        }
    }

    /// Shareholder entry for `identity`, if registered.
    #[must_use]
    pub fn shareholder(&self, identity: &Identity) -> Option<&Shareholder> {
        self.shareholders.find(identity)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(b: u8) -> Identity {
        Identity::new([b; 32])
    }

    #[test]
    fn test_new_campaign_is_active_and_empty() {
        let c = Campaign::new(id(1), id(2), 100, 10, 20);
        assert_eq!(c.state, CampaignState::Active);
        assert_eq!(c.raised, 0);
        assert!(c.contributions.is_empty());
        assert!(!c.goal_reached());
    }

    #[test]
    fn test_campaign_open_window() {
        let c = Campaign::new(id(1), id(2), 100, 10, 20);
        assert!(c.is_open_at(10));
        assert!(c.is_open_at(19));
        assert!(!c.is_open_at(20));
    }

    #[test]
    fn test_contributed_by() {
        let mut c = Campaign::new(id(1), id(2), 100, 0, 5);
        c.contributions.push(Contribution {
            contributor: id(3),
            amount: 40,
        });
        assert_eq!(c.contributed_by(&id(3)), 40);
        assert_eq!(c.contributed_by(&id(4)), 0);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!CampaignState::Active.is_terminal());
        assert!(CampaignState::Successful.is_terminal());
        assert!(CampaignState::Failed.is_terminal());
    }

    #[test]
    fn test_default_state_is_uninitialized() {
        let state = LedgerState::default();
        assert_eq!(state.phase(), Phase::Uninitialized);
        assert!(state.owner.is_zero());
        assert!(state.campaigns.is_empty());
        assert!(state.shareholders.is_empty());
    }
}
