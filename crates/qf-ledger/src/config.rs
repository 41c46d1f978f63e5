//! Configuration for the crowdfunding ledger core.

use crate::domain::value_objects::{Amount, QU};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of campaigns the ledger will ever hold.
pub const MAX_CAMPAIGNS: usize = 128;

/// Maximum number of distinct contributors per campaign.
pub const MAX_CONTRIBUTORS_PER_CAMPAIGN: usize = 256;

/// Maximum number of distinct shareholders.
pub const MAX_SHAREHOLDERS: usize = 512;

/// Ceiling on `total_shares_issued`.
pub const MAX_SHARES: Amount = 1_000_000 * QU;

/// Platform fee taken from a successful campaign, in percent of `raised`.
pub const SUCCESS_FEE_PERCENT: Amount = 1;

/// Platform fee taken from a failed campaign, in percent of `raised`.
pub const FAILURE_FEE_PERCENT: Amount = 5;

/// Share of every platform fee that funds a share burn, in percent.
pub const BURN_PERCENT_OF_FEES: Amount = 50;

/// Ledger configuration.
///
/// Defaults reproduce the deployed contract constants. Every field is fixed for the
/// lifetime of a deployment; changing one after state exists is undefined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Campaign capacity.
    pub max_campaigns: usize,
    /// Contributor capacity of each campaign.
    pub max_contributors_per_campaign: usize,
    /// Shareholder registry capacity.
    pub max_shareholders: usize,
    /// Share issuance ceiling.
    pub max_shares: Amount,
    /// Fee on successful campaigns (percent).
    pub success_fee_percent: Amount,
    /// Fee on failed campaigns (percent).
    pub failure_fee_percent: Amount,
    /// Portion of each fee used to burn shares (percent).
    pub burn_percent_of_fees: Amount,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_campaigns: MAX_CAMPAIGNS,
            max_contributors_per_campaign: MAX_CONTRIBUTORS_PER_CAMPAIGN,
            max_shareholders: MAX_SHAREHOLDERS,
            max_shares: MAX_SHARES,
            success_fee_percent: SUCCESS_FEE_PERCENT,
            failure_fee_percent: FAILURE_FEE_PERCENT,
            burn_percent_of_fees: BURN_PERCENT_OF_FEES,
        }
    }
}

impl LedgerConfig {
    /// Checks that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("max_campaigns", self.max_campaigns),
            ("max_contributors_per_campaign", self.max_contributors_per_campaign),
            ("max_shareholders", self.max_shareholders),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroCapacity { field });
            }
        }

        // Campaign indices travel as u16 on the wire.
        if self.max_campaigns > usize::from(u16::MAX) + 1 {
            return Err(ConfigError::CampaignCapacityTooLarge {
                max: self.max_campaigns,
            });
        }

        for (field, value) in [
            ("success_fee_percent", self.success_fee_percent),
            ("failure_fee_percent", self.failure_fee_percent),
            ("burn_percent_of_fees", self.burn_percent_of_fees),
        ] {
            if !(0..=100).contains(&value) {
                return Err(ConfigError::PercentOutOfRange { field, value });
            }
        }

        if self.max_shares <= 0 {
            return Err(ConfigError::NonPositiveShareCeiling(self.max_shares));
        }

        Ok(())
    }
}

/// Invalid configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A capacity was set to zero.
    #[error("capacity {field} must be non-zero")]
    ZeroCapacity { field: &'static str },

    /// Campaign capacity cannot be addressed by a 16-bit index.
    #[error("campaign capacity {max} exceeds the 16-bit index space")]
    CampaignCapacityTooLarge { max: usize },

    /// A percentage outside 0..=100.
    #[error("{field} must be within 0..=100, got {value}")]
    PercentOutOfRange { field: &'static str, value: Amount },

    /// Share ceiling must be positive.
    #[error("share ceiling must be positive, got {0}")]
    NonPositiveShareCeiling(Amount),
}
