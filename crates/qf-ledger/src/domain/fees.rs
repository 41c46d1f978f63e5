//! # Fee Engine
//!
//! Splits every platform fee into a share burn and a treasury dividend, and advances the
//! revenue-per-share accumulator.
//!
//! ## Split
//!
//! ```text
//! burn     = fee * burn_percent / 100      (floor)
//! dividend = fee - burn                    (remainder, so burn + dividend == fee)
//! ```
//!
//! ## Burn
//!
//! The burn is converted to shares at the IPO price and removed from
//! `total_shares_issued` only. Individual balances are left untouched, so after a burn
//! the registry's recorded shares exceed the outstanding supply and each later dividend
//! is spread over fewer shares than holders actually own. The two totals are not
//! reconciled anywhere.
//!
//! ## Dividend
//!
//! Pull-based: the dividend is parked in the treasury and the accumulator grows by
//! `dividend * QU / total_shares_issued`. Holders realize it lazily via a claim.

use super::entities::LedgerState;
use super::value_objects::{mul_div, Amount, QU};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a fee divides between burning and dividends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    /// Portion used to buy back and burn shares.
    pub burn: Amount,
    /// Portion paid into the treasury.
    pub dividend: Amount,
}

/// Splits `fee` so that `burn + dividend == fee`.
///
/// Non-positive fees split to zero on both sides.
#[must_use]
pub fn split_fee(fee: Amount, burn_percent: Amount) -> FeeSplit {
    if fee <= 0 {
        return FeeSplit::default();
    }
    let burn = mul_div(fee, burn_percent.clamp(0, 100), 100).unwrap_or(0);
    FeeSplit {
        burn,
        dividend: fee - burn,
    }
}

/// Platform fee on a campaign's raised amount, `raised * percent / 100` (floor).
#[must_use]
pub fn campaign_fee(raised: Amount, percent: Amount) -> Amount {
    if raised <= 0 {
        return 0;
    }
    mul_div(raised, percent, 100).unwrap_or(0)
}

/// Effect of one fee on the share supply and the treasury.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeReceipt {
    /// Fee presented to the engine.
    pub fee: Amount,
    /// Deterministic split of `fee`.
    pub split: FeeSplit,
    /// Shares removed from supply (zero if the burn guard failed).
    pub shares_burned: Amount,
    /// Increase of the revenue-per-share accumulator.
    pub revenue_per_share_increase: Amount,
}

/// Applies a platform fee to `state`.
///
/// No-op on an uninitialized ledger or for `fee <= 0`.
pub fn process_platform_fee(
    state: &mut LedgerState,
    fee: Amount,
    burn_percent: Amount,
) -> FeeReceipt {
    let mut receipt = FeeReceipt {
        fee,
        ..FeeReceipt::default()
    };
    if !state.initialized || fee <= 0 {
        return receipt;
    }

    let split = split_fee(fee, burn_percent);
    receipt.split = split;

    if split.burn > 0 && state.ipo_share_price > 0 {
        // An unrepresentable share count can never be below the outstanding supply.
        if let Some(shares_to_burn) = mul_div(split.burn, QU, state.ipo_share_price) {
            if shares_to_burn > 0 && state.total_shares_issued > shares_to_burn {
                state.total_shares_issued -= shares_to_burn;
                state.total_shares_burned =
                    state.total_shares_burned.saturating_add(shares_to_burn);
                receipt.shares_burned = shares_to_burn;
            }
        }
    }

    if split.dividend > 0 {
        state.treasury = state.treasury.saturating_add(split.dividend);
        if state.total_shares_issued > 0 {
            if let Some(increase) = mul_div(split.dividend, QU, state.total_shares_issued) {
                state.cumulative_revenue_per_share =
                    state.cumulative_revenue_per_share.saturating_add(increase);
                receipt.revenue_per_share_increase = increase;
            }
        }
    }

    debug!(
        fee,
        burn = split.burn,
        dividend = split.dividend,
        shares_burned = receipt.shares_burned,
        rps_increase = receipt.revenue_per_share_increase,
        "Platform fee processed"
    );

    receipt
}

// =============================================================================
// TESTS
// =============================================================================
