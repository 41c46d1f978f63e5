//! # Share Handlers
//!
//! IPO buy-in and dividend claims against the pull-based accumulator.

use crate::config::LedgerConfig;
use crate::domain::entities::LedgerState;
use crate::domain::value_objects::{mul_div, Amount, Identity, QU};
use crate::errors::Rejection;
use crate::events::{LedgerEvent, Transfer};
use crate::ports::outbound::LedgerHost;

/// Converts `amount` into shares at the IPO price and credits `holder`.
///
/// # Errors
///
/// - `NotInitialized`
/// - `IpoClosed` once `now >= ipo_end_epoch`
/// - `NonPositiveAmount`, `InvalidSharePrice`
/// - `ShareCeilingExceeded` when issuance would pass `max_shares`
/// - `ShareholderCapacityReached` for a new holder on a full registry
pub fn buy_shares<H: LedgerHost>(
    state: &mut LedgerState,
    host: &H,
    config: &LedgerConfig,
    holder: Identity,
    amount: Amount,
) -> Result<LedgerEvent, Rejection> {
    if !state.initialized {
        return Err(Rejection::NotInitialized);
    }
    let now = host.current_epoch();
    if now >= state.ipo_end_epoch {
        return Err(Rejection::IpoClosed {
            end_epoch: state.ipo_end_epoch,
            now,
        });
    }
    if amount <= 0 {
        return Err(Rejection::NonPositiveAmount(amount));
    }
    if state.ipo_share_price <= 0 {
        return Err(Rejection::InvalidSharePrice(state.ipo_share_price));
    }

    let ceiling = |requested| Rejection::ShareCeilingExceeded {
        issued: state.total_shares_issued,
        requested,
        max: config.max_shares,
    };
    let shares =
        mul_div(amount, QU, state.ipo_share_price).ok_or_else(|| ceiling(Amount::MAX))?;
    let total_shares_issued = state
        .total_shares_issued
        .checked_add(shares)
        .filter(|total| *total <= config.max_shares)
        .ok_or_else(|| ceiling(shares))?;

    let max = config.max_shareholders;
    let balance = state
        .shareholders
        .position(&holder)
        .and_then(|i| state.shareholders.get(i))
        .map_or(0, |s| s.shares)
        .checked_add(shares)
        .ok_or(Rejection::Overflow("shareholder balance"))?;

    let index = state
        .shareholders
        .find_or_add(holder, max)
        .ok_or(Rejection::ShareholderCapacityReached { max })?;
    if let Some(entry) = state.shareholders.get_mut(index) {
        entry.shares = balance;
    }
    state.total_shares_issued = total_shares_issued;

    Ok(LedgerEvent::SharesIssued {
        holder,
        amount,
        shares,
        total_shares_issued,
    })
}

/// Pays `claimant` everything accrued since its last paid claim.
///
/// A new identity is registered with zero shares even though it has nothing to claim.
/// The checkpoint advances only together with a transfer.
///
/// # Errors
///
/// - `NotInitialized`
/// - `UnexpectedValue` when the request carries value
/// - `ShareholderCapacityReached` for a new claimant on a full registry
/// - `NothingOwed` when nothing accrued, no shares are held, or the claim rounds to zero
/// - `TreasuryShortfall` when the treasury cannot cover the claim
pub fn claim_dividends<H: LedgerHost>(
    state: &mut LedgerState,
    host: &mut H,
    config: &LedgerConfig,
    claimant: Identity,
    amount: Amount,
) -> Result<LedgerEvent, Rejection> {
    if !state.initialized {
        return Err(Rejection::NotInitialized);
    }
    if amount != 0 {
        return Err(Rejection::UnexpectedValue { amount });
    }

    let max = config.max_shareholders;
    let index = state
        .shareholders
        .find_or_add(claimant, max)
        .ok_or(Rejection::ShareholderCapacityReached { max })?;
    let cumulative = state.cumulative_revenue_per_share;
    let treasury = state.treasury;
    let entry = state
        .shareholders
        .get_mut(index)
        .ok_or(Rejection::ShareholderCapacityReached { max })?;

    let owed = cumulative.saturating_sub(entry.last_revenue_per_share_claimed);
    if owed <= 0 || entry.shares <= 0 {
        return Err(Rejection::NothingOwed);
    }
    let claim = mul_div(owed, entry.shares, QU).ok_or(Rejection::Overflow("dividend claim"))?;
    if claim <= 0 {
        return Err(Rejection::NothingOwed);
    }
    if treasury < claim {
        return Err(Rejection::TreasuryShortfall { claim, treasury });
    }

    entry.last_revenue_per_share_claimed = cumulative;
    state.treasury -= claim;
    host.transfer(claimant, claim);

    Ok(LedgerEvent::DividendsClaimed {
        payout: Transfer {
            destination: claimant,
            amount: claim,
        },
        checkpoint: cumulative,
    })
}
