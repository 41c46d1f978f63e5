//! # Campaign Handlers
//!
//! Create, contribute, finalize. Each handler validates every guard before touching
//! state, so a rejection leaves the ledger exactly as it was.

use crate::config::LedgerConfig;
use crate::domain::entities::{Campaign, CampaignState, Contribution, LedgerState};
use crate::domain::fees::{campaign_fee, process_platform_fee};
use crate::domain::value_objects::{mul_div, Amount, CampaignId, Identity};
use crate::errors::Rejection;
use crate::events::{LedgerEvent, Transfer};
use crate::ports::outbound::LedgerHost;
use crate::protocol::{ContributionPayload, CreateCampaignPayload, FinalizeCampaignPayload};
use tracing::debug;

// =============================================================================
// CREATE
// =============================================================================

/// Opens a campaign paid for by `creator` with exactly the creation fee.
///
/// The fee goes through the fee engine before the campaign is appended.
///
/// # Errors
///
/// - `NotInitialized`
/// - `IncorrectCreationFee` when `amount` differs from the configured fee
/// - `NegativeGoal`
/// - `CampaignCapacityReached`
/// - `Overflow` when `now + duration_epochs` is unrepresentable
pub fn create_campaign<H: LedgerHost>(
    state: &mut LedgerState,
    host: &H,
    config: &LedgerConfig,
    creator: Identity,
    amount: Amount,
    payload: CreateCampaignPayload,
) -> Result<LedgerEvent, Rejection> {
    if !state.initialized {
        return Err(Rejection::NotInitialized);
    }
    if amount != state.creation_fee {
        return Err(Rejection::IncorrectCreationFee {
            expected: state.creation_fee,
            paid: amount,
        });
    }
    if payload.goal < 0 {
        return Err(Rejection::NegativeGoal(payload.goal));
    }
    let max = config.max_campaigns;
    if !state.campaigns.has_room(max) || u16::try_from(state.campaigns.len()).is_err() {
        return Err(Rejection::CampaignCapacityReached { max });
    }

    let start_epoch = host.current_epoch();
    let end_epoch = start_epoch
        .checked_add(payload.duration_epochs)
        .ok_or(Rejection::Overflow("campaign end epoch"))?;

    let fee = process_platform_fee(state, state.creation_fee, config.burn_percent_of_fees);

    let campaign = Campaign::new(
        creator,
        payload.beneficiary,
        payload.goal,
        start_epoch,
        end_epoch,
    );
    let id = state
        .campaigns
        .push(campaign, max)
        .ok_or(Rejection::CampaignCapacityReached { max })?;

    Ok(LedgerEvent::CampaignCreated {
        id,
        creator,
        beneficiary: payload.beneficiary,
        goal: payload.goal,
        start_epoch,
        end_epoch,
        fee,
    })
}

// =============================================================================
// CONTRIBUTE
// =============================================================================

/// Adds `amount` from `contributor` to an open campaign.
///
/// # Errors
///
/// - `NotInitialized`
/// - `NonPositiveAmount`
/// - `UnknownCampaign`, `CampaignNotActive`, `CampaignClosed`
/// - `ContributorCapacityReached`, checked even for a returning contributor
/// - `Overflow` when `raised` would leave the 64-bit range
pub fn contribute<H: LedgerHost>(
    state: &mut LedgerState,
    host: &H,
    config: &LedgerConfig,
    contributor: Identity,
    amount: Amount,
    payload: ContributionPayload,
) -> Result<LedgerEvent, Rejection> {
    if !state.initialized {
        return Err(Rejection::NotInitialized);
    }
    if amount <= 0 {
        return Err(Rejection::NonPositiveAmount(amount));
    }

    let id = payload.campaign;
    let now = host.current_epoch();
    let campaign = state
        .campaigns
        .get_mut(id)
        .ok_or(Rejection::UnknownCampaign(id))?;

    if campaign.state != CampaignState::Active {
        return Err(Rejection::CampaignNotActive {
            id,
            state: campaign.state,
        });
    }
    if now >= campaign.end_epoch {
        return Err(Rejection::CampaignClosed {
            id,
            end_epoch: campaign.end_epoch,
            now,
        });
    }
    let max = config.max_contributors_per_campaign;
    if campaign.contributions.len() >= max {
        return Err(Rejection::ContributorCapacityReached { id, max });
    }
    let raised = campaign
        .raised
        .checked_add(amount)
        .ok_or(Rejection::Overflow("campaign raised"))?;

    let index = match campaign.contribution_index(&contributor) {
        Some(index) => index,
        None => {
            campaign.contributions.push(Contribution {
                contributor,
                amount: 0,
            });
            campaign.contributions.len() - 1
        }
    };
    // An entry never exceeds `raised`, which was just checked.
    let entry = &mut campaign.contributions[index];
    entry.amount += amount;
    let total_contributed = entry.amount;
    campaign.raised = raised;

    Ok(LedgerEvent::ContributionRecorded {
        id,
        contributor,
        amount,
        total_contributed,
        raised,
    })
}

// =============================================================================
// FINALIZE
// =============================================================================

/// Settles a campaign whose deadline has passed.
///
/// The campaign leaves `Active` before the fee is charged and before any transfer is
/// issued, so a second finalize is always rejected.
///
/// # Errors
///
/// - `NotInitialized`
/// - `UnexpectedValue` when the request carries value
/// - `UnknownCampaign`, `CampaignNotActive`
/// - `CampaignStillOpen` while `now < end_epoch`
pub fn finalize_campaign<H: LedgerHost>(
    state: &mut LedgerState,
    host: &mut H,
    config: &LedgerConfig,
    amount: Amount,
    payload: FinalizeCampaignPayload,
) -> Result<LedgerEvent, Rejection> {
    if !state.initialized {
        return Err(Rejection::NotInitialized);
    }
    if amount != 0 {
        return Err(Rejection::UnexpectedValue { amount });
    }

    let id = payload.campaign;
    let now = host.current_epoch();
    let campaign = state
        .campaigns
        .get_mut(id)
        .ok_or(Rejection::UnknownCampaign(id))?;

    if campaign.state != CampaignState::Active {
        return Err(Rejection::CampaignNotActive {
            id,
            state: campaign.state,
        });
    }
    if now < campaign.end_epoch {
        return Err(Rejection::CampaignStillOpen {
            id,
            end_epoch: campaign.end_epoch,
            now,
        });
    }

    let raised = campaign.raised;
    if campaign.goal_reached() {
        campaign.state = CampaignState::Successful;
        let beneficiary = campaign.beneficiary;
        settle_success(state, host, config, id, raised, beneficiary)
    } else {
        campaign.state = CampaignState::Failed;
        let refunds = pro_rata_refunds(
            &campaign.contributions,
            raised - campaign_fee(raised, config.failure_fee_percent),
            raised,
        );
        settle_failure(state, host, config, id, raised, refunds)
    }
}

fn settle_success<H: LedgerHost>(
    state: &mut LedgerState,
    host: &mut H,
    config: &LedgerConfig,
    id: CampaignId,
    raised: Amount,
    beneficiary: Identity,
) -> Result<LedgerEvent, Rejection> {
    let fee_amount = campaign_fee(raised, config.success_fee_percent);
    let fee = process_platform_fee(state, fee_amount, config.burn_percent_of_fees);

    let payout = (raised - fee_amount > 0).then(|| Transfer {
        destination: beneficiary,
        amount: raised - fee_amount,
    });
    if let Some(transfer) = payout {
        host.transfer(transfer.destination, transfer.amount);
    }

    Ok(LedgerEvent::CampaignSucceeded {
        id,
        raised,
        fee,
        payout,
    })
}

fn settle_failure<H: LedgerHost>(
    state: &mut LedgerState,
    host: &mut H,
    config: &LedgerConfig,
    id: CampaignId,
    raised: Amount,
    refunds: Vec<Transfer>,
) -> Result<LedgerEvent, Rejection> {
    let fee_amount = campaign_fee(raised, config.failure_fee_percent);
    let fee = process_platform_fee(state, fee_amount, config.burn_percent_of_fees);
    let refund_pool = raised - fee_amount;

    for refund in &refunds {
        host.transfer(refund.destination, refund.amount);
    }

    let refunded: Amount = refunds.iter().map(|r| r.amount).sum();
    debug!(
        campaign = %id,
        refund_pool,
        refunded,
        dust = refund_pool - refunded,
        "Refunds issued"
    );

    Ok(LedgerEvent::CampaignFailed {
        id,
        raised,
        fee,
        refund_pool,
        refunds,
    })
}

/// `floor(pool * amount / raised)` per contributor, skipping zero refunds.
fn pro_rata_refunds(
    contributions: &[Contribution],
    pool: Amount,
    raised: Amount,
) -> Vec<Transfer> {
    if pool <= 0 || raised <= 0 {
        return Vec::new();
    }
    contributions
        .iter()
        .filter_map(|c| {
            let amount = mul_div(pool, c.amount, raised)?;
            (amount > 0).then_some(Transfer {
                destination: c.contributor,
                amount,
            })
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryHost;
    use crate::domain::value_objects::QU;

    fn id(b: u8) -> Identity {
        Identity::new([b; 32])
    }

    fn live_state() -> LedgerState {
        LedgerState {
            initialized: true,
            ipo_end_epoch: 1000,
            ipo_share_price: QU,
            creation_fee: 500 * QU,
            ..LedgerState::default()
        }
    }

    fn create(
        state: &mut LedgerState,
        host: &InMemoryHost,
        goal: Amount,
        duration: i64,
    ) -> CampaignId {
        let payload = CreateCampaignPayload {
            beneficiary: id(0xB),
            goal,
            duration_epochs: duration,
        };
        let fee = state.creation_fee;
        match create_campaign(state, host, &LedgerConfig::default(), id(0xC), fee, payload) {
            Ok(LedgerEvent::CampaignCreated { id, .. }) => id,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn give(
        state: &mut LedgerState,
        host: &InMemoryHost,
        campaign: CampaignId,
        who: Identity,
        amount: Amount,
    ) -> Result<LedgerEvent, Rejection> {
        contribute(
            state,
            host,
            &LedgerConfig::default(),
            who,
            amount,
            ContributionPayload { campaign },
        )
    }

    fn finalize(
        state: &mut LedgerState,
        host: &mut InMemoryHost,
        campaign: CampaignId,
    ) -> Result<LedgerEvent, Rejection> {
        finalize_campaign(
            state,
            host,
            &LedgerConfig::default(),
            0,
            FinalizeCampaignPayload { campaign },
        )
    }

    #[test]
    fn test_create_sets_window_and_charges_fee() {
        let mut state = live_state();
        state.total_shares_issued = 2 * QU;
        let host = InMemoryHost::at_epoch(40);

        let cid = create(&mut state, &host, 500 * QU, 100);
        let campaign = state.campaigns.get(cid).unwrap();

        assert_eq!(cid, CampaignId(0));
        assert_eq!(campaign.start_epoch, 40);
        assert_eq!(campaign.end_epoch, 140);
        assert_eq!(campaign.state, CampaignState::Active);
        assert_eq!(state.treasury, 250 * QU);
        assert_eq!(state.cumulative_revenue_per_share, 125 * QU);
    }

    #[test]
    fn test_create_rejects_wrong_fee() {
        let mut state = live_state();
        let host = InMemoryHost::new();
        let payload = CreateCampaignPayload {
            beneficiary: id(2),
            goal: 10,
            duration_epochs: 10,
        };
        let result = create_campaign(
            &mut state,
            &host,
            &LedgerConfig::default(),
            id(1),
            499 * QU,
            payload,
        );
        assert_eq!(
            result,
            Err(Rejection::IncorrectCreationFee {
                expected: 500 * QU,
                paid: 499 * QU
            })
        );
        assert!(state.campaigns.is_empty());
        assert_eq!(state.treasury, 0);
    }

    #[test]
    fn test_create_rejects_negative_goal() {
        let mut state = live_state();
        state.total_shares_issued = 2 * QU;
        let host = InMemoryHost::new();
        let payload = CreateCampaignPayload {
            beneficiary: id(2),
            goal: -1,
            duration_epochs: 10,
        };
        let fee = state.creation_fee;
        let result = create_campaign(
            &mut state,
            &host,
            &LedgerConfig::default(),
            id(1),
            fee,
            payload,
        );
        assert_eq!(result, Err(Rejection::NegativeGoal(-1)));
        assert!(state.campaigns.is_empty());
        assert_eq!(state.treasury, 0);
        assert_eq!(state.cumulative_revenue_per_share, 0);

        let zero = CreateCampaignPayload { goal: 0, ..payload };
        let accepted =
            create_campaign(&mut state, &host, &LedgerConfig::default(), id(1), fee, zero);
        assert!(accepted.is_ok());
    }

    #[test]
    fn test_create_rejects_at_capacity() {
        let mut state = live_state();
        state.creation_fee = 0;
        let host = InMemoryHost::new();
        let config = LedgerConfig {
            max_campaigns: 2,
            ..LedgerConfig::default()
        };
        let payload = CreateCampaignPayload {
            beneficiary: id(2),
            goal: 10,
            duration_epochs: 10,
        };
        for _ in 0..2 {
            create_campaign(&mut state, &host, &config, id(1), 0, payload).unwrap();
        }
        let result = create_campaign(&mut state, &host, &config, id(1), 0, payload);
        assert_eq!(result, Err(Rejection::CampaignCapacityReached { max: 2 }));
        assert_eq!(state.campaigns.len(), 2);
    }

    #[test]
    fn test_create_rejects_end_epoch_overflow() {
        let mut state = live_state();
        let host = InMemoryHost::at_epoch(10);
        let payload = CreateCampaignPayload {
            beneficiary: id(2),
            goal: 10,
            duration_epochs: i64::MAX,
        };
        let fee = state.creation_fee;
        let result = create_campaign(
            &mut state,
            &host,
            &LedgerConfig::default(),
            id(1),
            fee,
            payload,
        );
        assert!(matches!(result, Err(Rejection::Overflow(_))));
        assert_eq!(state.treasury, 0);
    }

    #[test]
    fn test_contributions_accumulate_per_identity() {
        let mut state = live_state();
        let host = InMemoryHost::at_epoch(0);
        let cid = create(&mut state, &host, 100, 10);

        give(&mut state, &host, cid, id(1), 30).unwrap();
        give(&mut state, &host, cid, id(2), 5).unwrap();
        let event = give(&mut state, &host, cid, id(1), 20).unwrap();

        let campaign = state.campaigns.get(cid).unwrap();
        assert_eq!(campaign.contributions.len(), 2);
        assert_eq!(campaign.contributed_by(&id(1)), 50);
        assert_eq!(campaign.raised, 55);
        assert!(matches!(
            event,
            LedgerEvent::ContributionRecorded {
                total_contributed: 50,
                raised: 55,
                ..
            }
        ));
    }

    #[test]
    fn test_contribute_guards() {
        let mut state = live_state();
        let mut host = InMemoryHost::at_epoch(0);
        let cid = create(&mut state, &host, 100, 10);

        assert_eq!(
            give(&mut state, &host, CampaignId(7), id(1), 5),
            Err(Rejection::UnknownCampaign(CampaignId(7)))
        );
        assert_eq!(
            give(&mut state, &host, cid, id(1), 0),
            Err(Rejection::NonPositiveAmount(0))
        );

        host.set_epoch(10);
        assert!(matches!(
            give(&mut state, &host, cid, id(1), 5),
            Err(Rejection::CampaignClosed { end_epoch: 10, now: 10, .. })
        ));
        assert_eq!(state.campaigns.get(cid).unwrap().raised, 0);
    }

    #[test]
    fn test_contributor_capacity_applies_to_returning_contributor() {
        let mut state = live_state();
        let host = InMemoryHost::at_epoch(0);
        let config = LedgerConfig {
            max_contributors_per_campaign: 1,
            ..LedgerConfig::default()
        };
        let cid = create(&mut state, &host, 100, 10);
        let payload = ContributionPayload { campaign: cid };

        contribute(&mut state, &host, &config, id(1), 5, payload).unwrap();
        let again = contribute(&mut state, &host, &config, id(1), 5, payload);
        assert_eq!(
            again,
            Err(Rejection::ContributorCapacityReached { id: cid, max: 1 })
        );
        assert_eq!(state.campaigns.get(cid).unwrap().raised, 5);
    }

    #[test]
    fn test_finalize_success_pays_beneficiary_once() {
        let mut state = live_state();
        let mut host = InMemoryHost::at_epoch(0);
        let cid = create(&mut state, &host, 500 * QU, 100);
        give(&mut state, &host, cid, id(3), 600 * QU).unwrap();

        assert!(matches!(
            finalize(&mut state, &mut host, cid),
            Err(Rejection::CampaignStillOpen { .. })
        ));

        host.set_epoch(100);
        let event = finalize(&mut state, &mut host, cid).unwrap();
        assert_eq!(
            event.transfers(),
            vec![Transfer {
                destination: id(0xB),
                amount: 594 * QU
            }]
        );
        assert_eq!(host.transfers().len(), 1);
        assert_eq!(
            state.campaigns.get(cid).unwrap().state,
            CampaignState::Successful
        );

        let treasury = state.treasury;
        assert_eq!(
            finalize(&mut state, &mut host, cid),
            Err(Rejection::CampaignNotActive {
                id: cid,
                state: CampaignState::Successful
            })
        );
        assert_eq!(host.transfers().len(), 1);
        assert_eq!(state.treasury, treasury);
    }

    #[test]
    fn test_finalize_failure_refunds_pro_rata() {
        let mut state = live_state();
        let mut host = InMemoryHost::at_epoch(0);
        let cid = create(&mut state, &host, 1_000, 5);
        give(&mut state, &host, cid, id(1), 100).unwrap();
        give(&mut state, &host, cid, id(2), 200).unwrap();
        give(&mut state, &host, cid, id(3), 1).unwrap();

        host.set_epoch(5);
        let event = finalize(&mut state, &mut host, cid).unwrap();

        // raised 301, fee 15, pool 286
        let LedgerEvent::CampaignFailed {
            refund_pool,
            refunds,
            ..
        } = &event
        else {
            panic!("unexpected {event:?}");
        };
        assert_eq!(*refund_pool, 286);
        assert_eq!(
            refunds.iter().map(|r| r.amount).collect::<Vec<_>>(),
            vec![95, 190]
        );
        assert_eq!(event.refund_dust(), Some(1));
        assert_eq!(host.transfers().len(), 2);
        assert_eq!(state.campaigns.get(cid).unwrap().state, CampaignState::Failed);
    }

    #[test]
    fn test_finalize_empty_failed_campaign_transfers_nothing() {
        let mut state = live_state();
        let mut host = InMemoryHost::at_epoch(0);
        let cid = create(&mut state, &host, 10, 1);
        host.set_epoch(1);

        let event = finalize(&mut state, &mut host, cid).unwrap();
        assert!(event.transfers().is_empty());
        assert!(host.transfers().is_empty());
        assert_eq!(state.campaigns.get(cid).unwrap().state, CampaignState::Failed);
    }

    #[test]
    fn test_finalize_rejects_attached_value() {
        let mut state = live_state();
        let mut host = InMemoryHost::at_epoch(50);
        let cid = create(&mut state, &host, 10, 1);
        let result = finalize_campaign(
            &mut state,
            &mut host,
            &LedgerConfig::default(),
            7,
            FinalizeCampaignPayload { campaign: cid },
        );
        assert_eq!(result, Err(Rejection::UnexpectedValue { amount: 7 }));
        assert_eq!(state.campaigns.get(cid).unwrap().state, CampaignState::Active);
    }
}
