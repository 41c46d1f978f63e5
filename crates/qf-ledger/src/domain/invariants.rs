//! # Domain Invariants
//!
//! Properties of `LedgerState` that hold after every request, whatever its outcome.
//! Handlers never call these; they exist so tests and hosts can audit a state snapshot.
//!
//! - INVARIANT-1: Capacity ceilings
//! - INVARIANT-2: Unique identities (registry and per campaign)
//! - INVARIANT-3: Share ceiling and non-negative balances
//! - INVARIANT-4: `raised` equals the sum of contributions

use crate::config::LedgerConfig;
use crate::domain::entities::LedgerState;
use crate::domain::value_objects::{Amount, CampaignId};
use std::collections::HashSet;

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Capacity ceilings
#[must_use]
pub fn check_capacity_invariant(state: &LedgerState, config: &LedgerConfig) -> bool {
    state.shareholders.len() <= config.max_shareholders
        && state.campaigns.len() <= config.max_campaigns
        && state
            .campaigns
            .iter()
            .all(|(_, c)| c.contributions.len() <= config.max_contributors_per_campaign)
}

/// INVARIANT-2: At most one entry per identity, globally and per campaign.
#[must_use]
pub fn check_unique_identity_invariant(state: &LedgerState) -> bool {
    let mut seen = HashSet::new();
    if !state.shareholders.iter().all(|s| seen.insert(s.identity)) {
        return false;
    }
    state.campaigns.iter().all(|(_, c)| {
        let mut seen = HashSet::new();
        c.contributions.iter().all(|entry| seen.insert(entry.contributor))
    })
}

/// INVARIANT-3: Share ceiling and non-negative balances.
#[must_use]
pub fn check_share_invariant(state: &LedgerState, config: &LedgerConfig) -> bool {
    state.total_shares_issued >= 0
        && state.total_shares_issued <= config.max_shares
        && state.total_shares_burned >= 0
        && state.shareholders.iter().all(|s| s.shares >= 0)
}

/// INVARIANT-4: Every campaign's `raised` is the sum of its contributions.
#[must_use]
pub fn check_raised_invariant(state: &LedgerState) -> bool {
    state.campaigns.iter().all(|(_, c)| {
        let sum: i128 = c.contributions.iter().map(|e| i128::from(e.amount)).sum();
        c.contributions.iter().all(|e| e.amount >= 0) && sum == i128::from(c.raised)
    })
}

/// Check all invariants at once.
#[must_use]
pub fn check_all_invariants(state: &LedgerState, config: &LedgerConfig) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_capacity_invariant(state, config) {
        violations.push(InvariantViolation::CapacityExceeded);
    }

    if !check_unique_identity_invariant(state) {
        violations.push(InvariantViolation::DuplicateIdentity);
    }

    if !check_share_invariant(state, config) {
        violations.push(InvariantViolation::ShareCeilingBreached {
            issued: state.total_shares_issued,
            max: config.max_shares,
        });
    }

    if !check_raised_invariant(state) {
        let campaign = state
            .campaigns
            .iter()
            .find(|(_, c)| {
                let sum: i128 = c.contributions.iter().map(|e| i128::from(e.amount)).sum();
                sum != i128::from(c.raised)
            })
            .map(|(id, _)| id);
        violations.push(InvariantViolation::RaisedMismatch { campaign });
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A collection grew past its configured capacity.
    CapacityExceeded,
    /// An identity appears twice in the registry or in one campaign.
    DuplicateIdentity,
    /// Supply outside `0..=max_shares` or a negative balance.
    ShareCeilingBreached { issued: Amount, max: Amount },
    /// `raised` disagrees with the contribution entries (or an entry is negative).
    RaisedMismatch { campaign: Option<CampaignId> },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "collection capacity exceeded"),
            Self::DuplicateIdentity => write!(f, "duplicate identity entry"),
            Self::ShareCeilingBreached { issued, max } => {
                write!(f, "share supply out of range: issued {issued}, max {max}")
            }
            Self::RaisedMismatch { campaign: Some(id) } => {
                write!(f, "raised does not match contributions for campaign {id}")
            }
            Self::RaisedMismatch { campaign: None } => {
                write!(f, "negative contribution entry")
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Campaign, Contribution};
    use crate::domain::value_objects::Identity;

    fn id(b: u8) -> Identity {
        Identity::new([b; 32])
    }

    fn state_with_campaign(raised: Amount, entries: &[(u8, Amount)]) -> LedgerState {
        let mut state = LedgerState {
            initialized: true,
            ..LedgerState::default()
        };
        let mut campaign = Campaign::new(id(1), id(2), 100, 0, 10);
        campaign.raised = raised;
        campaign.contributions = entries
            .iter()
            .map(|&(b, amount)| Contribution {
                contributor: id(b),
                amount,
            })
            .collect();
        state.campaigns.push(campaign, 8);
        state
    }

    #[test]
    fn test_default_state_is_valid() {
        let result = check_all_invariants(&LedgerState::default(), &LedgerConfig::default());
        assert!(result.is_valid());
    }

    #[test]
    fn test_raised_mismatch_detected() {
        let state = state_with_campaign(50, &[(3, 20), (4, 20)]);
        let result = check_all_invariants(&state, &LedgerConfig::default());
        assert_eq!(
            result,
            InvariantCheckResult::Invalid(vec![InvariantViolation::RaisedMismatch {
                campaign: Some(CampaignId(0))
            }])
        );
    }

    #[test]
    fn test_duplicate_contributor_detected() {
        let state = state_with_campaign(40, &[(3, 20), (3, 20)]);
        assert!(!check_unique_identity_invariant(&state));
        assert!(check_raised_invariant(&state));
    }

    #[test]
    fn test_share_ceiling_detected() {
        let config = LedgerConfig::default();
        let state = LedgerState {
            total_shares_issued: config.max_shares + 1,
            ..LedgerState::default()
        };
        assert!(!check_share_invariant(&state, &config));
    }

    #[test]
    fn test_capacity_checked_against_config() {
        let state = state_with_campaign(20, &[(3, 10), (4, 10)]);
        let tight = LedgerConfig {
            max_contributors_per_campaign: 1,
            ..LedgerConfig::default()
        };
        assert!(check_capacity_invariant(&state, &LedgerConfig::default()));
        assert!(!check_capacity_invariant(&state, &tight));
    }

    #[test]
    fn test_violation_display() {
        let v = InvariantViolation::ShareCeilingBreached { issued: 5, max: 4 };
        assert_eq!(v.to_string(), "share supply out of range: issued 5, max 4");
    }
}
