//! # Campaign Ledger
//!
//! Append-only collection of campaigns addressed by `CampaignId`.

use super::entities::Campaign;
use super::value_objects::CampaignId;
use serde::{Deserialize, Serialize};

/// All campaigns, in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CampaignLedger {
    campaigns: Vec<Campaign>,
}

impl CampaignLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True if another campaign fits under `capacity`.
    #[must_use]
    pub fn has_room(&self, capacity: usize) -> bool {
        self.campaigns.len() < capacity
    }

    /// Appends a campaign and returns its id.
    ///
    /// Returns None (and drops nothing into the ledger) when `capacity` is reached or
    /// the next index does not fit in a `CampaignId`.
    pub fn push(&mut self, campaign: Campaign, capacity: usize) -> Option<CampaignId> {
        if !self.has_room(capacity) {
            return None;
        }
        let id = u16::try_from(self.campaigns.len()).ok()?;
        self.campaigns.push(campaign);
        Some(CampaignId(id))
    }

    /// Campaign with `id`.
    #[must_use]
    pub fn get(&self, id: CampaignId) -> Option<&Campaign> {
        self.campaigns.get(id.index())
    }

    /// Mutable campaign with `id`.
    pub fn get_mut(&mut self, id: CampaignId) -> Option<&mut Campaign> {
        self.campaigns.get_mut(id.index())
    }

    /// Number of campaigns ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    /// True if no campaign exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }

    /// Campaigns with their ids, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (CampaignId, &Campaign)> {
        self.campaigns
            .iter()
            .enumerate()
            .filter_map(|(i, c)| u16::try_from(i).ok().map(|i| (CampaignId(i), c)))
    }
}
