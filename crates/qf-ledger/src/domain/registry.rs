//! # Shareholder Registry
//!
//! Append-only, deduplicated mapping from identity to share balance. Lookup is a linear
//! scan; the registry is bounded by `LedgerConfig::max_shareholders`.

use super::entities::Shareholder;
use super::value_objects::{Amount, Identity};
use serde::{Deserialize, Serialize};

/// Ordered shareholder entries. Entries are never removed or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShareholderRegistry {
    entries: Vec<Shareholder>,
}

impl ShareholderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `identity`, if registered.
    #[must_use]
    pub fn position(&self, identity: &Identity) -> Option<usize> {
        self.entries.iter().position(|s| s.identity == *identity)
    }

    /// Returns the slot of `identity`, appending a zero-balance entry if absent.
    ///
    /// Returns None when the identity is new and the registry already holds
    /// `capacity` entries. Nothing is modified in that case.
    pub fn find_or_add(&mut self, identity: Identity, capacity: usize) -> Option<usize> {
        if let Some(index) = self.position(&identity) {
            return Some(index);
        }
        if self.entries.len() >= capacity {
            return None;
        }
        self.entries.push(Shareholder::new(identity));
        Some(self.entries.len() - 1)
    }

    /// Entry for `identity`.
    #[must_use]
    pub fn find(&self, identity: &Identity) -> Option<&Shareholder> {
        self.position(identity).map(|i| &self.entries[i])
    }

    /// Entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Shareholder> {
        self.entries.get(index)
    }

    /// Mutable entry at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shareholder> {
        self.entries.get_mut(index)
    }

    /// Number of registered identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nobody is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Shareholder> {
        self.entries.iter()
    }

    /// Sum of every recorded balance.
    ///
    /// Diverges from `LedgerState::total_shares_issued` once a burn has executed,
    /// because burns shrink supply without touching individual balances.
    #[must_use]
    pub fn recorded_shares(&self) -> i128 {
        self.entries.iter().map(|s| i128::from(s.shares)).sum()
    }

    /// Shares recorded for `identity` (zero if unregistered).
    #[must_use]
    pub fn shares_of(&self, identity: &Identity) -> Amount {
        self.find(identity).map_or(0, |s| s.shares)
    }
}
