//! # State Adapter
//!
//! In-memory state access for testing. A production host maps `LedgerState` onto the
//! contract's persistent storage.

use crate::domain::entities::LedgerState;
use crate::ports::outbound::StateAccess;

/// In-memory persistent state.
#[derive(Clone, Debug, Default)]
pub struct InMemoryState {
    state: LedgerState,
}

impl InMemoryState {
    /// Create a fresh, uninitialized state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing snapshot.
    #[must_use]
    pub fn from_state(state: LedgerState) -> Self {
        Self { state }
    }

    /// Unwrap the state.
    #[must_use]
    pub fn into_inner(self) -> LedgerState {
        self.state
    }
}

impl StateAccess for InMemoryState {
    fn state(&self) -> &LedgerState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut LedgerState {
        &mut self.state
    }
}
