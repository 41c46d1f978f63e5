//! # Driven Ports (SPI - Outbound)
//!
//! Host primitives the ledger core depends on. The contract-execution host implements
//! these; `crate::adapters` provides in-memory versions for tests and tooling.
//!
//! Every call is synchronous and, from the core's point of view, infallible.

use crate::domain::entities::LedgerState;
use crate::domain::value_objects::{Amount, Epoch, Identity};
use crate::protocol::Request;

// =============================================================================
// LEDGER HOST (clock + value transfer)
// =============================================================================

/// Clock and value-transfer primitives.
pub trait LedgerHost {
    /// Current epoch. Monotonic, advanced by the host only.
    fn current_epoch(&self) -> Epoch;

    /// Moves `amount` out of the contract balance to `destination`.
    ///
    /// Assumed to always succeed. Finalize mutates state before calling this, so a
    /// host whose transfer can fail must treat that failure as fatal.
    fn transfer(&mut self, destination: Identity, amount: Amount);
}

impl<T: LedgerHost + ?Sized> LedgerHost for &mut T {
    fn current_epoch(&self) -> Epoch {
        (**self).current_epoch()
    }

    fn transfer(&mut self, destination: Identity, amount: Amount) {
        (**self).transfer(destination, amount);
    }
}

// =============================================================================
// STATE ACCESS (persistence)
// =============================================================================

/// Accessor for the single persistent `LedgerState`.
///
/// On the very first invocation the state is `LedgerState::default()`.
pub trait StateAccess {
    /// Read-only view.
    fn state(&self) -> &LedgerState;

    /// Mutable view. Changes persist across invocations.
    fn state_mut(&mut self) -> &mut LedgerState;
}

// =============================================================================
// REQUEST SOURCE (delivery)
// =============================================================================

/// Delivers requests one at a time, in host order.
pub trait RequestSource {
    /// Next request, or None when the host has nothing pending.
    fn read_request(&mut self) -> Option<Request>;
}
