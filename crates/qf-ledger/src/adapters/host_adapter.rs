//! # Host Adapter
//!
//! In-memory host for tests and tooling: a settable epoch clock, a transfer journal, and
//! a FIFO of pending requests. A production host backs these with the execution
//! environment.

use crate::domain::value_objects::{Amount, Epoch, Identity};
use crate::events::Transfer;
use crate::ports::outbound::{LedgerHost, RequestSource};
use crate::protocol::Request;
use std::collections::VecDeque;

/// In-memory `LedgerHost` and `RequestSource`.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    /// Current epoch.
    epoch: Epoch,
    /// Every transfer issued, in order.
    transfers: Vec<Transfer>,
    /// Requests waiting to be read.
    pending: VecDeque<Request>,
}

impl InMemoryHost {
    /// Creates a host at epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a host at `epoch`.
    #[must_use]
    pub fn at_epoch(epoch: Epoch) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    /// Creates a host at epoch 0 with `requests` queued.
    pub fn with_requests(requests: impl IntoIterator<Item = Request>) -> Self {
        Self {
            pending: requests.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Moves the clock to `epoch`.
    pub fn set_epoch(&mut self, epoch: Epoch) {
        self.epoch = epoch;
    }

    /// Advances the clock by `epochs`.
    pub fn advance(&mut self, epochs: Epoch) {
        self.epoch = self.epoch.saturating_add(epochs);
    }

    /// Transfers issued so far.
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Removes and returns the transfer journal.
    pub fn take_transfers(&mut self) -> Vec<Transfer> {
        std::mem::take(&mut self.transfers)
    }

    /// Total transferred to `destination`.
    #[must_use]
    pub fn received_by(&self, destination: &Identity) -> Amount {
        self.transfers
            .iter()
            .filter(|t| t.destination == *destination)
            .map(|t| t.amount)
            .sum()
    }

    /// Total transferred out.
    #[must_use]
    pub fn total_transferred(&self) -> Amount {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Queues a request for `read_request`.
    pub fn enqueue(&mut self, request: Request) {
        self.pending.push_back(request);
    }

    /// Number of queued requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl LedgerHost for InMemoryHost {
    fn current_epoch(&self) -> Epoch {
        self.epoch
    }

    fn transfer(&mut self, destination: Identity, amount: Amount) {
        self.transfers.push(Transfer {
            destination,
            amount,
        });
    }
}

impl RequestSource for InMemoryHost {
    fn read_request(&mut self) -> Option<Request> {
        self.pending.pop_front()
    }
}
