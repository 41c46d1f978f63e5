//! # Driving Ports (API - Inbound)
//!
//! The surface a host drives the ledger through.

use crate::domain::entities::LedgerState;
use crate::events::Outcome;
use crate::protocol::Request;
use crate::ports::outbound::RequestSource;

/// Crowdfunding ledger entry point.
pub trait CrowdfundingApi {
    /// Processes one request to completion.
    fn handle_request(&mut self, request: &Request) -> Outcome;

    /// Current persistent state.
    fn state(&self) -> &LedgerState;

    /// Reads and processes one request from `source`.
    ///
    /// Returns None when the source has nothing pending.
    fn process_next<R: RequestSource>(&mut self, source: &mut R) -> Option<Outcome> {
        let request = source.read_request()?;
        Some(self.handle_request(&request))
    }

    /// Drains `source`, returning every outcome in order.
    fn process_all<R: RequestSource>(&mut self, source: &mut R) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(outcome) = self.process_next(source) {
            outcomes.push(outcome);
        }
        outcomes
    }
}
