//! # Ledger Service
//!
//! Host-facing wrapper around the dispatcher. Owns the state accessor and the host
//! adapter, processes requests one at a time, logs each outcome and keeps statistics.
//!
//! ## Processing model
//!
//! - One request runs to completion before the next is read
//! - A rejected request is a silent no-op for the host; it is only logged and counted
//! - Transfers are issued synchronously through the host during the request

use crate::adapters::{InMemoryHost, InMemoryState};
use crate::config::{ConfigError, LedgerConfig};
use crate::dispatcher::RequestDispatcher;
use crate::domain::entities::LedgerState;
use crate::domain::invariants::{check_all_invariants, InvariantCheckResult};
use crate::domain::value_objects::Amount;
use crate::events::Outcome;
use crate::ports::inbound::CrowdfundingApi;
use crate::ports::outbound::{LedgerHost, RequestSource, StateAccess};
use crate::protocol::Request;
use tracing::{debug, info, instrument, warn};

/// Statistics for the ledger service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Total requests handled.
    pub requests_processed: u64,
    /// Requests that changed state.
    pub accepted: u64,
    /// Requests discarded as no-ops.
    pub rejected: u64,
    /// Transfers issued through the host.
    pub transfers_issued: u64,
    /// Sum of all transferred amounts.
    pub total_transferred: Amount,
}

/// The crowdfunding ledger service.
pub struct LedgerService<S: StateAccess, H: LedgerHost> {
    /// Request router.
    dispatcher: RequestDispatcher,
    /// Persistent state accessor.
    store: S,
    /// Clock and transfer primitives.
    host: H,
    /// Service statistics.
    stats: ServiceStats,
}

impl<S: StateAccess, H: LedgerHost> LedgerService<S, H> {
    /// Create a service with a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns the configuration error, if any.
    pub fn new(store: S, host: H, config: LedgerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            max_campaigns = config.max_campaigns,
            max_shareholders = config.max_shareholders,
            max_shares = config.max_shares,
            "Ledger service configured"
        );
        Ok(Self::with_dispatcher(store, host, RequestDispatcher::new(config)))
    }

    /// Create a service with the default configuration.
    #[must_use]
    pub fn with_defaults(store: S, host: H) -> Self {
        Self::with_dispatcher(store, host, RequestDispatcher::default())
    }

    fn with_dispatcher(store: S, host: H, dispatcher: RequestDispatcher) -> Self {
        Self {
            dispatcher,
            store,
            host,
            stats: ServiceStats::default(),
        }
    }

    /// Get current service statistics.
    #[must_use]
    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        self.dispatcher.config()
    }

    /// Host adapter.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable host adapter, e.g. to move a test clock.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Runs every invariant check against the current state.
    #[must_use]
    pub fn check_invariants(&self) -> InvariantCheckResult {
        check_all_invariants(self.store.state(), self.dispatcher.config())
    }

    /// Splits the service into its state accessor and host.
    pub fn into_parts(self) -> (S, H) {
        (self.store, self.host)
    }

    fn record(&mut self, outcome: &Outcome) {
        self.stats.requests_processed += 1;
        match outcome {
            Outcome::Accepted(event) => {
                self.stats.accepted += 1;
                for transfer in event.transfers() {
                    self.stats.transfers_issued += 1;
                    self.stats.total_transferred =
                        self.stats.total_transferred.saturating_add(transfer.amount);
                }
            }
            Outcome::Rejected(_) => self.stats.rejected += 1,
        }
    }
}

impl<S: StateAccess, H: LedgerHost + RequestSource> LedgerService<S, H> {
    /// Processes every request pending at the host.
    pub fn run_pending(&mut self) -> Vec<Outcome> {
        let mut outcomes = Vec::new();
        while let Some(request) = self.host.read_request() {
            outcomes.push(self.handle_request(&request));
        }
        debug!(processed = outcomes.len(), "Host queue drained");
        outcomes
    }
}

/// Create a default service with in-memory adapters (for testing).
#[must_use]
pub fn create_test_service() -> LedgerService<InMemoryState, InMemoryHost> {
    LedgerService::with_defaults(InMemoryState::new(), InMemoryHost::new())
}

// =============================================================================
// CrowdfundingApi Implementation
// =============================================================================

impl<S: StateAccess, H: LedgerHost> CrowdfundingApi for LedgerService<S, H> {
    #[instrument(
        skip(self, request),
        fields(source = %request.source, amount = request.amount, payload_len = request.payload.len())
    )]
    fn handle_request(&mut self, request: &Request) -> Outcome {
        let outcome = self
            .dispatcher
            .dispatch(self.store.state_mut(), &mut self.host, request);

        match &outcome {
            Outcome::Accepted(event) => {
                info!(?event, "Request accepted");
            }
            Outcome::Rejected(reason) => {
                warn!(%reason, "Request rejected");
            }
        }
        self.record(&outcome);
        outcome
    }

    fn state(&self) -> &LedgerState {
        self.store.state()
    }
}
