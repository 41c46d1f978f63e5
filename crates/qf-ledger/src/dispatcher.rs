//! # Request Dispatcher
//!
//! Single entry point of the ledger core. Classifies a request against the current phase
//! and routes it to exactly one handler.
//!
//! ```text
//! Request ──► classify(request, phase) ──► Operation ──► handler ──► Outcome
//!                    │
//!                    └─ Rejected (unrecognized / malformed / not initialized)
//! ```
//!
//! The dispatcher holds no state of its own; the aggregate and the host are lent to it
//! for the duration of one request.

use crate::config::LedgerConfig;
use crate::domain::entities::LedgerState;
use crate::events::Outcome;
use crate::handlers;
use crate::ports::outbound::LedgerHost;
use crate::protocol::{classify, Operation, Request};
use tracing::{debug, trace};

/// Routes requests to handlers under a fixed configuration.
#[derive(Clone, Debug, Default)]
pub struct RequestDispatcher {
    config: LedgerConfig,
}

impl RequestDispatcher {
    /// Creates a dispatcher. The configuration is assumed valid.
    #[must_use]
    pub fn new(config: LedgerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Processes one request to completion.
    ///
    /// A rejected request leaves `state` untouched and issues no transfer.
    pub fn dispatch<H: LedgerHost>(
        &self,
        state: &mut LedgerState,
        host: &mut H,
        request: &Request,
    ) -> Outcome {
        let operation = match classify(request, state.phase()) {
            Ok(operation) => operation,
            Err(reason) => {
                trace!(
                    amount = request.amount,
                    payload_len = request.payload.len(),
                    %reason,
                    "Request not classified"
                );
                return Outcome::Rejected(reason);
            }
        };
        debug!(operation = operation.name(), source = %request.source, "Dispatching");

        let config = &self.config;
        let source = request.source;
        let amount = request.amount;
        let result = match operation {
            Operation::Initialize(payload) => handlers::initialize(state, source, payload),
            Operation::CreateCampaign(payload) => {
                handlers::create_campaign(state, host, config, source, amount, payload)
            }
            Operation::FinalizeCampaign(payload) => {
                handlers::finalize_campaign(state, host, config, amount, payload)
            }
            Operation::ClaimDividends => {
                handlers::claim_dividends(state, host, config, source, amount)
            }
            Operation::BuyShares => handlers::buy_shares(state, host, config, source, amount),
            Operation::Contribute(payload) => {
                handlers::contribute(state, host, config, source, amount, payload)
            }
        };
        result.into()
    }
}
