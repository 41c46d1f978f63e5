//! # QuFunding Ledger Core
//!
//! Transaction-processing core of a crowdfunding ledger: campaigns and contributions,
//! an ownership-share registry fed by an IPO, and a dividend treasury funded by
//! platform fees.
//!
//! ## Purpose
//!
//! The host delivers fully validated requests one at a time. Each request is classified,
//! routed to exactly one handler, and either mutates the persistent state (possibly
//! issuing value transfers through the host) or is discarded with no effect.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Capacity ceilings (campaigns, contributors, shareholders) | `domain/invariants.rs` - `check_capacity_invariant()` |
//! | One entry per identity (registry, contributions) | `domain/invariants.rs` - `check_unique_identity_invariant()` |
//! | `total_shares_issued <= max_shares` | `domain/invariants.rs` - `check_share_invariant()` |
//! | `raised` equals the sum of contributions | `domain/invariants.rs` - `check_raised_invariant()` |
//! | Campaign state leaves `Active` once | `handlers/campaigns.rs` - `finalize_campaign()` |
//! | Initialize accepted once | `handlers/initialize.rs` - `initialize()` |
//!
//! ## Operations
//!
//! | Operation | Trigger | Handler |
//! |-----------|---------|---------|
//! | Initialize | opcode 0, 25 bytes, uninitialized only | `handlers::initialize` |
//! | CreateCampaign | opcode 1, 49 bytes | `handlers::create_campaign` |
//! | FinalizeCampaign | opcode 2, 3 bytes | `handlers::finalize_campaign` |
//! | ClaimDividends | opcode 3, 1 byte | `handlers::claim_dividends` |
//! | IPO buy-in | amount > 0, empty payload | `handlers::buy_shares` |
//! | Contribute | amount > 0, 2-byte campaign index | `handlers::contribute` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `LedgerHost` | Epoch clock and value transfer |
//! | `StateAccess` | Persistent `LedgerState` |
//! | `RequestSource` | Request delivery |
//!
//! ## Usage Example
//!
//! ```
//! use qf_ledger::prelude::*;
//!
//! let mut service = create_test_service();
//! let init = Request::initialize(
//!     Identity::new([1; 32]),
//!     InitializePayload { ipo_end_epoch: 1000, ipo_share_price: QU, creation_fee: 500 * QU },
//! );
//! assert!(service.handle_request(&init).is_accepted());
//!
//! let outcome = service.handle_request(&Request::buy_shares(Identity::new([2; 32]), 2 * QU));
//! assert!(outcome.is_accepted());
//! assert_eq!(service.state().total_shares_issued, 2 * QU);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod ports;
pub mod protocol;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        Campaign, CampaignState, Contribution, LedgerState, Phase, Shareholder,
    };
    pub use crate::domain::ledger::CampaignLedger;
    pub use crate::domain::registry::ShareholderRegistry;

    // Value objects
    pub use crate::domain::value_objects::{mul_div, Amount, CampaignId, Epoch, Identity, QU};

    // Fee engine
    pub use crate::domain::fees::{
        campaign_fee, process_platform_fee, split_fee, FeeReceipt, FeeSplit,
    };

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, InvariantCheckResult, InvariantViolation,
    };

    // Configuration
    pub use crate::config::{ConfigError, LedgerConfig};

    // Protocol
    pub use crate::protocol::{
        classify, ClaimDividendsPayload, ContributionPayload, CreateCampaignPayload,
        FinalizeCampaignPayload, InitializePayload, OpCode, Operation, Request,
    };

    // Ports
    pub use crate::ports::inbound::CrowdfundingApi;
    pub use crate::ports::outbound::{LedgerHost, RequestSource, StateAccess};

    // Events
    pub use crate::events::{LedgerEvent, Outcome, Transfer};

    // Errors
    pub use crate::errors::{PayloadError, Rejection};

    // Adapters
    pub use crate::adapters::{InMemoryHost, InMemoryState};

    // Dispatcher and service
    pub use crate::dispatcher::RequestDispatcher;
    pub use crate::service::{create_test_service, LedgerService, ServiceStats};
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const APP_NAME: &str = "QuFunding";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "QuFunding");
    }

    #[test]
    fn test_prelude_exports() {
        // Verify prelude exports compile
        use prelude::*;
        let _ = LedgerConfig::default();
        let _ = Identity::ZERO;
        let _ = create_test_service();
    }
}
