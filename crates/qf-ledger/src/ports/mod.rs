//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the ledger core and its host.
//!
//! - **Driving Ports (Inbound)**: `CrowdfundingApi`
//! - **Driven Ports (Outbound)**: `LedgerHost`, `StateAccess`, `RequestSource`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
