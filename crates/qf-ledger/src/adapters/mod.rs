//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports. Used by tests and by tooling that
//! replays requests outside a real host.

pub mod host_adapter;
pub mod state_adapter;

pub use host_adapter::*;
pub use state_adapter::*;
