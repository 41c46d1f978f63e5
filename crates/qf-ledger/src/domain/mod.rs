//! # Domain Layer (Inner Hexagon)
//!
//! Pure ledger logic: entities, collections, the fee engine, and invariants.
//! NO I/O, NO host calls.
//!
//! - Dependencies point INWARD only (handlers and adapters depend on this, not vice versa).

pub mod entities;
pub mod fees;
pub mod invariants;
pub mod ledger;
pub mod registry;
pub mod value_objects;

pub use entities::*;
pub use fees::*;
pub use invariants::*;
pub use ledger::*;
pub use registry::*;
pub use value_objects::*;
