//! # QF-Campaign
//!
//! Client-side helper that turns human campaign parameters into a create-campaign
//! request for the QuFunding ledger: the encoded payload and the amount to attach.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod identity;
pub mod request;

pub use identity::{decode_identity, IdentityError, IDENTITY_CHARS};
pub use request::{
    BuildError, CampaignSpec, PreparedRequest, CREATE_CAMPAIGN_INPUT_TYPE, DEFAULT_CREATION_FEE,
    DEFAULT_EPOCHS_PER_DAY,
};
