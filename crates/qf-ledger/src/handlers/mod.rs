//! # Request Handlers
//!
//! One function per operation. Handlers take the aggregate, the host and the
//! configuration explicitly and return the resulting event or the failed guard.
//!
//! | Handler | Operation |
//! |---------|-----------|
//! | `initialize` | Initialize |
//! | `create_campaign` | CreateCampaign |
//! | `contribute` | Contribute (implicit) |
//! | `finalize_campaign` | FinalizeCampaign |
//! | `buy_shares` | IPO buy-in (implicit) |
//! | `claim_dividends` | ClaimDividends |

pub mod campaigns;
pub mod initialize;
pub mod shares;

pub use campaigns::{contribute, create_campaign, finalize_campaign};
pub use initialize::initialize;
pub use shares::{buy_shares, claim_dividends};
