//! Initialize handler.

use crate::domain::entities::LedgerState;
use crate::domain::value_objects::Identity;
use crate::errors::Rejection;
use crate::events::LedgerEvent;
use crate::protocol::InitializePayload;

/// Fixes the deployment configuration and makes `source` the owner.
///
/// Accepted once per deployment.
///
/// # Errors
///
/// `AlreadyInitialized` on any later attempt.
pub fn initialize(
    state: &mut LedgerState,
    source: Identity,
    payload: InitializePayload,
) -> Result<LedgerEvent, Rejection> {
    if state.initialized {
        return Err(Rejection::AlreadyInitialized);
    }

    state.owner = source;
    state.ipo_end_epoch = payload.ipo_end_epoch;
    state.ipo_share_price = payload.ipo_share_price;
    state.creation_fee = payload.creation_fee;
    state.total_shares_burned = 0;
    state.initialized = true;

    Ok(LedgerEvent::Initialized {
        owner: source,
        ipo_end_epoch: payload.ipo_end_epoch,
        ipo_share_price: payload.ipo_share_price,
        creation_fee: payload.creation_fee,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: InitializePayload = InitializePayload {
        ipo_end_epoch: 1000,
        ipo_share_price: 1_000_000,
        creation_fee: 500_000_000,
    };

    #[test]
    fn test_initialize_sets_configuration() {
        let mut state = LedgerState::default();
        let owner = Identity::new([1; 32]);
        let event = initialize(&mut state, owner, PAYLOAD).unwrap();

        assert!(state.initialized);
        assert_eq!(state.owner, owner);
        assert_eq!(state.ipo_end_epoch, 1000);
        assert_eq!(state.ipo_share_price, 1_000_000);
        assert_eq!(state.creation_fee, 500_000_000);
        assert!(matches!(event, LedgerEvent::Initialized { owner: o, .. } if o == owner));
    }

    #[test]
    fn test_second_initialize_changes_nothing() {
        let mut state = LedgerState::default();
        initialize(&mut state, Identity::new([1; 32]), PAYLOAD).unwrap();
        let before = state.clone();

        let other = InitializePayload {
            ipo_end_epoch: 1,
            ipo_share_price: 1,
            creation_fee: 1,
        };
        let result = initialize(&mut state, Identity::new([2; 32]), other);

        assert_eq!(result, Err(Rejection::AlreadyInitialized));
        assert_eq!(state, before);
    }
}
