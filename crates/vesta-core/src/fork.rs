//! Irregular state changes at fork blocks

use crate::config::DaoConfig;
use vesta_primitives::U256;
use vesta_state::StateLedger;

/// Move the whole balance of every drain-list account into the refund contract
pub fn apply_dao_hard_fork<S: StateLedger + ?Sized>(state: &mut S, dao: &DaoConfig) {
    let mut total = U256::zero();
    for address in &dao.drain_list {
        let balance = state.balance(address);
        state.add_balance(&dao.refund_contract, balance);
        state.set_balance(address, U256::zero());
        total = total.saturating_add(balance);
    }
    tracing::debug!(
        "DAO fork moved {} wei from {} accounts to {}",
        total,
        dao.drain_list.len(),
        dao.refund_contract
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use vesta_primitives::Address;
    use vesta_state::{Account, MemoryState};

    #[test]
    fn test_drain_into_refund_contract() {
        let drained = [Address::from_bytes([1; 20]), Address::from_bytes([2; 20])];
        let refund = Address::from_bytes([9; 20]);
        let mut state = MemoryState::new();
        state.insert_account(drained[0], Account::with_balance(U256::from(100u64)));
        state.insert_account(drained[1], Account::with_balance(U256::from(23u64)));
        state.insert_account(refund, Account::with_balance(U256::from(1u64)));

        let dao = DaoConfig {
            drain_list: drained.to_vec(),
            refund_contract: refund,
        };
        apply_dao_hard_fork(&mut state, &dao);

        assert_eq!(state.balance(&drained[0]), U256::zero());
        assert_eq!(state.balance(&drained[1]), U256::zero());
        assert_eq!(state.balance(&refund), U256::from(124u64));
    }

    #[test]
    fn test_missing_accounts_are_noop() {
        let mut state = MemoryState::new();
        let dao = DaoConfig {
            drain_list: vec![Address::from_bytes([3; 20])],
            refund_contract: Address::from_bytes([4; 20]),
        };
        apply_dao_hard_fork(&mut state, &dao);
        assert_eq!(state.balance(&dao.refund_contract), U256::zero());
    }
}
