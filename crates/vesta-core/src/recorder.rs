//! Internal transaction recording

use bytes::Bytes;
use vesta_primitives::{Address, H256, U256};
use vesta_types::{InternalKind, InternalTransaction, Transaction};

/// Ordered, capped list of the internal transactions of one top-level
/// transaction.
///
/// Entries are appended in the order frames are entered, so indices
/// follow a pre-order walk of the call tree and every frame's
/// descendants occupy a contiguous run after its own entry. Past the
/// limit registrations are dropped without error.
#[derive(Debug, Clone)]
pub struct InternalTxRecorder {
    entries: Vec<InternalTransaction>,
    limit: usize,
    gas_price: U256,
    dropped: usize,
}

impl InternalTxRecorder {
    /// Recorder keeping at most `limit` entries priced at `gas_price`
    pub fn new(limit: usize, gas_price: U256) -> Self {
        Self {
            entries: Vec::new(),
            limit,
            gas_price,
            dropped: 0,
        }
    }

    /// Record a CALL from `from` to `to`
    #[allow(clippy::too_many_arguments)]
    pub fn register_call(
        &mut self,
        nonce: u64,
        gas: u64,
        from: Address,
        to: Address,
        value: U256,
        input: Bytes,
        depth: u64,
    ) -> Option<u64> {
        let tx = Transaction::new(nonce, to, value, gas, self.gas_price, input);
        self.push(InternalTransaction::new(tx, from, InternalKind::Call), depth)
    }

    /// Record a STATICCALL; static calls carry no value
    pub fn register_static_call(
        &mut self,
        nonce: u64,
        gas: u64,
        from: Address,
        to: Address,
        input: Bytes,
        depth: u64,
    ) -> Option<u64> {
        let tx = Transaction::new(nonce, to, U256::zero(), gas, self.gas_price, input);
        self.push(InternalTransaction::new(tx, from, InternalKind::StaticCall), depth)
    }

    /// Record a CALLCODE by `contract` running the code of `code_address`
    #[allow(clippy::too_many_arguments)]
    pub fn register_call_code(
        &mut self,
        nonce: u64,
        gas: u64,
        contract: Address,
        code_address: Address,
        value: U256,
        input: Bytes,
        depth: u64,
    ) -> Option<u64> {
        let tx = Transaction::new(nonce, code_address, value, gas, self.gas_price, input);
        self.push(InternalTransaction::new(tx, contract, InternalKind::CallCode), depth)
    }

    /// Record a DELEGATECALL by `contract` into the code of `code_address`
    #[allow(clippy::too_many_arguments)]
    pub fn register_delegate_call(
        &mut self,
        nonce: u64,
        gas: u64,
        contract: Address,
        code_address: Address,
        value: U256,
        input: Bytes,
        depth: u64,
    ) -> Option<u64> {
        let tx = Transaction::new(nonce, code_address, value, gas, self.gas_price, input);
        self.push(InternalTransaction::new(tx, contract, InternalKind::DelegateCall), depth)
    }

    /// Record a CREATE of `contract` by `creator`
    #[allow(clippy::too_many_arguments)]
    pub fn register_create(
        &mut self,
        nonce: u64,
        gas: u64,
        creator: Address,
        contract: Address,
        value: U256,
        init_code: Bytes,
        depth: u64,
    ) -> Option<u64> {
        let tx = Transaction::new(nonce, contract, value, gas, self.gas_price, init_code);
        self.push(InternalTransaction::new(tx, creator, InternalKind::Create), depth)
    }

    /// Record a SELFDESTRUCT sending `value` from `contract` to `beneficiary`
    pub fn register_suicide(
        &mut self,
        nonce: u64,
        gas: u64,
        contract: Address,
        beneficiary: Address,
        value: U256,
        depth: u64,
    ) -> Option<u64> {
        let entry = InternalTransaction::suicide(nonce, self.gas_price, gas, contract, beneficiary, value);
        self.push(entry, depth)
    }

    /// Append an entry built elsewhere, keeping its depth
    pub fn record(&mut self, entry: InternalTransaction) -> Option<u64> {
        let depth = entry.depth;
        self.push(entry, depth)
    }

    fn push(&mut self, mut entry: InternalTransaction, depth: u64) -> Option<u64> {
        if self.entries.len() >= self.limit {
            self.dropped += 1;
            tracing::trace!("Dropped {} internal transaction: limit {} reached", entry.kind, self.limit);
            return None;
        }
        let index = self.entries.len() as u64;
        entry.depth = depth;
        entry.index = index;
        self.entries.push(entry);
        Some(index)
    }

    /// Mark entry `start` and everything recorded after it rejected
    pub fn reject_from(&mut self, start: usize) {
        if let Some(tail) = self.entries.get_mut(start..) {
            for entry in tail {
                entry.reject();
            }
        }
    }

    /// Stamp the enclosing transaction hash on every entry
    pub fn set_parent_hash(&mut self, hash: H256) {
        for entry in &mut self.entries {
            entry.parent_hash = hash;
        }
    }

    /// Entries in index order
    pub fn internal_transactions(&self) -> &[InternalTransaction] {
        &self.entries
    }

    /// Take the entries in index order
    pub fn into_internal_transactions(self) -> Vec<InternalTransaction> {
        self.entries
    }

    /// Number of kept entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was kept
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of registrations dropped at the limit
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
