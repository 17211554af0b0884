//! State ledger interface

use bytes::Bytes;
use vesta_primitives::{Address, H256, U256};
use vesta_types::Log;

/// Mutable world state as seen by transaction execution.
///
/// Operations are infallible: missing accounts read as empty and writes
/// create them. `snapshot`/`restore` capture and roll back the whole
/// ledger, including logs and the refund counter.
pub trait StateLedger {
    /// Rollback handle
    type Snapshot: Clone;

    /// Balance of `address`
    fn balance(&self, address: &Address) -> U256;

    /// Credit `amount`
    fn add_balance(&mut self, address: &Address, amount: U256);

    /// Debit `amount`, saturating at zero
    fn sub_balance(&mut self, address: &Address, amount: U256);

    /// Overwrite the balance
    fn set_balance(&mut self, address: &Address, amount: U256);

    /// Nonce of `address`
    fn nonce(&self, address: &Address) -> u64;

    /// Overwrite the nonce
    fn set_nonce(&mut self, address: &Address, nonce: u64);

    /// Code of `address`
    fn code(&self, address: &Address) -> Bytes;

    /// Store code
    fn set_code(&mut self, address: &Address, code: Bytes);

    /// Storage slot value, zero when unset
    fn storage(&self, address: &Address, key: &H256) -> H256;

    /// Write a storage slot; zero clears it
    fn set_storage(&mut self, address: &Address, key: H256, value: H256);

    /// Whether the account is present
    fn exists(&self, address: &Address) -> bool;

    /// Whether the account is absent or empty (EIP-161)
    fn is_empty(&self, address: &Address) -> bool;

    /// Mark for deletion at the end of the transaction and zero the balance
    fn suicide(&mut self, address: &Address) -> bool;

    /// Whether `suicide` was called in the current transaction
    fn has_suicided(&self, address: &Address) -> bool;

    /// Add to the gas refund counter
    fn add_refund(&mut self, gas: u64);

    /// Current gas refund counter
    fn refund(&self) -> u64;

    /// Record a log, stamping tx hash, tx index, block hash and log index
    fn add_log(&mut self, log: Log);

    /// Logs recorded for `tx_hash`
    fn logs(&self, tx_hash: &H256) -> Vec<Log>;

    /// Bind the transaction about to execute
    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize);

    /// Hash of the bound transaction
    fn tx_hash(&self) -> H256;

    /// Index of the bound transaction
    fn tx_index(&self) -> usize;

    /// Hash of the bound block
    fn block_hash(&self) -> H256;

    /// Finalise and compute the current state root
    fn intermediate_root(&mut self, delete_empty: bool) -> H256;

    /// Remove suicided accounts (and touched empty ones when `delete_empty`)
    fn finalise(&mut self, delete_empty: bool);

    /// Capture the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Roll back to a captured state
    fn restore(&mut self, snapshot: Self::Snapshot);
}
