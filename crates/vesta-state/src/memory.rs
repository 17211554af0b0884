//! In-memory ledger with copy-on-write snapshots

use crate::account::Account;
use crate::traits::StateLedger;
use bytes::Bytes;
use rlp::RlpStream;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use vesta_crypto::keccak256;
use vesta_primitives::{Address, H256, U256};
use vesta_types::Log;

#[derive(Clone, Debug, Default)]
struct Inner {
    accounts: BTreeMap<Address, Account>,
    logs: BTreeMap<H256, Vec<Log>>,
    log_size: usize,
    refund: u64,
    touched: BTreeSet<Address>,
    suicided: BTreeSet<Address>,
    tx_hash: H256,
    tx_index: usize,
    block_hash: H256,
}

/// Snapshot of a [`MemoryState`]
#[derive(Clone, Debug)]
pub struct MemorySnapshot(Arc<Inner>);

/// In-memory ledger.
///
/// The state lives behind an `Arc`; taking a snapshot shares it and the
/// next write clones it (`Arc::make_mut`).
#[derive(Clone, Debug, Default)]
pub struct MemoryState {
    inner: Arc<Inner>,
}

impl MemoryState {
    /// Empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an account
    pub fn insert_account(&mut self, address: Address, account: Account) {
        self.inner_mut().accounts.insert(address, account);
    }

    /// Account record, if present
    pub fn account(&self, address: &Address) -> Option<&Account> {
        self.inner.accounts.get(address)
    }

    /// Iterate over all accounts in address order
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Account)> {
        self.inner.accounts.iter()
    }

    /// Number of accounts
    pub fn len(&self) -> usize {
        self.inner.accounts.len()
    }

    /// No accounts at all
    pub fn is_empty_state(&self) -> bool {
        self.inner.accounts.is_empty()
    }

    fn inner_mut(&mut self) -> &mut Inner {
        Arc::make_mut(&mut self.inner)
    }

    fn account_mut(&mut self, address: &Address) -> &mut Account {
        let inner = self.inner_mut();
        inner.touched.insert(*address);
        inner.accounts.entry(*address).or_default()
    }

    fn root(&self) -> H256 {
        let mut s = RlpStream::new_list(self.inner.accounts.len());
        for (address, account) in &self.inner.accounts {
            s.begin_list(5);
            s.append(address);
            s.append(&account.nonce);
            s.append(&account.balance);
            s.append(&account.code_hash());
            s.append(&account.storage_root());
        }
        keccak256(&s.out())
    }
}

impl StateLedger for MemoryState {
    type Snapshot = MemorySnapshot;

    fn balance(&self, address: &Address) -> U256 {
        self.account(address).map(|a| a.balance).unwrap_or_default()
    }

    fn add_balance(&mut self, address: &Address, amount: U256) {
        let account = self.account_mut(address);
        account.balance = account.balance.saturating_add(amount);
    }

    fn sub_balance(&mut self, address: &Address, amount: U256) {
        let account = self.account_mut(address);
        account.balance = account.balance.saturating_sub(amount);
    }

    fn set_balance(&mut self, address: &Address, amount: U256) {
        self.account_mut(address).balance = amount;
    }

    fn nonce(&self, address: &Address) -> u64 {
        self.account(address).map(|a| a.nonce).unwrap_or(0)
    }

    fn set_nonce(&mut self, address: &Address, nonce: u64) {
        self.account_mut(address).nonce = nonce;
    }

    fn code(&self, address: &Address) -> Bytes {
        self.account(address).map(|a| a.code.clone()).unwrap_or_default()
    }

    fn set_code(&mut self, address: &Address, code: Bytes) {
        self.account_mut(address).code = code;
    }

    fn storage(&self, address: &Address, key: &H256) -> H256 {
        self.account(address)
            .and_then(|a| a.storage.get(key).copied())
            .unwrap_or_default()
    }

    fn set_storage(&mut self, address: &Address, key: H256, value: H256) {
        let account = self.account_mut(address);
        if value.is_zero() {
            account.storage.remove(&key);
        } else {
            account.storage.insert(key, value);
        }
    }

    fn exists(&self, address: &Address) -> bool {
        self.inner.accounts.contains_key(address)
    }

    fn is_empty(&self, address: &Address) -> bool {
        self.account(address).map(Account::is_empty).unwrap_or(true)
    }

    fn suicide(&mut self, address: &Address) -> bool {
        if !self.exists(address) {
            return false;
        }
        let inner = self.inner_mut();
        inner.suicided.insert(*address);
        if let Some(account) = inner.accounts.get_mut(address) {
            account.balance = U256::zero();
        }
        true
    }

    fn has_suicided(&self, address: &Address) -> bool {
        self.inner.suicided.contains(address)
    }

    fn add_refund(&mut self, gas: u64) {
        let inner = self.inner_mut();
        inner.refund = inner.refund.saturating_add(gas);
    }

    fn refund(&self) -> u64 {
        self.inner.refund
    }

    fn add_log(&mut self, mut log: Log) {
        let inner = self.inner_mut();
        log.tx_hash = inner.tx_hash;
        log.tx_index = inner.tx_index;
        log.block_hash = inner.block_hash;
        log.index = inner.log_size;
        inner.log_size += 1;
        inner.logs.entry(inner.tx_hash).or_default().push(log);
    }

    fn logs(&self, tx_hash: &H256) -> Vec<Log> {
        self.inner.logs.get(tx_hash).cloned().unwrap_or_default()
    }

    fn prepare(&mut self, tx_hash: H256, block_hash: H256, tx_index: usize) {
        let inner = self.inner_mut();
        inner.tx_hash = tx_hash;
        inner.block_hash = block_hash;
        inner.tx_index = tx_index;
        inner.refund = 0;
    }

    fn tx_hash(&self) -> H256 {
        self.inner.tx_hash
    }

    fn tx_index(&self) -> usize {
        self.inner.tx_index
    }

    fn block_hash(&self) -> H256 {
        self.inner.block_hash
    }

    fn intermediate_root(&mut self, delete_empty: bool) -> H256 {
        self.finalise(delete_empty);
        self.root()
    }

    fn finalise(&mut self, delete_empty: bool) {
        let inner = self.inner_mut();
        let suicided = std::mem::take(&mut inner.suicided);
        let touched = std::mem::take(&mut inner.touched);
        for address in &suicided {
            tracing::trace!("Removing self-destructed account {}", address);
            inner.accounts.remove(address);
        }
        if delete_empty {
            for address in &touched {
                if inner.accounts.get(address).map(Account::is_empty).unwrap_or(false) {
                    tracing::trace!("Removing touched empty account {}", address);
                    inner.accounts.remove(address);
                }
            }
        }
        inner.refund = 0;
    }

    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot(Arc::clone(&self.inner))
    }

    fn restore(&mut self, snapshot: MemorySnapshot) {
        self.inner = snapshot.0;
    }
}
