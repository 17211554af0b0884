//! Price-then-nonce ordering

use crate::error::{TxPoolError, TxPoolResult};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, VecDeque};
use vesta_primitives::{Address, H256, U256};
use vesta_types::{Signer, Transaction};

/// Transaction with its recovered sender
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PooledTransaction {
    /// The signed transaction
    pub tx: Transaction,
    /// Recovered sender address
    pub sender: Address,
}

impl PooledTransaction {
    /// Pair a transaction with an already known sender
    pub fn new(tx: Transaction, sender: Address) -> Self {
        Self { tx, sender }
    }

    /// Recover the sender under `signer`
    pub fn recover(tx: Transaction, signer: &Signer) -> TxPoolResult<Self> {
        let sender = tx
            .sender(signer)
            .map_err(|e| TxPoolError::RecoveryFailed(format!("{}: {}", tx.hash(), e)))?;
        Ok(Self { tx, sender })
    }

    /// Get nonce
    pub fn nonce(&self) -> u64 {
        self.tx.nonce()
    }

    /// Get gas price
    pub fn gas_price(&self) -> U256 {
        self.tx.gas_price()
    }

    /// Get transaction hash
    pub fn hash(&self) -> H256 {
        self.tx.hash()
    }
}

/// Head of one sender's queue
struct Head {
    tx: PooledTransaction,
    /// Position of the sender's first transaction in the input
    rank: usize,
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Head {}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: highest price first, then the sender seen first
        self.tx
            .gas_price()
            .cmp(&other.tx.gas_price())
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

/// Incremental price-and-nonce ordering over a fixed candidate set.
///
/// Every sender contributes only its lowest-nonce remaining transaction to
/// the heap, so a sender's transactions are always yielded in nonce order.
pub struct TransactionsByPriceAndNonce {
    queues: Vec<VecDeque<PooledTransaction>>,
    heads: BinaryHeap<Head>,
}

impl TransactionsByPriceAndNonce {
    /// Group `txs` by sender and seed the heap with each sender's head
    pub fn new(txs: Vec<PooledTransaction>) -> Self {
        let mut ranks: HashMap<Address, usize> = HashMap::new();
        let mut groups: Vec<Vec<PooledTransaction>> = Vec::new();
        for tx in txs {
            let rank = *ranks.entry(tx.sender).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[rank].push(tx);
        }

        let mut queues = Vec::with_capacity(groups.len());
        let mut heads = BinaryHeap::with_capacity(groups.len());
        for (rank, mut group) in groups.into_iter().enumerate() {
            group.sort_by_key(PooledTransaction::nonce);
            let mut queue = VecDeque::from(group);
            if let Some(tx) = queue.pop_front() {
                heads.push(Head { tx, rank });
            }
            queues.push(queue);
        }

        tracing::trace!("Seeded ordering with {} senders", heads.len());
        Self { queues, heads }
    }

    /// Next transaction without consuming it
    pub fn peek(&self) -> Option<&PooledTransaction> {
        self.heads.peek().map(|head| &head.tx)
    }

    /// Drop the current head and replace it with its sender's next transaction
    pub fn shift(&mut self) {
        if let Some(head) = self.heads.pop() {
            self.advance(head.rank);
        }
    }

    /// Drop the current head together with the rest of its sender's transactions
    pub fn pop(&mut self) {
        if let Some(head) = self.heads.pop() {
            self.queues[head.rank].clear();
        }
    }

    /// Whether every transaction has been yielded or dropped
    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }

    fn advance(&mut self, rank: usize) {
        if let Some(tx) = self.queues[rank].pop_front() {
            self.heads.push(Head { tx, rank });
        }
    }
}

impl Iterator for TransactionsByPriceAndNonce {
    type Item = PooledTransaction;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.heads.pop()?;
        self.advance(head.rank);
        Some(head.tx)
    }
}

/// Linearize `txs` by descending gas price while keeping per-sender nonce order
pub fn order_by_price_and_nonce(txs: Vec<PooledTransaction>) -> Vec<PooledTransaction> {
    TransactionsByPriceAndNonce::new(txs).collect()
}

/// Recover every sender under `signer`, then order
pub fn sort_by_price_and_nonce(txs: Vec<Transaction>, signer: &Signer) -> TxPoolResult<Vec<Transaction>> {
    let pooled = txs
        .into_iter()
        .map(|tx| PooledTransaction::recover(tx, signer))
        .collect::<TxPoolResult<Vec<_>>>()?;
    tracing::debug!("Ordering {} transactions by price and nonce", pooled.len());
    Ok(order_by_price_and_nonce(pooled)
        .into_iter()
        .map(|pooled| pooled.tx)
        .collect())
}
