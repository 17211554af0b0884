//! Transaction receipt types

use bytes::Bytes;
use rlp::{Encodable, RlpStream};
use vesta_primitives::{Address, H256};

use crate::block::Bloom;

/// Transaction execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    /// Transaction failed
    Failure = 0,
    /// Transaction succeeded
    Success = 1,
}

impl From<bool> for TxStatus {
    fn from(success: bool) -> Self {
        if success {
            TxStatus::Success
        } else {
            TxStatus::Failure
        }
    }
}

impl From<TxStatus> for bool {
    fn from(status: TxStatus) -> Self {
        match status {
            TxStatus::Success => true,
            TxStatus::Failure => false,
        }
    }
}

/// Consensus outcome field of a receipt, which depends on the fork
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptOutcome {
    /// Intermediate state root (pre-Byzantium)
    Root(H256),
    /// Status bit (Byzantium onwards)
    Status(TxStatus),
}

/// Log entry emitted during transaction execution
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Log {
    /// Contract address that emitted the log
    pub address: Address,
    /// Log topics (indexed parameters)
    pub topics: Vec<H256>,
    /// Log data (non-indexed parameters)
    pub data: Bytes,
    /// Block in which the log was emitted
    pub block_number: u64,
    /// Transaction that emitted the log
    pub tx_hash: H256,
    /// Index of that transaction in the block
    pub tx_index: usize,
    /// Hash of the block
    pub block_hash: H256,
    /// Index of the log in the block
    pub index: usize,
}

impl Log {
    /// Create a log without block context; the ledger stamps it on `add_log`
    pub fn new(address: Address, topics: Vec<H256>, data: Bytes) -> Self {
        Self {
            address,
            topics,
            data,
            ..Default::default()
        }
    }

    /// Get the first topic (usually the event signature)
    pub fn topic0(&self) -> Option<&H256> {
        self.topics.first()
    }

    /// Create bloom filter for this log
    pub fn bloom(&self) -> Bloom {
        let mut bloom = Bloom::default();
        bloom.accrue(self.address.as_bytes());
        for topic in &self.topics {
            bloom.accrue(topic.as_bytes());
        }
        bloom
    }
}

impl Encodable for Log {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3);
        s.append(&self.address);
        s.append_list::<H256, H256>(&self.topics);
        s.append(&self.data.to_vec());
    }
}

/// Transaction receipt
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Receipt {
    /// Post-state root or status, depending on the fork
    pub outcome: ReceiptOutcome,
    /// Cumulative gas used in the block up to this transaction
    pub cumulative_gas_used: u64,
    /// Gas used by this transaction
    pub gas_used: u64,
    /// Hash of the transaction
    pub tx_hash: H256,
    /// Contract address created (if contract creation tx)
    pub contract_address: Option<Address>,
    /// Logs emitted by this transaction
    pub logs: Vec<Log>,
    /// Bloom filter for the logs
    pub logs_bloom: Bloom,
    /// Hash of the containing block
    pub block_hash: H256,
    /// Number of the containing block
    pub block_number: u64,
    /// Index of the transaction in the block
    pub transaction_index: usize,
}

impl Receipt {
    /// Create a receipt with only the consensus fields set
    pub fn new(outcome: ReceiptOutcome, cumulative_gas_used: u64) -> Self {
        Self {
            outcome,
            cumulative_gas_used,
            gas_used: 0,
            tx_hash: H256::ZERO,
            contract_address: None,
            logs: Vec::new(),
            logs_bloom: Bloom::default(),
            block_hash: H256::ZERO,
            block_number: 0,
            transaction_index: 0,
        }
    }

    /// Attach logs and recompute the bloom
    pub fn with_logs(mut self, logs: Vec<Log>) -> Self {
        let mut bloom = Bloom::default();
        for log in &logs {
            bloom.accrue_bloom(&log.bloom());
        }
        self.logs = logs;
        self.logs_bloom = bloom;
        self
    }

    /// Status, when the receipt carries one
    pub fn status(&self) -> Option<TxStatus> {
        match self.outcome {
            ReceiptOutcome::Status(status) => Some(status),
            ReceiptOutcome::Root(_) => None,
        }
    }

    /// Intermediate root, when the receipt carries one
    pub fn post_state(&self) -> Option<H256> {
        match self.outcome {
            ReceiptOutcome::Root(root) => Some(root),
            ReceiptOutcome::Status(_) => None,
        }
    }

    /// True unless the receipt carries a failure status
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ReceiptOutcome::Status(TxStatus::Failure))
    }
}

impl Encodable for Receipt {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4);
        match self.outcome {
            ReceiptOutcome::Root(root) => s.append(&root),
            ReceiptOutcome::Status(TxStatus::Success) => s.append(&1u8),
            ReceiptOutcome::Status(TxStatus::Failure) => s.append_empty_data(),
        };
        s.append(&self.cumulative_gas_used);
        s.append(&self.logs_bloom);
        s.append_list::<Log, Log>(&self.logs);
    }
}

/// Union of the blooms of `receipts`
pub fn create_bloom(receipts: &[Receipt]) -> Bloom {
    let mut bloom = Bloom::default();
    for receipt in receipts {
        bloom.accrue_bloom(&receipt.logs_bloom);
    }
    bloom
}
