//! Internal transactions: the edges of a transaction's call graph

use crate::transaction::Transaction;
use bytes::Bytes;
use rlp::RlpStream;
use std::fmt;
use vesta_crypto::keccak256;
use vesta_primitives::{Address, H256, U256};

/// SELFDESTRUCT opcode, first payload byte of a suicide entry
pub const SELFDESTRUCT_OPCODE: u8 = 0xff;

/// How an internal transaction was produced
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InternalKind {
    /// CALL
    Call,
    /// STATICCALL
    StaticCall,
    /// CALLCODE
    CallCode,
    /// DELEGATECALL
    DelegateCall,
    /// CREATE
    Create,
    /// SELFDESTRUCT
    Suicide,
}

impl InternalKind {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            InternalKind::Call => "call",
            InternalKind::StaticCall => "staticcall",
            InternalKind::CallCode => "callcode",
            InternalKind::DelegateCall => "delegatecall",
            InternalKind::Create => "create",
            InternalKind::Suicide => "suicide",
        }
    }
}

impl fmt::Display for InternalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value or control transfer nested inside a top-level transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InternalTransaction {
    tx: Transaction,
    /// Frame that initiated the transfer
    pub sender: Address,
    /// Hash of the enclosing top-level transaction
    pub parent_hash: H256,
    /// Call depth at which the transfer happened
    pub depth: u64,
    /// Position in creation order within the top-level transaction
    pub index: u64,
    /// Call type
    pub kind: InternalKind,
    /// Set when the producing frame was rolled back
    pub rejected: bool,
}

impl InternalTransaction {
    /// New entry; parent hash, depth and index are filled in by the recorder
    pub fn new(tx: Transaction, sender: Address, kind: InternalKind) -> Self {
        Self {
            tx,
            sender,
            parent_hash: H256::ZERO,
            depth: 0,
            index: 0,
            kind,
            rejected: false,
        }
    }

    /// Entry for a SELFDESTRUCT moving `value` from `contract` to `beneficiary`
    pub fn suicide(
        nonce: u64,
        gas_price: U256,
        gas: u64,
        contract: Address,
        beneficiary: Address,
        value: U256,
    ) -> Self {
        let mut payload = Vec::with_capacity(1 + Address::LEN);
        payload.push(SELFDESTRUCT_OPCODE);
        payload.extend_from_slice(beneficiary.as_bytes());
        let tx = Transaction::new(nonce, beneficiary, value, gas, gas_price, payload);
        Self::new(tx, contract, InternalKind::Suicide)
    }

    /// Underlying transaction
    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    /// Nonce
    pub fn nonce(&self) -> u64 {
        self.tx.nonce()
    }

    /// Gas price
    pub fn gas_price(&self) -> U256 {
        self.tx.gas_price()
    }

    /// Gas limit
    pub fn gas_limit(&self) -> u64 {
        self.tx.gas_limit()
    }

    /// Recipient
    pub fn to(&self) -> Option<Address> {
        self.tx.to()
    }

    /// Transferred value
    pub fn value(&self) -> U256 {
        self.tx.value()
    }

    /// Payload
    pub fn payload(&self) -> &Bytes {
        self.tx.payload()
    }

    /// Mark as rolled back
    pub fn reject(&mut self) {
        self.rejected = true;
    }

    /// Keccak-256 over the transaction fields and all provenance fields
    pub fn hash(&self) -> H256 {
        let data = self.tx.data();
        let mut s = RlpStream::new_list(12);
        s.append(&data.nonce);
        s.append(&data.gas_price);
        s.append(&data.gas_limit);
        match &data.to {
            Some(to) => s.append(to),
            None => s.append_empty_data(),
        };
        s.append(&data.value);
        s.append(&data.payload.to_vec());
        s.append(&self.sender);
        s.append(&self.parent_hash);
        s.append(&self.depth);
        s.append(&self.index);
        s.append(&self.kind.as_str().as_bytes().to_vec());
        s.append(&self.rejected);
        keccak256(&s.out())
    }
}
