//! Block types

use bytes::Bytes;
use rlp::{Encodable, RlpStream};
use vesta_crypto::keccak256;
use vesta_primitives::{Address, H256, U256};

use crate::transaction::Transaction;

/// Keccak-256 of the empty RLP list, the uncle hash of an uncle-free block
pub const EMPTY_UNCLE_HASH: H256 = H256::from_bytes([
    0x1d, 0xcc, 0x4d, 0xe8, 0xde, 0xc7, 0x5d, 0x7a,
    0xab, 0x85, 0xb5, 0x67, 0xb6, 0xcc, 0xd4, 0x1a,
    0xd3, 0x12, 0x45, 0x1b, 0x94, 0x8a, 0x74, 0x13,
    0xf0, 0xa1, 0x42, 0xfd, 0x40, 0xd4, 0x93, 0x47,
]);

/// Logs bloom filter (2048 bits = 256 bytes)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bloom(pub [u8; 256]);

impl Default for Bloom {
    fn default() -> Self {
        Self([0u8; 256])
    }
}

impl Bloom {
    /// Empty bloom filter
    pub const ZERO: Bloom = Bloom([0u8; 256]);

    /// Check if bloom filter is empty
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&b| b == 0)
    }

    fn bits(input: &[u8]) -> [(usize, u8); 3] {
        let hash = keccak256(input);
        let bytes = hash.as_bytes();
        let mut out = [(0usize, 0u8); 3];
        for (i, slot) in out.iter_mut().enumerate() {
            let bit = ((bytes[i * 2] as usize) << 8 | bytes[i * 2 + 1] as usize) & 0x7FF;
            *slot = (255 - bit / 8, 1 << (bit % 8));
        }
        out
    }

    /// Add data to bloom filter
    pub fn accrue(&mut self, input: &[u8]) {
        for (byte, mask) in Self::bits(input) {
            self.0[byte] |= mask;
        }
    }

    /// Check if bloom might contain the input
    pub fn contains(&self, input: &[u8]) -> bool {
        Self::bits(input)
            .iter()
            .all(|(byte, mask)| self.0[*byte] & mask != 0)
    }

    /// Combine with another bloom filter (OR)
    pub fn accrue_bloom(&mut self, other: &Bloom) {
        for (dst, src) in self.0.iter_mut().zip(other.0.iter()) {
            *dst |= src;
        }
    }
}

impl Encodable for Bloom {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

/// Block header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Parent block hash
    pub parent_hash: H256,
    /// Hash of the uncle list
    pub uncle_hash: H256,
    /// Block proposer
    pub coinbase: Address,
    /// State root after executing the block
    pub state_root: H256,
    /// Transactions root
    pub tx_root: H256,
    /// Receipts root
    pub receipt_root: H256,
    /// Logs bloom filter
    pub bloom: Bloom,
    /// Difficulty
    pub difficulty: U256,
    /// Block number (height)
    pub number: u64,
    /// Gas limit for the block
    pub gas_limit: u64,
    /// Gas used by all transactions
    pub gas_used: u64,
    /// Block timestamp (Unix seconds)
    pub time: u64,
    /// Extra data
    pub extra: Bytes,
    /// Mix hash
    pub mix_hash: H256,
    /// Seal nonce
    pub nonce: u64,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            parent_hash: H256::ZERO,
            uncle_hash: EMPTY_UNCLE_HASH,
            coinbase: Address::ZERO,
            state_root: H256::ZERO,
            tx_root: H256::ZERO,
            receipt_root: H256::ZERO,
            bloom: Bloom::ZERO,
            difficulty: U256::zero(),
            number: 0,
            gas_limit: 0,
            gas_used: 0,
            time: 0,
            extra: Bytes::new(),
            mix_hash: H256::ZERO,
            nonce: 0,
        }
    }
}

impl Header {
    /// Keccak-256 of the RLP encoding
    pub fn hash(&self) -> H256 {
        keccak256(&rlp::encode(self))
    }
}

impl Encodable for Header {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(15);
        s.append(&self.parent_hash);
        s.append(&self.uncle_hash);
        s.append(&self.coinbase);
        s.append(&self.state_root);
        s.append(&self.tx_root);
        s.append(&self.receipt_root);
        s.append(&self.bloom);
        s.append(&self.difficulty);
        s.append(&self.number);
        s.append(&self.gas_limit);
        s.append(&self.gas_used);
        s.append(&self.time);
        s.append(&self.extra.to_vec());
        s.append(&self.mix_hash);
        s.append(&self.nonce.to_be_bytes().to_vec());
    }
}

/// Complete block: header, transactions and uncle headers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// Block header
    pub header: Header,
    /// Transactions in execution order
    pub transactions: Vec<Transaction>,
    /// Uncle headers
    pub uncles: Vec<Header>,
}

impl Block {
    /// Create a new block
    pub fn new(header: Header, transactions: Vec<Transaction>, uncles: Vec<Header>) -> Self {
        Self {
            header,
            transactions,
            uncles,
        }
    }

    /// Header hash
    pub fn hash(&self) -> H256 {
        self.header.hash()
    }

    /// Get block number
    pub fn number(&self) -> u64 {
        self.header.number
    }

    /// Block gas limit
    pub fn gas_limit(&self) -> u64 {
        self.header.gas_limit
    }

    /// Block proposer
    pub fn coinbase(&self) -> Address {
        self.header.coinbase
    }

    /// Get transaction count
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Bloom filter tests ====================

    #[test]
    fn test_bloom_empty() {
        let bloom = Bloom::default();
        assert!(bloom.is_empty());
        assert!(!bloom.contains(b"anything"));
    }

    #[test]
    fn test_bloom_accrue_and_contains() {
        let mut bloom = Bloom::default();
        bloom.accrue(b"hello");
        assert!(!bloom.is_empty());
        assert!(bloom.contains(b"hello"));
        assert!(!bloom.contains(b"world"));
    }

    #[test]
    fn test_bloom_union() {
        let mut a = Bloom::default();
        a.accrue(b"a");
        let mut b = Bloom::default();
        b.accrue(b"b");
        a.accrue_bloom(&b);
        assert!(a.contains(b"a"));
        assert!(a.contains(b"b"));
    }

    // ==================== Header tests ====================

    #[test]
    fn test_empty_uncle_hash_constant() {
        let empty: Vec<Header> = Vec::new();
        let mut s = RlpStream::new();
        s.append_list::<Header, Header>(&empty);
        assert_eq!(keccak256(&s.out()), EMPTY_UNCLE_HASH);
    }

    #[test]
    fn test_header_hash_changes_with_fields() {
        let header = Header::default();
        let mut next = header.clone();
        next.number = 1;
        assert_ne!(header.hash(), next.hash());
        assert_eq!(header.hash(), Header::default().hash());
    }

    #[test]
    fn test_block_accessors() {
        let header = Header {
            number: 42,
            gas_limit: 8_000_000,
            coinbase: Address::from_bytes([0x07; 20]),
            ..Default::default()
        };
        let block = Block::new(header.clone(), Vec::new(), Vec::new());
        assert_eq!(block.number(), 42);
        assert_eq!(block.gas_limit(), 8_000_000);
        assert_eq!(block.coinbase(), Address::from_bytes([0x07; 20]));
        assert_eq!(block.hash(), header.hash());
        assert_eq!(block.tx_count(), 0);
    }
}
