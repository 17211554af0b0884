//! Account record

use bytes::Bytes;
use rlp::RlpStream;
use std::collections::BTreeMap;
use vesta_crypto::keccak256;
use vesta_primitives::{H256, U256};

/// Empty code hash (keccak256 of empty bytes)
pub const EMPTY_CODE_HASH: H256 = H256::from_bytes([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c,
    0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b,
    0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Account data
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Account {
    /// Account nonce
    pub nonce: u64,
    /// Account balance
    pub balance: U256,
    /// Contract code
    pub code: Bytes,
    /// Non-zero storage slots
    pub storage: BTreeMap<H256, H256>,
}

impl Account {
    /// Create an account holding `balance`
    pub fn with_balance(balance: U256) -> Self {
        Self {
            balance,
            ..Default::default()
        }
    }

    /// Check if account is empty (EIP-161)
    pub fn is_empty(&self) -> bool {
        self.nonce == 0 && self.balance.is_zero() && self.code.is_empty()
    }

    /// Check if account has code
    pub fn has_code(&self) -> bool {
        !self.code.is_empty()
    }

    /// keccak256 of the code
    pub fn code_hash(&self) -> H256 {
        if self.code.is_empty() {
            EMPTY_CODE_HASH
        } else {
            keccak256(&self.code)
        }
    }

    /// Digest over the sorted storage slots
    pub fn storage_root(&self) -> H256 {
        let mut s = RlpStream::new_list(self.storage.len());
        for (key, value) in &self.storage {
            s.begin_list(2);
            s.append(key);
            s.append(value);
        }
        keccak256(&s.out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_account() {
        let account = Account::default();
        assert!(account.is_empty());
        assert!(!account.has_code());
        assert_eq!(account.code_hash(), EMPTY_CODE_HASH);
        assert_eq!(keccak256(&[]), EMPTY_CODE_HASH);
    }

    #[test]
    fn test_account_with_balance() {
        let account = Account::with_balance(U256::from(100u64));
        assert!(!account.is_empty());
    }

    #[test]
    fn test_account_with_code() {
        let account = Account {
            code: Bytes::from_static(&[0x60, 0x00]),
            ..Default::default()
        };
        assert!(!account.is_empty());
        assert!(account.has_code());
        assert_ne!(account.code_hash(), EMPTY_CODE_HASH);
    }

    #[test]
    fn test_storage_root_tracks_slots() {
        let mut account = Account::default();
        let empty = account.storage_root();
        account.storage.insert(H256::from_low_u64_be(1), H256::from_low_u64_be(2));
        assert_ne!(account.storage_root(), empty);
    }
}
