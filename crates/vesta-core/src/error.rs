//! Error types for block processing

use thiserror::Error;
use vesta_primitives::{Address, H256, U256};
use vesta_types::TxError;

/// Block gas pool errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GasPoolError {
    /// Not enough gas left in the block
    #[error("gas limit reached: have {available}, want {requested}")]
    GasLimitReached {
        /// Gas left in the pool
        available: u64,
        /// Gas requested
        requested: u64,
    },
}

/// Consensus engine errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Uncle more than seven generations behind the block
    #[error("uncle {uncle} too old for block {block}")]
    UncleTooOld {
        /// Uncle number
        uncle: u64,
        /// Block number
        block: u64,
    },

    /// Uncle not behind the block
    #[error("uncle {uncle} is not an ancestor generation of block {block}")]
    InvalidUncle {
        /// Uncle number
        uncle: u64,
        /// Block number
        block: u64,
    },
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON did not match the schema
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that abort a whole block
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessError {
    /// Sender could not be recovered
    #[error("invalid transaction {tx_hash}: {source}")]
    InvalidTransaction {
        /// Transaction hash
        tx_hash: H256,
        /// Underlying failure
        #[source]
        source: TxError,
    },

    /// Nonce below the account nonce
    #[error("nonce too low for {address}: expected {expected}, got {got}")]
    NonceTooLow {
        /// Sender
        address: Address,
        /// Account nonce
        expected: u64,
        /// Transaction nonce
        got: u64,
    },

    /// Nonce above the account nonce
    #[error("nonce too high for {address}: expected {expected}, got {got}")]
    NonceTooHigh {
        /// Sender
        address: Address,
        /// Account nonce
        expected: u64,
        /// Transaction nonce
        got: u64,
    },

    /// Balance below `gas * price + value`
    #[error("insufficient funds for {address}: required {required}, available {available}")]
    InsufficientFunds {
        /// Sender
        address: Address,
        /// Up-front cost
        required: U256,
        /// Sender balance
        available: U256,
    },

    /// Gas limit below the intrinsic cost
    #[error("intrinsic gas too low: required {required}, limit {limit}")]
    IntrinsicGas {
        /// Intrinsic gas
        required: u64,
        /// Transaction gas limit
        limit: u64,
    },

    /// Block gas pool exhausted
    #[error(transparent)]
    GasLimitReached(#[from] GasPoolError),

    /// `gas * price + value` does not fit in 256 bits
    #[error("gas cost overflow")]
    GasOverflow,

    /// Block finalization failed
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Result type for block processing
pub type ProcessResult<T> = Result<T, ProcessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProcessError::from(GasPoolError::GasLimitReached {
            available: 10,
            requested: 21_000,
        });
        assert_eq!(err.to_string(), "gas limit reached: have 10, want 21000");

        let err = ProcessError::IntrinsicGas {
            required: 21_000,
            limit: 100,
        };
        assert_eq!(err.to_string(), "intrinsic gas too low: required 21000, limit 100");

        let err = ProcessError::from(EngineError::UncleTooOld { uncle: 1, block: 20 });
        assert_eq!(err.to_string(), "engine error: uncle 1 too old for block 20");
    }

    #[test]
    fn test_invalid_transaction_keeps_source() {
        use std::error::Error as _;
        let err = ProcessError::InvalidTransaction {
            tx_hash: H256::ZERO,
            source: TxError::InvalidSignature,
        };
        assert!(err.source().is_some());
    }
}
