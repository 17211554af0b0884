//! Chain and execution configuration

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vesta_primitives::Address;
use vesta_types::Signer;

/// Default cap on internal transactions recorded per top-level transaction
pub const DEFAULT_MAX_INTERNAL_TXS: usize = 500;

/// Accounts drained at the DAO fork block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaoConfig {
    /// Accounts whose whole balance is moved
    #[serde(default)]
    pub drain_list: Vec<Address>,
    /// Receiver of the drained balances
    #[serde(default)]
    pub refund_contract: Address,
}

/// Fork schedule of a chain.
///
/// A fork is active from its block onwards; `None` means never.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    /// Chain ID
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// First block with homestead rules
    #[serde(default)]
    pub homestead_block: Option<u64>,
    /// DAO fork block
    #[serde(default)]
    pub dao_fork_block: Option<u64>,
    /// Whether this chain applies the DAO redistribution
    #[serde(default)]
    pub dao_fork_support: bool,
    /// DAO redistribution accounts
    #[serde(default)]
    pub dao: DaoConfig,
    /// First block deleting empty accounts
    #[serde(default)]
    pub eip158_block: Option<u64>,
    /// First block with status receipts
    #[serde(default)]
    pub byzantium_block: Option<u64>,
}

fn default_chain_id() -> u64 {
    1
}

fn is_active(fork: Option<u64>, number: u64) -> bool {
    fork.map_or(false, |block| block <= number)
}

impl ChainConfig {
    /// Every fork active from genesis
    pub fn all_forks(chain_id: u64) -> Self {
        Self {
            chain_id,
            homestead_block: Some(0),
            dao_fork_block: None,
            dao_fork_support: false,
            dao: DaoConfig::default(),
            eip158_block: Some(0),
            byzantium_block: Some(0),
        }
    }

    /// Parse from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::info!("Loading chain config from {:?}", path);
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Whether homestead rules apply at `number`
    pub fn is_homestead(&self, number: u64) -> bool {
        is_active(self.homestead_block, number)
    }

    /// Whether `number` is exactly the supported DAO fork block
    pub fn is_dao_fork(&self, number: u64) -> bool {
        self.dao_fork_support && self.dao_fork_block == Some(number)
    }

    /// Whether empty accounts are deleted at `number`
    pub fn is_eip158(&self, number: u64) -> bool {
        is_active(self.eip158_block, number)
    }

    /// Whether receipts carry a status bit at `number`
    pub fn is_byzantium(&self, number: u64) -> bool {
        is_active(self.byzantium_block, number)
    }

    /// Signer for transactions in block `number`
    pub fn signer(&self, number: u64) -> Signer {
        Signer::new(self.is_homestead(number))
    }
}

/// Per-run execution knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Internal transactions kept per top-level transaction
    #[serde(default = "default_max_internal_txs")]
    pub max_internal_txs: usize,
    /// Keep interpreter step traces
    #[serde(default)]
    pub record_struct_logs: bool,
}

fn default_max_internal_txs() -> usize {
    DEFAULT_MAX_INTERNAL_TXS
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_internal_txs: DEFAULT_MAX_INTERNAL_TXS,
            record_struct_logs: false,
        }
    }
}
