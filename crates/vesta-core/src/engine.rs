//! Consensus engine post-processing

use crate::chain::ChainReader;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use vesta_primitives::U256;
use vesta_state::StateLedger;
use vesta_types::{Header, Transaction};

/// Uncles further behind than this are rejected
const MAX_UNCLE_DEPTH: u64 = 7;

/// Block finalization run after every transaction has been applied
pub trait Engine {
    /// Apply block rewards and any other end-of-block state changes
    fn finalize<C, S>(
        &self,
        chain: &C,
        header: &Header,
        state: &mut S,
        txs: &[Transaction],
        uncles: &[Header],
    ) -> Result<(), EngineError>
    where
        C: ChainReader + ?Sized,
        S: StateLedger + ?Sized;
}

/// Reward schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Reward credited to the block coinbase
    pub block_reward: U256,
    /// Whether uncles earn rewards
    #[serde(default = "default_uncles_enabled")]
    pub uncles_enabled: bool,
}

fn default_uncles_enabled() -> bool {
    true
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            block_reward: U256::from(5_000_000_000_000_000_000u128),
            uncles_enabled: true,
        }
    }
}

/// Engine crediting a fixed block reward plus uncle inclusion rewards
#[derive(Debug, Clone, Default)]
pub struct RewardEngine {
    config: RewardConfig,
}

impl RewardEngine {
    /// Create with `config`
    pub fn new(config: RewardConfig) -> Self {
        Self { config }
    }

    /// Reward schedule
    pub fn config(&self) -> &RewardConfig {
        &self.config
    }
}

impl Engine for RewardEngine {
    fn finalize<C, S>(
        &self,
        _chain: &C,
        header: &Header,
        state: &mut S,
        _txs: &[Transaction],
        uncles: &[Header],
    ) -> Result<(), EngineError>
    where
        C: ChainReader + ?Sized,
        S: StateLedger + ?Sized,
    {
        let reward = self.config.block_reward;
        let mut proposer_reward = reward;

        if self.config.uncles_enabled {
            for uncle in uncles {
                if uncle.number >= header.number {
                    return Err(EngineError::InvalidUncle {
                        uncle: uncle.number,
                        block: header.number,
                    });
                }
                let distance = header.number - uncle.number;
                if distance > MAX_UNCLE_DEPTH {
                    return Err(EngineError::UncleTooOld {
                        uncle: uncle.number,
                        block: header.number,
                    });
                }
                let uncle_reward = reward.saturating_mul(U256::from(8 - distance)) / 8;
                state.add_balance(&uncle.coinbase, uncle_reward);
                proposer_reward = proposer_reward.saturating_add(reward / 32);
            }
        }

        state.add_balance(&header.coinbase, proposer_reward);
        tracing::debug!("Block {} rewarded {} to {}", header.number, proposer_reward, header.coinbase);
        Ok(())
    }
}
