//! Block state processor

use crate::applier::apply_transaction;
use crate::chain::ChainReader;
use crate::config::{ChainConfig, ExecutionConfig};
use crate::context::BlockEnv;
use crate::engine::Engine;
use crate::error::ProcessResult;
use crate::fork::apply_dao_hard_fork;
use crate::gas_pool::GasPool;
use vesta_evm::Interpreter;
use vesta_primitives::Address;
use vesta_state::StateLedger;
use vesta_types::{Block, InternalTransaction, Log, Receipt};

/// Result of processing a block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// One receipt per transaction
    pub receipts: Vec<Receipt>,
    /// All logs of the block in emission order
    pub logs: Vec<Log>,
    /// Internal transactions, one list per transaction
    pub internal_transactions: Vec<Vec<InternalTransaction>>,
    /// VM error of each transaction, `None` for successes
    pub failures: Vec<Option<String>>,
    /// Total gas used
    pub gas_used: u64,
}

/// Applies the transactions of a block on top of a state.
///
/// Processing runs three passes: the DAO redistribution when the block
/// is the supported fork block, the transactions in block order, and
/// the engine's finalization. A fatal error in any pass rolls the state
/// back to where it was before the block.
pub struct StateProcessor<C, E, I> {
    config: ChainConfig,
    chain: C,
    engine: E,
    interpreter: I,
}

impl<C, E, I> StateProcessor<C, E, I>
where
    C: ChainReader,
    E: Engine,
    I: Interpreter,
{
    /// Create a processor
    pub fn new(config: ChainConfig, chain: C, engine: E, interpreter: I) -> Self {
        Self {
            config,
            chain,
            engine,
            interpreter,
        }
    }

    /// Fork schedule
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Header source
    pub fn chain(&self) -> &C {
        &self.chain
    }

    /// Process `block` with fees paid to the header coinbase
    pub fn process<S: StateLedger>(
        &self,
        block: &Block,
        state: &mut S,
        exec_config: &ExecutionConfig,
    ) -> ProcessResult<ProcessOutput> {
        self.process_with_author(block, state, exec_config, None)
    }

    /// Process `block`, paying fees to `author` when given
    pub fn process_with_author<S: StateLedger>(
        &self,
        block: &Block,
        state: &mut S,
        exec_config: &ExecutionConfig,
        author: Option<Address>,
    ) -> ProcessResult<ProcessOutput> {
        let snapshot = state.snapshot();
        match self.run(block, state, exec_config, author) {
            Ok(output) => Ok(output),
            Err(err) => {
                tracing::warn!("Block {} rejected: {}", block.number(), err);
                state.restore(snapshot);
                Err(err)
            }
        }
    }

    fn run<S: StateLedger>(
        &self,
        block: &Block,
        state: &mut S,
        exec_config: &ExecutionConfig,
        author: Option<Address>,
    ) -> ProcessResult<ProcessOutput> {
        let header = &block.header;
        if self.config.is_dao_fork(header.number) {
            tracing::debug!("Applying DAO hard fork at block {}", header.number);
            apply_dao_hard_fork(state, &self.config.dao);
        }

        let env = BlockEnv {
            config: &self.config,
            exec_config,
            chain: &self.chain,
            interpreter: &self.interpreter,
            header,
            author,
        };
        let block_hash = block.hash();
        let mut gas_pool = GasPool::new(header.gas_limit);
        let mut used_gas = 0u64;
        let mut output = ProcessOutput::default();

        for (index, tx) in block.transactions.iter().enumerate() {
            state.prepare(tx.hash(), block_hash, index);
            let applied = apply_transaction(&env, &mut gas_pool, state, tx, &mut used_gas)?;
            output.logs.extend(applied.receipt.logs.iter().cloned());
            output.receipts.push(applied.receipt);
            output.internal_transactions.push(applied.internal_transactions);
            output.failures.push(applied.failure);
        }

        self.engine
            .finalize(&self.chain, header, state, &block.transactions, &block.uncles)?;
        output.gas_used = used_gas;

        tracing::info!(
            "Processed block {} ({} txs, gas used {})",
            header.number,
            output.receipts.len(),
            used_gas
        );
        Ok(output)
    }
}
