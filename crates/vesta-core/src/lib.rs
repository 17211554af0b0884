//! # vesta-core
//!
//! Block processing for Vesta.
//!
//! This crate turns a block and a world state into receipts, logs and a
//! per-transaction list of internal transactions:
//! - [`StateProcessor`]: DAO pre-pass, transaction loop, engine post-pass
//! - [`apply_transaction`]: one transaction, one receipt
//! - [`ExecutionContext`]: the [`vesta_evm::Host`] handed to the interpreter
//! - [`InternalTxRecorder`]: capped log of nested calls, creations and suicides
//! - [`GasPool`]: block gas budget
//! - [`ChainConfig`] / [`ExecutionConfig`]: fork schedule and execution knobs

#![warn(missing_docs)]
#![warn(clippy::all)]

mod applier;
mod chain;
mod config;
mod context;
mod engine;
mod error;
mod fork;
mod gas_pool;
mod processor;
mod recorder;
mod transition;

pub use applier::{apply_transaction, ApplyOutcome};
pub use chain::{ChainReader, MemoryChain};
pub use config::{ChainConfig, DaoConfig, ExecutionConfig, DEFAULT_MAX_INTERNAL_TXS};
pub use context::{BlockEnv, ExecutionContext, TxContext};
pub use engine::{Engine, RewardConfig, RewardEngine};
pub use error::{ConfigError, EngineError, GasPoolError, ProcessError, ProcessResult};
pub use fork::apply_dao_hard_fork;
pub use gas_pool::GasPool;
pub use processor::{ProcessOutput, StateProcessor};
pub use recorder::InternalTxRecorder;
pub use transition::{apply_message, create_address, intrinsic_gas, ExecutionResult, Message};
