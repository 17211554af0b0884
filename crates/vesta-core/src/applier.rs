//! Applying one transaction to the state

use crate::chain::ChainReader;
use crate::context::{BlockEnv, ExecutionContext, TxContext};
use crate::error::{ProcessError, ProcessResult};
use crate::gas_pool::GasPool;
use crate::transition::{apply_message, create_address, Message};
use vesta_evm::{Interpreter, StructLog};
use vesta_state::StateLedger;
use vesta_types::{InternalTransaction, Receipt, ReceiptOutcome, Transaction};

/// Everything produced by one applied transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Receipt with cumulative gas and logs
    pub receipt: Receipt,
    /// Gas charged to this transaction
    pub gas_used: u64,
    /// Nested calls, creations and suicides in index order
    pub internal_transactions: Vec<InternalTransaction>,
    /// VM error of the top-level frame, if it failed
    pub failure: Option<String>,
    /// Step traces, empty unless enabled
    pub struct_logs: Vec<StructLog>,
}

/// Apply `tx` to `state` and build its receipt.
///
/// `used_gas` is the block gas consumed so far and is advanced by this
/// transaction. VM failures produce a failed receipt; an error return
/// means the block is invalid.
pub fn apply_transaction<S, C, I>(
    env: &BlockEnv<'_, C, I>,
    gas_pool: &mut GasPool,
    state: &mut S,
    tx: &Transaction,
    used_gas: &mut u64,
) -> ProcessResult<ApplyOutcome>
where
    S: StateLedger,
    C: ChainReader + ?Sized,
    I: Interpreter + ?Sized,
{
    let header = env.header;
    let tx_hash = tx.hash();
    let signer = env.config.signer(header.number);
    let msg = Message::from_transaction(tx, &signer)
        .map_err(|source| ProcessError::InvalidTransaction { tx_hash, source })?;

    let tx_context = TxContext {
        hash: tx_hash,
        origin: msg.from,
        gas_price: msg.gas_price,
        value: msg.value,
    };
    let mut ctx = ExecutionContext::new(&mut *state, env, tx_context);
    let result = apply_message(&mut ctx, gas_pool, &msg)?;
    let (mut recorder, struct_logs) = ctx.finish();
    recorder.set_parent_hash(tx_hash);

    let outcome = if env.config.is_byzantium(header.number) {
        state.finalise(true);
        ReceiptOutcome::Status(result.error.is_none().into())
    } else {
        ReceiptOutcome::Root(state.intermediate_root(env.config.is_eip158(header.number)))
    };
    *used_gas += result.gas_used;

    let mut logs = state.logs(&tx_hash);
    for log in &mut logs {
        log.block_number = header.number;
    }

    let mut receipt = Receipt::new(outcome, *used_gas).with_logs(logs);
    receipt.gas_used = result.gas_used;
    receipt.tx_hash = tx_hash;
    if msg.is_create() {
        receipt.contract_address = Some(create_address(&msg.from, tx.nonce()));
    }
    receipt.block_hash = state.block_hash();
    receipt.block_number = header.number;
    receipt.transaction_index = state.tx_index();

    tracing::debug!(
        "Applied transaction {} (gas used {}, {} internal)",
        tx_hash,
        result.gas_used,
        recorder.len()
    );

    Ok(ApplyOutcome {
        receipt,
        gas_used: result.gas_used,
        internal_transactions: recorder.into_internal_transactions(),
        failure: result.error.map(|e| e.to_string()),
        struct_logs,
    })
}
