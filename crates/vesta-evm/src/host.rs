//! Host and interpreter traits

use crate::error::VmResult;
use crate::frame::{Frame, FrameResult};
use crate::trace::StructLog;
use bytes::Bytes;
use vesta_primitives::{Address, H256, U256};
use vesta_types::{InternalTransaction, Log};

/// Opaque handle to a ledger snapshot held by the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(pub usize);

/// Everything the interpreter may ask of the chain while running a frame.
///
/// Nested frames are entered through the call family (`call`, `call_code`,
/// `delegate_call`, `static_call`, `create`); the host records the
/// transfer, snapshots the ledger, runs the frame and rolls back on
/// failure. `parent` is always the frame issuing the instruction.
pub trait Host {
    /// Sender of the top-level transaction
    fn origin(&self) -> Address;

    /// Hash of the top-level transaction
    fn origination_hash(&self) -> H256;

    /// Current block number
    fn block_number(&self) -> u64;

    /// Current block proposer
    fn coinbase(&self) -> Address;

    /// Current block timestamp
    fn time(&self) -> u64;

    /// Current block difficulty
    fn difficulty(&self) -> U256;

    /// Current block gas limit
    fn gas_limit(&self) -> u64;

    /// Gas price of the top-level transaction
    fn gas_price(&self) -> U256;

    /// Value of the top-level transaction
    fn value(&self) -> U256;

    /// Number of frames currently executing
    fn depth(&self) -> usize;

    /// Hash of ancestor block `number`, zero when unreachable
    fn get_hash(&mut self, number: u64) -> H256;

    /// Balance of `address`
    fn balance(&self, address: &Address) -> U256;

    /// Code of `address`
    fn code(&self, address: &Address) -> Bytes;

    /// Storage slot of `address`
    fn storage(&self, address: &Address, key: &H256) -> H256;

    /// Write a storage slot; fails inside static frames
    fn set_storage(&mut self, address: &Address, key: H256, value: H256) -> VmResult<()>;

    /// Add to the refund counter
    fn add_refund(&mut self, gas: u64);

    /// Whether `address` holds at least `amount`
    fn can_transfer(&self, address: &Address, amount: U256) -> bool;

    /// Move `amount` from `from` to `to` without checks
    fn transfer(&mut self, from: &Address, to: &Address, amount: U256);

    /// Snapshot the ledger
    fn make_snapshot(&mut self) -> SnapshotId;

    /// Restore a snapshot taken by `make_snapshot`
    fn set_snapshot(&mut self, id: SnapshotId);

    /// CALL
    fn call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64, value: U256) -> FrameResult;

    /// CALLCODE
    fn call_code(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64, value: U256) -> FrameResult;

    /// DELEGATECALL
    fn delegate_call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64) -> FrameResult;

    /// STATICCALL
    fn static_call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64) -> FrameResult;

    /// CREATE
    fn create(&mut self, parent: &Frame, init_code: Bytes, gas: u64, value: U256) -> FrameResult;

    /// SELFDESTRUCT, sending the balance of `parent.address` to `beneficiary`
    fn suicide(&mut self, parent: &Frame, beneficiary: Address) -> VmResult<()>;

    /// Emit a log; fails inside static frames
    fn add_log(&mut self, log: Log) -> VmResult<()>;

    /// Append a step trace (no-op unless tracing is enabled)
    fn add_struct_log(&mut self, log: StructLog);

    /// Step traces recorded so far
    fn struct_logs(&self) -> &[StructLog];

    /// Record a VM-built internal transaction; `None` when dropped
    fn add_internal_transaction(&mut self, entry: InternalTransaction) -> Option<u64>;
}

/// A virtual machine able to run one frame against a host
pub trait Interpreter {
    /// Run `frame` to completion
    fn run(&self, host: &mut dyn Host, frame: &Frame) -> FrameResult;
}

impl<F> Interpreter for F
where
    F: Fn(&mut dyn Host, &Frame) -> FrameResult,
{
    fn run(&self, host: &mut dyn Host, frame: &Frame) -> FrameResult {
        self(host, frame)
    }
}
