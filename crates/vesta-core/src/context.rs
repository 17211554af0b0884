//! Execution context: the host side of the interpreter

use crate::chain::ChainReader;
use crate::config::{ChainConfig, ExecutionConfig};
use crate::recorder::InternalTxRecorder;
use crate::transition::create_address;
use bytes::Bytes;
use std::collections::HashMap;
use vesta_evm::{
    Frame, FrameKind, FrameResult, Host, Interpreter, SnapshotId, StructLog, VmError, VmResult,
    CALL_DEPTH_LIMIT, CREATE_DATA_GAS,
};
use vesta_primitives::{Address, H256, U256};
use vesta_state::StateLedger;
use vesta_types::{Header, InternalTransaction, Log};

/// Block-invariant inputs shared by every transaction of a block
pub struct BlockEnv<'a, C: ?Sized, I: ?Sized> {
    /// Fork schedule
    pub config: &'a ChainConfig,
    /// Execution knobs
    pub exec_config: &'a ExecutionConfig,
    /// Ancestor lookup
    pub chain: &'a C,
    /// Virtual machine
    pub interpreter: &'a I,
    /// Header of the block being processed
    pub header: &'a Header,
    /// Receiver of transaction fees, the header coinbase when `None`
    pub author: Option<Address>,
}

/// Per-transaction inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxContext {
    /// Transaction hash
    pub hash: H256,
    /// Transaction sender
    pub origin: Address,
    /// Gas price
    pub gas_price: U256,
    /// Transferred value
    pub value: U256,
}

/// Host bound to one transaction of one block.
///
/// Nested frames run through the [`Host`] call family: each one records
/// an internal transaction, snapshots the ledger and rolls back on
/// failure, marking its own entry and every entry beneath it rejected.
pub struct ExecutionContext<'a, S: StateLedger, C: ?Sized, I: ?Sized> {
    state: &'a mut S,
    chain: &'a C,
    interpreter: &'a I,
    header: &'a Header,
    config: &'a ChainConfig,
    author: Option<Address>,
    record_struct_logs: bool,
    tx: TxContext,
    depth: usize,
    read_only: bool,
    snapshots: Vec<S::Snapshot>,
    ancestor_hashes: HashMap<u64, H256>,
    /// Next unverified parent link of the ancestor walk
    ancestor_cursor: Option<(u64, H256)>,
    struct_logs: Vec<StructLog>,
    recorder: InternalTxRecorder,
}

impl<'a, S, C, I> ExecutionContext<'a, S, C, I>
where
    S: StateLedger,
    C: ChainReader + ?Sized,
    I: Interpreter + ?Sized,
{
    /// Context for transaction `tx` at depth 0
    pub fn new(state: &'a mut S, env: &BlockEnv<'a, C, I>, tx: TxContext) -> Self {
        Self {
            state,
            chain: env.chain,
            interpreter: env.interpreter,
            header: env.header,
            config: env.config,
            author: env.author,
            record_struct_logs: env.exec_config.record_struct_logs,
            tx,
            depth: 0,
            read_only: false,
            snapshots: Vec::new(),
            ancestor_hashes: HashMap::new(),
            ancestor_cursor: None,
            struct_logs: Vec::new(),
            recorder: InternalTxRecorder::new(env.exec_config.max_internal_txs, tx.gas_price),
        }
    }

    /// Ledger
    pub fn state(&self) -> &S {
        self.state
    }

    /// Mutable ledger
    pub fn state_mut(&mut self) -> &mut S {
        self.state
    }

    /// Internal transactions recorded so far
    pub fn recorder(&self) -> &InternalTxRecorder {
        &self.recorder
    }

    /// Receiver of the transaction fee
    pub fn beneficiary(&self) -> Address {
        self.author.unwrap_or(self.header.coinbase)
    }

    /// Whether homestead rules apply to the bound block
    pub fn is_homestead(&self) -> bool {
        self.config.is_homestead(self.header.number)
    }

    /// Release the ledger, returning the recorder and step traces
    pub fn finish(self) -> (InternalTxRecorder, Vec<StructLog>) {
        (self.recorder, self.struct_logs)
    }

    /// Run the top-level message call; not recorded as an internal transaction
    pub fn top_level_call(&mut self, from: Address, to: Address, value: U256, input: Bytes, gas: u64) -> FrameResult {
        let snapshot = self.state.snapshot();
        self.transfer(&from, &to, value);
        let code = self.state.code(&to);
        let frame = Frame::call(from, to, value, input, gas, code);
        let result = self.run_frame(&frame);
        self.settle(snapshot, 0, gas, result)
    }

    /// Run the top-level contract creation; not recorded as an internal transaction
    pub fn top_level_create(&mut self, from: Address, value: U256, init_code: Bytes, gas: u64) -> FrameResult {
        let nonce = self.state.nonce(&from);
        let address = create_address(&from, nonce);
        self.create_frame(from, address, nonce, value, init_code, gas, 0)
    }

    fn run_frame(&mut self, frame: &Frame) -> FrameResult {
        if frame.code.is_empty() {
            return FrameResult::success(0, Bytes::new());
        }
        let interpreter = self.interpreter;
        let was_read_only = self.read_only;
        self.read_only |= frame.is_static;
        self.depth += 1;
        let result = interpreter.run(self, frame);
        self.depth -= 1;
        self.read_only = was_read_only;
        result
    }

    /// Roll back a failed frame and apply its gas semantics
    fn settle(&mut self, snapshot: S::Snapshot, first_entry: usize, gas: u64, mut result: FrameResult) -> FrameResult {
        if let Some(error) = &result.error {
            tracing::trace!("Rolling back frame at depth {}: {}", self.depth + 1, error);
            self.state.restore(snapshot);
            self.recorder.reject_from(first_entry);
            if error.consumes_all_gas() {
                result.gas_used = gas;
            }
            result.created_address = None;
        }
        result
    }

    /// Fail a frame before it ran
    fn abort(&mut self, first_entry: usize, gas: u64, error: VmError) -> FrameResult {
        tracing::trace!("Frame at depth {} aborted: {}", self.depth + 1, error);
        self.recorder.reject_from(first_entry);
        let gas_used = if error.consumes_all_gas() { gas } else { 0 };
        FrameResult::failure(gas_used, error)
    }

    fn depth_exceeded(&self) -> bool {
        self.depth > CALL_DEPTH_LIMIT
    }

    #[allow(clippy::too_many_arguments)]
    fn create_frame(
        &mut self,
        caller: Address,
        address: Address,
        nonce: u64,
        value: U256,
        init_code: Bytes,
        gas: u64,
        first_entry: usize,
    ) -> FrameResult {
        self.state.set_nonce(&caller, nonce + 1);
        if self.state.nonce(&address) != 0 || !self.state.code(&address).is_empty() {
            return self.abort(first_entry, gas, VmError::ContractAddressCollision);
        }

        let snapshot = self.state.snapshot();
        if self.config.is_eip158(self.header.number) {
            self.state.set_nonce(&address, 1);
        }
        self.transfer(&caller, &address, value);

        let frame = Frame::create(caller, address, value, init_code, gas);
        let mut result = self.run_frame(&frame);
        if result.is_success() {
            let store_cost = (result.output.len() as u64).saturating_mul(CREATE_DATA_GAS);
            if result.gas_used.saturating_add(store_cost) <= gas {
                result.gas_used += store_cost;
                self.state.set_code(&address, result.output.clone());
            } else if self.is_homestead() {
                result.error = Some(VmError::CodeStoreOutOfGas);
            }
        }
        if result.is_success() {
            result.created_address = Some(address);
        }
        self.settle(snapshot, first_entry, gas, result)
    }
}

impl<'a, S, C, I> Host for ExecutionContext<'a, S, C, I>
where
    S: StateLedger,
    C: ChainReader + ?Sized,
    I: Interpreter + ?Sized,
{
    fn origin(&self) -> Address {
        self.tx.origin
    }

    fn origination_hash(&self) -> H256 {
        self.tx.hash
    }

    fn block_number(&self) -> u64 {
        self.header.number
    }

    fn coinbase(&self) -> Address {
        self.header.coinbase
    }

    fn time(&self) -> u64 {
        self.header.time
    }

    fn difficulty(&self) -> U256 {
        self.header.difficulty
    }

    fn gas_limit(&self) -> u64 {
        self.header.gas_limit
    }

    fn gas_price(&self) -> U256 {
        self.tx.gas_price
    }

    fn value(&self) -> U256 {
        self.tx.value
    }

    fn depth(&self) -> usize {
        self.depth
    }

    fn get_hash(&mut self, number: u64) -> H256 {
        if number >= self.header.number {
            return H256::ZERO;
        }
        if let Some(hash) = self.ancestor_hashes.get(&number) {
            return *hash;
        }

        // the cursor holds the next link to verify, as (number, hash)
        let (mut current, mut hash) = self
            .ancestor_cursor
            .unwrap_or((self.header.number - 1, self.header.parent_hash));

        loop {
            let header = match self.chain.header_by_hash(&hash) {
                Some(header) if header.number == current => header,
                _ => return H256::ZERO,
            };
            self.ancestor_hashes.insert(current, hash);
            if current == number {
                return hash;
            }
            current -= 1;
            hash = header.parent_hash;
            self.ancestor_cursor = Some((current, hash));
        }
    }

    fn balance(&self, address: &Address) -> U256 {
        self.state.balance(address)
    }

    fn code(&self, address: &Address) -> Bytes {
        self.state.code(address)
    }

    fn storage(&self, address: &Address, key: &H256) -> H256 {
        self.state.storage(address, key)
    }

    fn set_storage(&mut self, address: &Address, key: H256, value: H256) -> VmResult<()> {
        if self.read_only {
            return Err(VmError::WriteProtection);
        }
        self.state.set_storage(address, key, value);
        Ok(())
    }

    fn add_refund(&mut self, gas: u64) {
        self.state.add_refund(gas);
    }

    fn can_transfer(&self, address: &Address, amount: U256) -> bool {
        self.state.balance(address) >= amount
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: U256) {
        self.state.sub_balance(from, amount);
        self.state.add_balance(to, amount);
    }

    fn make_snapshot(&mut self) -> SnapshotId {
        self.snapshots.push(self.state.snapshot());
        SnapshotId(self.snapshots.len() - 1)
    }

    fn set_snapshot(&mut self, id: SnapshotId) {
        match self.snapshots.get(id.0) {
            Some(snapshot) => self.state.restore(snapshot.clone()),
            None => tracing::warn!("Unknown snapshot id {}", id.0),
        }
    }

    fn call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64, value: U256) -> FrameResult {
        let first = self.recorder.len();
        let nonce = self.state.nonce(&parent.address);
        self.recorder
            .register_call(nonce, gas, parent.address, to, value, input.clone(), self.depth as u64);

        if self.depth_exceeded() {
            return self.abort(first, gas, VmError::CallDepthExceeded);
        }
        if self.read_only && !value.is_zero() {
            return self.abort(first, gas, VmError::WriteProtection);
        }
        if !self.can_transfer(&parent.address, value) {
            return self.abort(first, gas, VmError::InsufficientBalance);
        }

        let snapshot = self.state.snapshot();
        self.transfer(&parent.address, &to, value);
        let code = self.state.code(&to);
        let mut frame = Frame::call(parent.address, to, value, input, gas, code);
        frame.is_static = self.read_only;
        let result = self.run_frame(&frame);
        self.settle(snapshot, first, gas, result)
    }

    fn call_code(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64, value: U256) -> FrameResult {
        let first = self.recorder.len();
        let nonce = self.state.nonce(&parent.address);
        self.recorder
            .register_call_code(nonce, gas, parent.address, to, value, input.clone(), self.depth as u64);

        if self.depth_exceeded() {
            return self.abort(first, gas, VmError::CallDepthExceeded);
        }
        if !self.can_transfer(&parent.address, value) {
            return self.abort(first, gas, VmError::InsufficientBalance);
        }

        let snapshot = self.state.snapshot();
        let frame = Frame {
            caller: parent.address,
            address: parent.address,
            code_address: to,
            value,
            input,
            gas,
            code: self.state.code(&to),
            is_static: self.read_only,
            kind: FrameKind::CallCode,
        };
        let result = self.run_frame(&frame);
        self.settle(snapshot, first, gas, result)
    }

    fn delegate_call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64) -> FrameResult {
        let first = self.recorder.len();
        let nonce = self.state.nonce(&parent.address);
        self.recorder.register_delegate_call(
            nonce,
            gas,
            parent.address,
            to,
            parent.value,
            input.clone(),
            self.depth as u64,
        );

        if self.depth_exceeded() {
            return self.abort(first, gas, VmError::CallDepthExceeded);
        }

        let snapshot = self.state.snapshot();
        let frame = Frame {
            caller: parent.caller,
            address: parent.address,
            code_address: to,
            value: parent.value,
            input,
            gas,
            code: self.state.code(&to),
            is_static: self.read_only,
            kind: FrameKind::DelegateCall,
        };
        let result = self.run_frame(&frame);
        self.settle(snapshot, first, gas, result)
    }

    fn static_call(&mut self, parent: &Frame, to: Address, input: Bytes, gas: u64) -> FrameResult {
        let first = self.recorder.len();
        let nonce = self.state.nonce(&parent.address);
        self.recorder
            .register_static_call(nonce, gas, parent.address, to, input.clone(), self.depth as u64);

        if self.depth_exceeded() {
            return self.abort(first, gas, VmError::CallDepthExceeded);
        }

        let snapshot = self.state.snapshot();
        // touch the callee
        self.state.add_balance(&to, U256::zero());
        let frame = Frame {
            caller: parent.address,
            address: to,
            code_address: to,
            value: U256::zero(),
            input,
            gas,
            code: self.state.code(&to),
            is_static: true,
            kind: FrameKind::StaticCall,
        };
        let result = self.run_frame(&frame);
        self.settle(snapshot, first, gas, result)
    }

    fn create(&mut self, parent: &Frame, init_code: Bytes, gas: u64, value: U256) -> FrameResult {
        let first = self.recorder.len();
        let nonce = self.state.nonce(&parent.address);
        let address = create_address(&parent.address, nonce);
        self.recorder.register_create(
            nonce,
            gas,
            parent.address,
            address,
            value,
            init_code.clone(),
            self.depth as u64,
        );

        if self.depth_exceeded() {
            return self.abort(first, gas, VmError::CallDepthExceeded);
        }
        if self.read_only {
            return self.abort(first, gas, VmError::WriteProtection);
        }
        if !self.can_transfer(&parent.address, value) {
            return self.abort(first, gas, VmError::InsufficientBalance);
        }

        self.create_frame(parent.address, address, nonce, value, init_code, gas, first)
    }

    fn suicide(&mut self, parent: &Frame, beneficiary: Address) -> VmResult<()> {
        if self.read_only {
            return Err(VmError::WriteProtection);
        }
        let balance = self.state.balance(&parent.address);
        let nonce = self.state.nonce(&parent.address);
        self.recorder.register_suicide(
            nonce,
            parent.gas,
            parent.address,
            beneficiary,
            balance,
            self.depth as u64,
        );
        self.state.add_balance(&beneficiary, balance);
        self.state.suicide(&parent.address);
        Ok(())
    }

    fn add_log(&mut self, log: Log) -> VmResult<()> {
        if self.read_only {
            return Err(VmError::WriteProtection);
        }
        self.state.add_log(log);
        Ok(())
    }

    fn add_struct_log(&mut self, log: StructLog) {
        if self.record_struct_logs {
            self.struct_logs.push(log);
        }
    }

    fn struct_logs(&self) -> &[StructLog] {
        &self.struct_logs
    }

    fn add_internal_transaction(&mut self, mut entry: InternalTransaction) -> Option<u64> {
        entry.parent_hash = self.tx.hash;
        entry.depth = self.depth as u64;
        self.recorder.record(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MemoryChain;
    use vesta_state::{Account, MemoryState};

    fn addr(n: u8) -> Address {
        Address::from_bytes([n; 20])
    }

    fn noop(_host: &mut dyn Host, frame: &Frame) -> FrameResult {
        FrameResult::success(frame.gas / 2, Bytes::new())
    }

    struct Fixture {
        config: ChainConfig,
        exec_config: ExecutionConfig,
        chain: MemoryChain,
        header: Header,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                config: ChainConfig::all_forks(1),
                exec_config: ExecutionConfig::default(),
                chain: MemoryChain::new(),
                header: Header {
                    number: 10,
                    coinbase: addr(0xcb),
                    gas_limit: 1_000_000,
                    ..Default::default()
                },
            }
        }

        fn env<'a, I: Interpreter>(&'a self, interpreter: &'a I) -> BlockEnv<'a, MemoryChain, I> {
            BlockEnv {
                config: &self.config,
                exec_config: &self.exec_config,
                chain: &self.chain,
                interpreter,
                header: &self.header,
                author: None,
            }
        }
    }

    fn tx_context() -> TxContext {
        TxContext {
            hash: H256::from_low_u64_be(0x77),
            origin: addr(1),
            gas_price: U256::from(2u64),
            value: U256::zero(),
        }
    }

    // ==================== Accessors ====================

    #[test]
    fn test_block_and_tx_accessors() {
        let fixture = Fixture::new();
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let ctx = ExecutionContext::new(&mut state, &env, tx_context());

        assert_eq!(ctx.origin(), addr(1));
        assert_eq!(ctx.origination_hash(), H256::from_low_u64_be(0x77));
        assert_eq!(ctx.block_number(), 10);
        assert_eq!(ctx.coinbase(), addr(0xcb));
        assert_eq!(Host::gas_limit(&ctx), 1_000_000);
        assert_eq!(Host::gas_price(&ctx), U256::from(2u64));
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.beneficiary(), addr(0xcb));
    }

    // ==================== Snapshots ====================

    #[test]
    fn test_snapshot_handles() {
        let fixture = Fixture::new();
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        state.insert_account(addr(1), Account::with_balance(U256::from(10u64)));
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        let id = ctx.make_snapshot();
        ctx.transfer(&addr(1), &addr(2), U256::from(4u64));
        assert!(!ctx.can_transfer(&addr(1), U256::from(7u64)));
        ctx.set_snapshot(id);
        assert_eq!(ctx.balance(&addr(1)), U256::from(10u64));
        assert_eq!(ctx.balance(&addr(2)), U256::zero());

        ctx.set_snapshot(SnapshotId(42));
        assert_eq!(ctx.balance(&addr(1)), U256::from(10u64));
    }

    // ==================== Block hashes ====================

    #[test]
    fn test_get_hash_walks_ancestors() {
        let mut fixture = Fixture::new();
        let mut parent = H256::ZERO;
        let mut hashes = Vec::new();
        for number in 0..10 {
            let header = Header {
                number,
                parent_hash: parent,
                ..Default::default()
            };
            parent = fixture.chain.insert(header);
            hashes.push(parent);
        }
        fixture.header.parent_hash = parent;

        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        assert_eq!(ctx.get_hash(9), hashes[9]);
        assert_eq!(ctx.get_hash(3), hashes[3]);
        assert_eq!(ctx.get_hash(0), hashes[0]);
        assert_eq!(ctx.get_hash(5), hashes[5]);
        assert_eq!(ctx.get_hash(10), H256::ZERO);
        assert_eq!(ctx.get_hash(11), H256::ZERO);
    }

    #[test]
    fn test_get_hash_unknown_parent_is_zero() {
        let mut fixture = Fixture::new();
        fixture.header.parent_hash = H256::from_low_u64_be(0xdead);
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        assert_eq!(ctx.get_hash(9), H256::ZERO);
        assert_eq!(ctx.get_hash(8), H256::ZERO);
    }

    #[test]
    fn test_get_hash_stops_at_missing_link() {
        let mut fixture = Fixture::new();
        let parent = fixture.chain.insert(Header {
            number: 9,
            parent_hash: H256::from_low_u64_be(0xbeef),
            ..Default::default()
        });
        fixture.header.parent_hash = parent;
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        assert_eq!(ctx.get_hash(8), H256::ZERO);
        assert_eq!(ctx.get_hash(9), parent);
        assert_eq!(ctx.get_hash(7), H256::ZERO);
        assert_eq!(ctx.get_hash(8), H256::ZERO);
    }

    #[test]
    fn test_get_hash_rejects_misnumbered_header() {
        let mut fixture = Fixture::new();
        let stray = fixture.chain.insert(Header {
            number: 4,
            ..Default::default()
        });
        fixture.header.parent_hash = stray;
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        assert_eq!(ctx.get_hash(9), H256::ZERO);
        assert_eq!(ctx.get_hash(4), H256::ZERO);
    }

    // ==================== Write protection and traces ====================

    #[test]
    fn test_static_frame_blocks_writes() {
        fn writer(host: &mut dyn Host, frame: &Frame) -> FrameResult {
            match host.set_storage(&frame.address, H256::from_low_u64_be(1), H256::from_low_u64_be(2)) {
                Ok(()) => FrameResult::success(10, Bytes::new()),
                Err(err) => FrameResult::failure(frame.gas, err),
            }
        }
        fn caller(host: &mut dyn Host, frame: &Frame) -> FrameResult {
            if frame.address == Address::from_bytes([2; 20]) {
                let inner = host.static_call(frame, Address::from_bytes([3; 20]), Bytes::new(), 1_000);
                FrameResult::success(inner.gas_used, Bytes::copy_from_slice(&[inner.is_success() as u8]))
            } else {
                writer(host, frame)
            }
        }

        let fixture = Fixture::new();
        let interpreter = caller;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut callee = Account::default();
        callee.code = Bytes::from_static(&[0x55]);
        state.insert_account(addr(3), callee.clone());
        state.insert_account(addr(2), callee);
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        let result = ctx.top_level_call(addr(1), addr(2), U256::zero(), Bytes::new(), 5_000);
        assert!(result.is_success());
        assert_eq!(result.output.as_ref(), &[0]);
        assert_eq!(result.gas_used, 1_000);

        let entries = ctx.recorder().internal_transactions();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].rejected);
        assert_eq!(entries[0].depth, 1);
    }

    #[test]
    fn test_struct_logs_gated_by_config() {
        let mut fixture = Fixture::new();
        let interpreter = noop;
        {
            let env = fixture.env(&interpreter);
            let mut state = MemoryState::new();
            let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());
            ctx.add_struct_log(StructLog::default());
            assert!(ctx.struct_logs().is_empty());
        }

        fixture.exec_config.record_struct_logs = true;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());
        ctx.add_struct_log(StructLog { pc: 1, ..Default::default() });
        let (_, logs) = ctx.finish();
        assert_eq!(logs.len(), 1);
    }

    #[test]
    fn test_vm_supplied_entry_is_stamped() {
        let fixture = Fixture::new();
        let interpreter = noop;
        let env = fixture.env(&interpreter);
        let mut state = MemoryState::new();
        let mut ctx = ExecutionContext::new(&mut state, &env, tx_context());

        let entry = InternalTransaction::suicide(0, U256::zero(), 0, addr(4), addr(5), U256::one());
        assert_eq!(ctx.add_internal_transaction(entry), Some(0));
        let (recorder, _) = ctx.finish();
        let kept = &recorder.internal_transactions()[0];
        assert_eq!(kept.parent_hash, H256::from_low_u64_be(0x77));
        assert_eq!(kept.depth, 0);
    }
}
