//! State transition of a single message

use crate::chain::ChainReader;
use crate::context::ExecutionContext;
use crate::error::{ProcessError, ProcessResult};
use crate::gas_pool::GasPool;
use bytes::Bytes;
use rlp::RlpStream;
use vesta_crypto::keccak256;
use vesta_evm::{Interpreter, VmError};
use vesta_primitives::{Address, U256};
use vesta_state::StateLedger;
use vesta_types::{Signer, Transaction, TxResult};

/// Base cost of every transaction
const TX_GAS: u64 = 21_000;
/// Base cost of a contract creation under homestead rules
const TX_GAS_CONTRACT_CREATION: u64 = 53_000;
/// Cost per zero payload byte
const TX_DATA_ZERO_GAS: u64 = 4;
/// Cost per non-zero payload byte
const TX_DATA_NON_ZERO_GAS: u64 = 68;

/// A transaction with its sender resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Sender
    pub from: Address,
    /// Recipient, `None` for creations
    pub to: Option<Address>,
    /// Sender nonce
    pub nonce: u64,
    /// Transferred value
    pub value: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Gas price
    pub gas_price: U256,
    /// Call data or init code
    pub data: Bytes,
}

impl Message {
    /// Recover the sender of `tx` under `signer`
    pub fn from_transaction(tx: &Transaction, signer: &Signer) -> TxResult<Self> {
        Ok(Self {
            from: tx.sender(signer)?,
            to: tx.to(),
            nonce: tx.nonce(),
            value: tx.value(),
            gas_limit: tx.gas_limit(),
            gas_price: tx.gas_price(),
            data: tx.payload().clone(),
        })
    }

    /// Whether the message creates a contract
    pub fn is_create(&self) -> bool {
        self.to.is_none()
    }
}

/// Outcome of a message that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Gas charged to the sender after refunds
    pub gas_used: u64,
    /// Return data
    pub output: Bytes,
    /// Error that ended the top-level frame
    pub error: Option<VmError>,
    /// Address of the created contract
    pub contract_address: Option<Address>,
}

impl ExecutionResult {
    /// Whether the top-level frame failed
    pub fn failed(&self) -> bool {
        self.error.is_some()
    }
}

/// Gas charged before any code runs
pub fn intrinsic_gas(data: &[u8], is_create: bool, homestead: bool) -> u64 {
    let base = if is_create && homestead {
        TX_GAS_CONTRACT_CREATION
    } else {
        TX_GAS
    };
    let zeros = data.iter().filter(|b| **b == 0).count() as u64;
    let non_zeros = data.len() as u64 - zeros;
    base.saturating_add(zeros.saturating_mul(TX_DATA_ZERO_GAS))
        .saturating_add(non_zeros.saturating_mul(TX_DATA_NON_ZERO_GAS))
}

/// Address of a contract created by `sender` at `nonce`: keccak256(RLP([sender, nonce]))[12:]
pub fn create_address(sender: &Address, nonce: u64) -> Address {
    let mut stream = RlpStream::new_list(2);
    stream.append(sender);
    stream.append(&nonce);
    let hash = keccak256(&stream.out());
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}

/// Validate `msg`, buy its gas, run it and settle the gas accounts.
///
/// Errors returned here abort the block; VM failures are reported in the
/// result instead.
pub fn apply_message<S, C, I>(
    ctx: &mut ExecutionContext<'_, S, C, I>,
    gas_pool: &mut GasPool,
    msg: &Message,
) -> ProcessResult<ExecutionResult>
where
    S: StateLedger,
    C: ChainReader + ?Sized,
    I: Interpreter + ?Sized,
{
    let nonce = ctx.state().nonce(&msg.from);
    if msg.nonce < nonce {
        return Err(ProcessError::NonceTooLow {
            address: msg.from,
            expected: nonce,
            got: msg.nonce,
        });
    }
    if msg.nonce > nonce {
        return Err(ProcessError::NonceTooHigh {
            address: msg.from,
            expected: nonce,
            got: msg.nonce,
        });
    }

    gas_pool.ensure(msg.gas_limit)?;

    let gas_cost = U256::from(msg.gas_limit)
        .checked_mul(msg.gas_price)
        .ok_or(ProcessError::GasOverflow)?;
    let required = gas_cost.checked_add(msg.value).ok_or(ProcessError::GasOverflow)?;
    let available = ctx.state().balance(&msg.from);
    if available < required {
        return Err(ProcessError::InsufficientFunds {
            address: msg.from,
            required,
            available,
        });
    }
    ctx.state_mut().sub_balance(&msg.from, gas_cost);

    let intrinsic = intrinsic_gas(&msg.data, msg.is_create(), ctx.is_homestead());
    if intrinsic > msg.gas_limit {
        return Err(ProcessError::IntrinsicGas {
            required: intrinsic,
            limit: msg.gas_limit,
        });
    }
    let gas = msg.gas_limit - intrinsic;

    let frame = match msg.to {
        None => ctx.top_level_create(msg.from, msg.value, msg.data.clone(), gas),
        Some(to) => {
            ctx.state_mut().set_nonce(&msg.from, nonce + 1);
            ctx.top_level_call(msg.from, to, msg.value, msg.data.clone(), gas)
        }
    };

    let mut gas_used = intrinsic + frame.gas_used.min(gas);
    let refund = ctx.state().refund().min(gas_used / 2);
    gas_used -= refund;

    let remaining = U256::from(msg.gas_limit - gas_used) * msg.gas_price;
    ctx.state_mut().add_balance(&msg.from, remaining);
    gas_pool.sub_gas(gas_used)?;

    let beneficiary = ctx.beneficiary();
    ctx.state_mut()
        .add_balance(&beneficiary, U256::from(gas_used) * msg.gas_price);

    Ok(ExecutionResult {
        gas_used,
        output: frame.output,
        error: frame.error,
        contract_address: frame.created_address,
    })
}
