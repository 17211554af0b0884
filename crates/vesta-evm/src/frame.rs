//! Call and create frames

use crate::error::VmError;
use bytes::Bytes;
use vesta_primitives::{Address, U256};

/// How a frame was entered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameKind {
    /// CALL, or the top-level message call
    Call,
    /// CALLCODE: callee code in the caller's storage context
    CallCode,
    /// DELEGATECALL: callee code with the caller's context and value
    DelegateCall,
    /// STATICCALL: no state modification allowed
    StaticCall,
    /// CREATE, or the top-level contract creation
    Create,
}

/// One execution frame handed to the interpreter
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Caller seen by the code (`CALLER`)
    pub caller: Address,
    /// Account whose storage and balance the code operates on
    pub address: Address,
    /// Account the code was loaded from
    pub code_address: Address,
    /// Value visible to the code (`CALLVALUE`)
    pub value: U256,
    /// Call data (empty for creations)
    pub input: Bytes,
    /// Gas available to the frame
    pub gas: u64,
    /// Code to run (init code for creations)
    pub code: Bytes,
    /// Writes are forbidden
    pub is_static: bool,
    /// Entry kind
    pub kind: FrameKind,
}

impl Frame {
    /// Frame for a plain call into `address`
    pub fn call(caller: Address, address: Address, value: U256, input: Bytes, gas: u64, code: Bytes) -> Self {
        Self {
            caller,
            address,
            code_address: address,
            value,
            input,
            gas,
            code,
            is_static: false,
            kind: FrameKind::Call,
        }
    }

    /// Frame running init code for a new contract at `address`
    pub fn create(caller: Address, address: Address, value: U256, init_code: Bytes, gas: u64) -> Self {
        Self {
            caller,
            address,
            code_address: address,
            value,
            input: Bytes::new(),
            gas,
            code: init_code,
            is_static: false,
            kind: FrameKind::Create,
        }
    }
}

/// Outcome of running a frame
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameResult {
    /// Gas consumed by the frame
    pub gas_used: u64,
    /// Return data, revert data, or deployed code for creations
    pub output: Bytes,
    /// Error that ended the frame
    pub error: Option<VmError>,
    /// Address of the new contract for successful creations
    pub created_address: Option<Address>,
}

impl FrameResult {
    /// Successful frame
    pub fn success(gas_used: u64, output: Bytes) -> Self {
        Self {
            gas_used,
            output,
            error: None,
            created_address: None,
        }
    }

    /// Frame ended by REVERT; unused gas goes back to the caller
    pub fn revert(gas_used: u64, output: Bytes) -> Self {
        Self {
            gas_used,
            output,
            error: Some(VmError::Reverted),
            created_address: None,
        }
    }

    /// Frame ended by `error` after using `gas_used`
    pub fn failure(gas_used: u64, error: VmError) -> Self {
        Self {
            gas_used,
            output: Bytes::new(),
            error: Some(error),
            created_address: None,
        }
    }

    /// Whether the frame completed without error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Gas left out of `limit`
    pub fn gas_left(&self, limit: u64) -> u64 {
        limit.saturating_sub(self.gas_used)
    }
}
