//! VM error types

use thiserror::Error;

/// Errors that end a frame. None of them abort the enclosing block.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Out of gas
    #[error("out of gas")]
    OutOfGas,

    /// REVERT executed
    #[error("execution reverted")]
    Reverted,

    /// Invalid opcode
    #[error("invalid opcode: 0x{0:02x}")]
    InvalidOpcode(u8),

    /// Call depth exceeded
    #[error("max call depth exceeded")]
    CallDepthExceeded,

    /// Insufficient balance for transfer
    #[error("insufficient balance for transfer")]
    InsufficientBalance,

    /// Write in static context
    #[error("write protection")]
    WriteProtection,

    /// Contract creation collision
    #[error("contract address collision")]
    ContractAddressCollision,

    /// Not enough gas left to store the deployed code
    #[error("contract creation code storage out of gas")]
    CodeStoreOutOfGas,
}

impl VmError {
    /// Whether the failing frame forfeits all of its gas.
    ///
    /// `Reverted` hands unused gas back to the caller, and the pre-flight
    /// checks (`CallDepthExceeded`, `InsufficientBalance`) fail before any
    /// gas is spent.
    pub fn consumes_all_gas(&self) -> bool {
        !matches!(
            self,
            VmError::Reverted | VmError::CallDepthExceeded | VmError::InsufficientBalance
        )
    }
}

/// Result type for VM operations
pub type VmResult<T> = Result<T, VmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(format!("{}", VmError::OutOfGas), "out of gas");
        assert_eq!(format!("{}", VmError::Reverted), "execution reverted");
        assert_eq!(format!("{}", VmError::InvalidOpcode(0xFE)), "invalid opcode: 0xfe");
        assert_eq!(format!("{}", VmError::CallDepthExceeded), "max call depth exceeded");
        assert_eq!(format!("{}", VmError::InsufficientBalance), "insufficient balance for transfer");
        assert_eq!(format!("{}", VmError::WriteProtection), "write protection");
        assert_eq!(format!("{}", VmError::ContractAddressCollision), "contract address collision");
        assert_eq!(
            format!("{}", VmError::CodeStoreOutOfGas),
            "contract creation code storage out of gas"
        );
    }

    #[test]
    fn test_gas_semantics() {
        assert!(!VmError::Reverted.consumes_all_gas());
        assert!(VmError::OutOfGas.consumes_all_gas());
        assert!(VmError::InvalidOpcode(0xfe).consumes_all_gas());
        assert!(VmError::WriteProtection.consumes_all_gas());
        assert!(!VmError::CallDepthExceeded.consumes_all_gas());
        assert!(!VmError::InsufficientBalance.consumes_all_gas());
    }
}
