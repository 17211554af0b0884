//! Diagnostic step traces

use vesta_primitives::U256;

/// One interpreter step, recorded when struct logging is enabled
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructLog {
    /// Program counter
    pub pc: u64,
    /// Opcode byte
    pub op: u8,
    /// Gas remaining before the step
    pub gas: u64,
    /// Gas charged by the step
    pub gas_cost: u64,
    /// Call depth
    pub depth: usize,
    /// Stack, bottom first
    pub stack: Vec<U256>,
    /// Memory contents
    pub memory: Vec<u8>,
    /// Error raised by the step
    pub error: Option<String>,
}
