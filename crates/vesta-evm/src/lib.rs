//! # vesta-evm
//!
//! The seam between the execution core and a virtual machine.
//!
//! The instruction interpreter itself lives outside this workspace. It is
//! driven through [`Interpreter::run`] and talks back to the chain through
//! the [`Host`] implemented by the execution context.
//!
//! This crate provides:
//! - [`Host`] and [`Interpreter`] traits
//! - [`Frame`] / [`FrameResult`] describing one call or create frame
//! - [`VmError`] and its gas semantics
//! - [`StructLog`] diagnostic trace entries

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod frame;
mod host;
mod trace;

pub use error::{VmError, VmResult};
pub use frame::{Frame, FrameKind, FrameResult};
pub use host::{Host, Interpreter, SnapshotId};
pub use trace::StructLog;

/// Maximum nesting of call/create frames
pub const CALL_DEPTH_LIMIT: usize = 1024;

/// Gas charged per byte of deployed contract code
pub const CREATE_DATA_GAS: u64 = 200;
