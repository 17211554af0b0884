//! # vesta-state
//!
//! World-state access for the execution core.
//!
//! - [`StateLedger`]: the trait the processor, execution context and engine
//!   drive; snapshot/restore is part of the contract
//! - [`MemoryState`]: in-memory ledger whose snapshots are copy-on-write
//! - [`Account`]: per-address record

#![warn(missing_docs)]
#![warn(clippy::all)]

mod account;
mod memory;
mod traits;

pub use account::{Account, EMPTY_CODE_HASH};
pub use memory::{MemorySnapshot, MemoryState};
pub use traits::StateLedger;
