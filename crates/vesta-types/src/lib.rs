//! # vesta-types
//!
//! Core blockchain types for Vesta.
//!
//! This crate provides:
//! - [`Transaction`] - immutable signed transaction with memoized hash, size and sender
//! - [`Signer`] - fork-aware sender recovery
//! - [`InternalTransaction`] - one edge of a transaction's call graph
//! - [`Block`], [`Header`] and [`Bloom`]
//! - [`Receipt`] and [`Log`]

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod block;
pub mod error;
pub mod internal;
pub mod receipt;
pub mod signer;
pub mod transaction;

pub use block::{Block, Bloom, Header, EMPTY_UNCLE_HASH};
pub use error::{TxError, TxResult};
pub use internal::{InternalKind, InternalTransaction, SELFDESTRUCT_OPCODE};
pub use receipt::{create_bloom, Log, Receipt, ReceiptOutcome, TxStatus};
pub use signer::Signer;
pub use transaction::{tx_difference, Transaction, TxData};
