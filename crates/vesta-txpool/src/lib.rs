//! # vesta-txpool
//!
//! Orders a candidate set of transactions for block inclusion.
//!
//! Transactions are taken highest gas price first while every sender's
//! transactions stay in nonce order. No validation is performed beyond
//! sender recovery, and nothing is executed.
//!
//! ## Usage
//!
//! ```ignore
//! use vesta_txpool::sort_by_price_and_nonce;
//!
//! let ordered = sort_by_price_and_nonce(candidates, &Signer::Homestead)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ordering;

pub use error::{TxPoolError, TxPoolResult};
pub use ordering::{
    order_by_price_and_nonce, sort_by_price_and_nonce, PooledTransaction,
    TransactionsByPriceAndNonce,
};
