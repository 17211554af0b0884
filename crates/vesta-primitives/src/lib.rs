//! # vesta-primitives
//!
//! Fixed-size primitive types shared by every Vesta crate.
//!
//! - [`Address`]: 20-byte account address
//! - [`H256`]: 32-byte hash
//! - [`U256`]: 256-bit unsigned integer (re-exported from `primitive-types`)
//!
//! RLP and serde implementations live behind the `rlp` and `serde` features.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

pub use primitive_types::U256;

/// Convert a `U256` into its 32-byte big-endian form.
pub fn u256_to_be_bytes(value: &U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    value.to_big_endian(&mut out);
    out
}
