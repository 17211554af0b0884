//! # vesta-crypto
//!
//! Cryptographic primitives for Vesta.
//!
//! - Keccak-256 hashing
//! - secp256k1 recoverable signing (low-s normalized)
//! - Public key and sender address recovery
//! - Signature-value validation for the frontier and homestead windows

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;

pub use error::CryptoError;
pub use hash::keccak256;
pub use signature::{
    public_key_to_address, recover_address, recover_public_key, sign, validate_signature_values,
    PrivateKey, PublicKey, Signature,
};
