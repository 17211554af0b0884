//! Transaction error types

use thiserror::Error;
use vesta_crypto::CryptoError;

/// Errors raised while decoding, signing or recovering transactions
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TxError {
    /// Signature values fall outside the active consensus window
    #[error("invalid v, r, s values")]
    InvalidSignature,

    /// Raw signature is not 65 bytes long
    #[error("wrong size for signature: got {0}, want 65")]
    InvalidSignatureLength(usize),

    /// Underlying crypto failure
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Canonical encoding could not be decoded
    #[error("rlp decoding failed: {0}")]
    Decode(#[from] rlp::DecoderError),
}

/// Result type for transaction operations
pub type TxResult<T> = Result<T, TxError>;
