//! Fork-aware sender recovery

use crate::error::{TxError, TxResult};
use crate::transaction::Transaction;
use vesta_crypto::{recover_address, validate_signature_values, Signature};
use vesta_primitives::{u256_to_be_bytes, Address};

/// Signature rules in force at a given block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signer {
    /// Accepts any `s` in `[1, n)`
    Frontier,
    /// Additionally requires `s <= n/2`
    Homestead,
}

impl Signer {
    /// Pick the signer for a homestead flag
    pub fn new(homestead: bool) -> Self {
        if homestead {
            Signer::Homestead
        } else {
            Signer::Frontier
        }
    }

    /// Whether the homestead low-s rule applies
    pub fn is_homestead(&self) -> bool {
        matches!(self, Signer::Homestead)
    }

    /// Recover the sender of `tx`.
    ///
    /// Signature values are checked against this signer's window on every
    /// call; the recovered address itself is cached on the transaction.
    pub fn sender(&self, tx: &Transaction) -> TxResult<Address> {
        let (v, r, s) = tx.signature_values();
        let recovery_id = v.wrapping_sub(27);
        if !validate_signature_values(recovery_id, &r, &s, self.is_homestead()) {
            return Err(TxError::InvalidSignature);
        }
        if let Some(from) = tx.sender_cache().get() {
            return Ok(*from);
        }

        let signature = Signature::new(u256_to_be_bytes(&r), u256_to_be_bytes(&s), v);
        let from = recover_address(&tx.sig_hash(), &signature)?;
        Ok(*tx.sender_cache().get_or_init(|| from))
    }
}
