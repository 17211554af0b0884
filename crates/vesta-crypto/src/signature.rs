//! Recoverable secp256k1 signatures

use crate::{keccak256, CryptoError};
use k256::ecdsa::{RecoveryId, Signature as K256Signature, SigningKey, VerifyingKey};
use vesta_primitives::{u256_to_be_bytes, Address, H256, U256};

/// secp256k1 group order n
const SECP256K1_N: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B,
    0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n / 2, the homestead upper bound for s
const SECP256K1_N_DIV_2: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D,
    0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Public key
pub type PublicKey = VerifyingKey;

/// Private key
pub type PrivateKey = SigningKey;

/// Recoverable signature, `v` in the 27/28 convention
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    /// r component
    pub r: [u8; 32],
    /// s component
    pub s: [u8; 32],
    /// 27 + recovery id
    pub v: u8,
}

impl Signature {
    /// Create from components
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Signature { r, s, v }
    }

    /// Recovery id (0 or 1 for well-formed signatures)
    pub fn recovery_id(&self) -> u8 {
        self.v.saturating_sub(27)
    }

    /// r || s || (v - 27)
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.recovery_id();
        bytes
    }

    /// Parse r || s || recovery id
    pub fn from_bytes(bytes: &[u8; 65]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Signature { r, s, v: bytes[64].saturating_add(27) }
    }

    /// s ≤ n/2
    pub fn is_low_s(&self) -> bool {
        U256::from_big_endian(&self.s) <= half_order()
    }
}

fn curve_order() -> U256 {
    U256::from_big_endian(&SECP256K1_N)
}

fn half_order() -> U256 {
    U256::from_big_endian(&SECP256K1_N_DIV_2)
}

/// Check signature values against the consensus window.
///
/// `r` and `s` must lie in `[1, n)` and the recovery id must be 0 or 1.
/// With `homestead` set, `s` must additionally be at most `n/2`.
pub fn validate_signature_values(recovery_id: u8, r: &U256, s: &U256, homestead: bool) -> bool {
    if r.is_zero() || s.is_zero() {
        return false;
    }
    if homestead && *s > half_order() {
        return false;
    }
    let n = curve_order();
    *r < n && *s < n && (recovery_id == 0 || recovery_id == 1)
}

/// Sign a 32-byte digest, normalizing to low-s
pub fn sign(message_hash: &H256, private_key: &PrivateKey) -> Result<Signature, CryptoError> {
    let (signature, recovery_id) = private_key
        .sign_prehash_recoverable(message_hash.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    let r: [u8; 32] = signature.r().to_bytes().into();
    let s: [u8; 32] = signature.s().to_bytes().into();
    let (s, recovery_id) = normalize_s(s, recovery_id.to_byte());

    Ok(Signature { r, s, v: recovery_id + 27 })
}

/// Flip a high s into the lower half of the curve order, toggling the recovery id
fn normalize_s(s: [u8; 32], recovery_id: u8) -> ([u8; 32], u8) {
    let value = U256::from_big_endian(&s);
    if value > half_order() && value < curve_order() {
        (u256_to_be_bytes(&(curve_order() - value)), recovery_id ^ 1)
    } else {
        (s, recovery_id)
    }
}

/// Recover the public key that produced `signature` over `message_hash`.
///
/// High-s signatures are accepted here; callers enforce the homestead
/// window through [`validate_signature_values`].
pub fn recover_public_key(
    message_hash: &H256,
    signature: &Signature,
) -> Result<PublicKey, CryptoError> {
    let (s, recovery_id) = normalize_s(signature.s, signature.recovery_id());
    let k256_sig = K256Signature::from_scalars(signature.r, s)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;
    let recovery_id =
        RecoveryId::from_byte(recovery_id).ok_or(CryptoError::InvalidRecoveryId(recovery_id))?;

    VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &k256_sig, recovery_id)
        .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))
}

/// Derive the account address of a public key: last 20 bytes of keccak(x || y)
pub fn public_key_to_address(public_key: &PublicKey) -> Address {
    let encoded = public_key.to_encoded_point(false);
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&hash.as_bytes()[12..]);
    Address::from_bytes(bytes)
}

/// Recover the signer address directly
pub fn recover_address(message_hash: &H256, signature: &Signature) -> Result<Address, CryptoError> {
    recover_public_key(message_hash, signature).map(|key| public_key_to_address(&key))
}
