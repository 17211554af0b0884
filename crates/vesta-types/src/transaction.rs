//! Signed transactions

use crate::error::{TxError, TxResult};
use crate::signer::Signer;
use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;
use vesta_crypto::{keccak256, sign, PrivateKey};
use vesta_primitives::{Address, H256, U256};

/// Raw transaction fields
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TxData {
    /// Sender nonce
    pub nonce: u64,
    /// Price per unit of gas
    pub gas_price: U256,
    /// Gas limit
    pub gas_limit: u64,
    /// Recipient (None for contract creation)
    pub to: Option<Address>,
    /// Value to transfer
    pub value: U256,
    /// Call data or init code
    pub payload: Bytes,
    /// 27 + recovery id (0 when unsigned)
    pub v: u8,
    /// Signature r
    pub r: U256,
    /// Signature s
    pub s: U256,
}

impl TxData {
    fn append_unsigned(&self, s: &mut RlpStream) {
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas_limit);
        match &self.to {
            Some(to) => s.append(to),
            None => s.append_empty_data(),
        };
        s.append(&self.value);
        s.append(&self.payload.to_vec());
    }
}

/// Immutable signed transaction.
///
/// Hash, encoded size and sender are computed at most once and cached;
/// concurrent readers all observe the first stored value.
#[derive(Clone)]
pub struct Transaction {
    data: TxData,
    hash: OnceLock<H256>,
    size: OnceLock<usize>,
    from: OnceLock<Address>,
}

impl Transaction {
    /// Wrap raw fields
    pub fn from_data(data: TxData) -> Self {
        Self {
            data,
            hash: OnceLock::new(),
            size: OnceLock::new(),
            from: OnceLock::new(),
        }
    }

    /// Create an unsigned message call
    pub fn new(
        nonce: u64,
        to: Address,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self::from_data(TxData {
            nonce,
            gas_price,
            gas_limit,
            to: Some(to),
            value,
            payload: payload.into(),
            ..Default::default()
        })
    }

    /// Create an unsigned contract creation
    pub fn new_contract_creation(
        nonce: u64,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        payload: impl Into<Bytes>,
    ) -> Self {
        Self::from_data(TxData {
            nonce,
            gas_price,
            gas_limit,
            to: None,
            value,
            payload: payload.into(),
            ..Default::default()
        })
    }

    /// Decode from canonical RLP bytes
    pub fn decode_bytes(bytes: &[u8]) -> TxResult<Self> {
        Ok(rlp::decode(bytes)?)
    }

    /// Raw fields
    pub fn data(&self) -> &TxData {
        &self.data
    }

    /// Sender nonce
    pub fn nonce(&self) -> u64 {
        self.data.nonce
    }

    /// Gas price
    pub fn gas_price(&self) -> U256 {
        self.data.gas_price
    }

    /// Gas limit
    pub fn gas_limit(&self) -> u64 {
        self.data.gas_limit
    }

    /// Recipient, `None` for creations
    pub fn to(&self) -> Option<Address> {
        self.data.to
    }

    /// Transferred value
    pub fn value(&self) -> U256 {
        self.data.value
    }

    /// Call data or init code
    pub fn payload(&self) -> &Bytes {
        &self.data.payload
    }

    /// Check for contract creation
    pub fn is_contract_creation(&self) -> bool {
        self.data.to.is_none()
    }

    /// Raw `(v, r, s)`
    pub fn signature_values(&self) -> (u8, U256, U256) {
        (self.data.v, self.data.r, self.data.s)
    }

    /// Keccak-256 of the full RLP encoding
    pub fn hash(&self) -> H256 {
        *self.hash.get_or_init(|| keccak256(&rlp::encode(self)))
    }

    /// Digest that gets signed: keccak of the six unsigned fields
    pub fn sig_hash(&self) -> H256 {
        let mut s = RlpStream::new_list(6);
        self.data.append_unsigned(&mut s);
        keccak256(&s.out())
    }

    /// Encoded size in bytes
    pub fn size(&self) -> usize {
        *self.size.get_or_init(|| rlp::encode(self).len())
    }

    /// Maximum spend: `value + gas_price * gas_limit`
    pub fn cost(&self) -> U256 {
        self.data
            .gas_price
            .saturating_mul(U256::from(self.data.gas_limit))
            .saturating_add(self.data.value)
    }

    /// Return a copy carrying the given 65-byte `r || s || recovery id` signature
    pub fn with_signature(&self, sig: &[u8]) -> TxResult<Transaction> {
        if sig.len() != 65 {
            return Err(TxError::InvalidSignatureLength(sig.len()));
        }
        let mut data = self.data.clone();
        data.r = U256::from_big_endian(&sig[..32]);
        data.s = U256::from_big_endian(&sig[32..64]);
        data.v = sig[64].saturating_add(27);
        Ok(Transaction::from_data(data))
    }

    /// Sign with `key`, returning a new transaction
    pub fn sign(&self, key: &PrivateKey) -> TxResult<Transaction> {
        let signature = sign(&self.sig_hash(), key)?;
        self.with_signature(&signature.to_bytes())
    }

    /// Recover the sender under `signer`
    pub fn sender(&self, signer: &Signer) -> TxResult<Address> {
        signer.sender(self)
    }

    pub(crate) fn sender_cache(&self) -> &OnceLock<Address> {
        &self.from
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Transaction {}

impl fmt::Debug for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transaction")
            .field("hash", &self.hash())
            .field("data", &self.data)
            .finish()
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to = match self.data.to {
            Some(to) => to.to_hex(),
            None => "[contract creation]".to_string(),
        };
        let from = match self.from.get() {
            Some(from) => from.to_hex(),
            None => "[unrecovered]".to_string(),
        };
        writeln!(f, "TX({})", self.hash())?;
        writeln!(f, "  Contract: {}", self.is_contract_creation())?;
        writeln!(f, "  From:     {}", from)?;
        writeln!(f, "  To:       {}", to)?;
        writeln!(f, "  Nonce:    {}", self.data.nonce)?;
        writeln!(f, "  GasPrice: {}", self.data.gas_price)?;
        writeln!(f, "  GasLimit: {}", self.data.gas_limit)?;
        writeln!(f, "  Value:    {}", self.data.value)?;
        writeln!(f, "  Data:     0x{}", hex::encode(&self.data.payload))?;
        writeln!(f, "  V:        {:#x}", self.data.v)?;
        writeln!(f, "  R:        {:#x}", self.data.r)?;
        write!(f, "  S:        {:#x}", self.data.s)
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(9);
        self.data.append_unsigned(s);
        s.append(&self.data.v);
        s.append(&self.data.r);
        s.append(&self.data.s);
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp<'_>) -> Result<Self, DecoderError> {
        if rlp.item_count()? != 9 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        let to_item = rlp.at(3)?;
        let to = if to_item.is_empty() {
            None
        } else {
            Some(to_item.as_val()?)
        };
        let payload: Vec<u8> = rlp.val_at(5)?;
        let data = TxData {
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas_limit: rlp.val_at(2)?,
            to,
            value: rlp.val_at(4)?,
            payload: Bytes::from(payload),
            v: rlp.val_at(6)?,
            r: rlp.val_at(7)?,
            s: rlp.val_at(8)?,
        };
        let tx = Transaction::from_data(data);
        let _ = tx.size.set(rlp.as_raw().len());
        Ok(tx)
    }
}

/// Transactions in `a` whose hash does not appear in `b`, in `a`'s order
pub fn tx_difference(a: &[Transaction], b: &[Transaction]) -> Vec<Transaction> {
    let remove: HashSet<H256> = b.iter().map(Transaction::hash).collect();
    a.iter()
        .filter(|tx| !remove.contains(&tx.hash()))
        .cloned()
        .collect()
}
