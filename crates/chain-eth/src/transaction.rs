use alloy_primitives::U256;
use alloy_rlp::{Encodable, RlpEncodable};
use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use crate::address::parse_address;
use crate::encoding::to_prefixed_hex;
use crate::error::EthError;
use crate::signature::{sign_prehash, RecoverableSignature, VEncoding};

/// The caller-supplied part of a value transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    /// Recipient address as a 0x-prefixed hex string.
    pub to: String,
    /// Transfer value in wei.
    pub value: U256,
    pub nonce: u64,
    /// Calldata (empty for simple ETH transfers).
    pub data: Vec<u8>,
}

impl RawTransaction {
    pub fn new(to: impl Into<String>, value: U256, nonce: u64) -> Self {
        Self {
            to: to.into(),
            value,
            nonce,
            data: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }
}

/// A raw transaction plus the gas parameters it is signed with.
///
/// Built fresh for every signing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignTransaction {
    pub raw_transaction: RawTransaction,
    /// Gas price in wei.
    pub gas_price: U256,
    pub gas_limit: u64,
}

/// A signed legacy transaction ready for broadcast.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    /// RLP-encoded `[nonce, gasPrice, gasLimit, to, value, data, v, r, s]`.
    pub raw: Vec<u8>,
    /// Keccak-256 of `raw`.
    pub hash: [u8; 32],
    pub signature: RecoverableSignature,
    /// EIP-155 encoded `v`.
    pub v: u64,
}

impl SignedTransaction {
    pub fn raw_hex(&self) -> String {
        to_prefixed_hex(&self.raw)
    }

    pub fn hash_hex(&self) -> String {
        to_prefixed_hex(self.hash)
    }
}

/// Signs legacy transactions with EIP-155 replay protection for one chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip155Signer {
    chain_id: u64,
}

impl Eip155Signer {
    pub fn new(chain_id: u64) -> Self {
        Self { chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn encoding(&self) -> VEncoding {
        VEncoding::eip155(self.chain_id)
    }

    /// Encodes the signing pre-image
    /// `rlp([nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0])`.
    pub fn signing_payload(&self, tx: &SignTransaction) -> Result<Vec<u8>, EthError> {
        let raw = &tx.raw_transaction;
        let fields = UnsignedTxFields {
            nonce: raw.nonce,
            gas_price: tx.gas_price.into(),
            gas_limit: tx.gas_limit,
            to: parse_to_bytes(&raw.to)?,
            value: raw.value.into(),
            data: RlpBytes(raw.data.clone()),
            chain_id: self.chain_id,
            empty_r: 0,
            empty_s: 0,
        };

        let mut rlp_buf = Vec::with_capacity(fields.length());
        fields.encode(&mut rlp_buf);
        Ok(rlp_buf)
    }

    /// Keccak-256 of [`Self::signing_payload`].
    pub fn hash(&self, tx: &SignTransaction) -> Result<[u8; 32], EthError> {
        let payload = self.signing_payload(tx)?;
        Ok(Keccak256::digest(&payload).into())
    }

    /// Signs the transaction and serializes it with `v = chainId * 2 + 35 + recId`.
    pub fn sign(
        &self,
        tx: &SignTransaction,
        signing_key: &SigningKey,
    ) -> Result<SignedTransaction, EthError> {
        let hash = self.hash(tx)?;
        let signature = sign_prehash(signing_key, &hash)?;
        let v = self.encoding().encode(signature.recovery_id)?;

        let raw_tx = &tx.raw_transaction;
        let fields = SignedTxFields {
            nonce: raw_tx.nonce,
            gas_price: tx.gas_price.into(),
            gas_limit: tx.gas_limit,
            to: parse_to_bytes(&raw_tx.to)?,
            value: raw_tx.value.into(),
            data: RlpBytes(raw_tx.data.clone()),
            v,
            r: signature.r.into(),
            s: signature.s.into(),
        };

        let mut raw = Vec::with_capacity(fields.length());
        fields.encode(&mut raw);
        let tx_hash: [u8; 32] = Keccak256::digest(&raw).into();

        Ok(SignedTransaction {
            raw,
            hash: tx_hash,
            signature,
            v,
        })
    }

    /// Recovers the sender of a signature produced by [`Self::sign`].
    pub fn sender(
        &self,
        tx: &SignTransaction,
        signature: &RecoverableSignature,
    ) -> Result<String, EthError> {
        let hash = self.hash(tx)?;
        let key = signature.recover(&hash)?;
        Ok(crate::address::address_of(&key))
    }
}

// ---------------------------------------------------------------------------
// RLP-encodable structures
// ---------------------------------------------------------------------------

/// EIP-155 signing pre-image fields.
#[derive(RlpEncodable)]
struct UnsignedTxFields {
    nonce: u64,
    gas_price: RlpU256,
    gas_limit: u64,
    to: RlpAddress,
    value: RlpU256,
    data: RlpBytes,
    chain_id: u64,
    empty_r: u8,
    empty_s: u8,
}

/// Signed legacy transaction fields.
#[derive(RlpEncodable)]
struct SignedTxFields {
    nonce: u64,
    gas_price: RlpU256,
    gas_limit: u64,
    to: RlpAddress,
    value: RlpU256,
    data: RlpBytes,
    v: u64,
    r: RlpU256,
    s: RlpU256,
}

/// Wrapper for a 20-byte Ethereum address that implements `Encodable`.
#[derive(Debug, Clone)]
struct RlpAddress([u8; 20]);

impl Encodable for RlpAddress {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// Byte string payload; encodes as an RLP string rather than a list.
#[derive(Debug, Clone)]
struct RlpBytes(Vec<u8>);

impl Encodable for RlpBytes {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.0.as_slice().encode(out);
    }

    fn length(&self) -> usize {
        self.0.as_slice().length()
    }
}

/// Wrapper for a 256-bit integer (32 bytes) that encodes as minimal big-endian
/// bytes with leading zeros stripped (standard RLP integer encoding).
#[derive(Debug, Clone)]
struct RlpU256([u8; 32]);

impl RlpU256 {
    fn trimmed(&self) -> &[u8] {
        let start = self.0.iter().position(|&b| b != 0).unwrap_or(32);
        &self.0[start..]
    }
}

impl From<[u8; 32]> for RlpU256 {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<U256> for RlpU256 {
    fn from(value: U256) -> Self {
        Self(value.to_be_bytes::<32>())
    }
}

impl Encodable for RlpU256 {
    fn encode(&self, out: &mut dyn alloy_rlp::BufMut) {
        self.trimmed().encode(out);
    }

    fn length(&self) -> usize {
        self.trimmed().length()
    }
}

/// Parses the recipient into the RLP wrapper, mapping failures to encoding
/// errors since they surface while assembling the payload.
fn parse_to_bytes(address: &str) -> Result<RlpAddress, EthError> {
    let parsed = parse_address(address)
        .map_err(|e| EthError::EncodingError(format!("recipient: {e}")))?;
    let mut addr = [0u8; 20];
    addr.copy_from_slice(parsed.as_slice());
    Ok(RlpAddress(addr))
}
