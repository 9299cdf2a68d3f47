//! Recoverable secp256k1 signatures and Ethereum's `v` encodings.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

use crate::error::EthError;

/// `v` offset used by `personal_sign` and pre-EIP-155 transactions.
pub const LEGACY_V_OFFSET: u8 = 27;

/// How the recovery id is folded into the signature's `v` value.
///
/// Each signer picks its policy explicitly; the two are never inferred from
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VEncoding {
    /// `v = recovery_id + offset` (`offset` is 27 for `personal_sign`).
    Legacy { offset: u8 },
    /// `v = chain_id * 2 + 35 + recovery_id`.
    Eip155 { chain_id: u64 },
}

impl VEncoding {
    pub const PERSONAL_SIGN: VEncoding = VEncoding::Legacy {
        offset: LEGACY_V_OFFSET,
    };

    pub fn eip155(chain_id: u64) -> Self {
        VEncoding::Eip155 { chain_id }
    }

    /// Folds a recovery id (0 or 1) into `v`.
    pub fn encode(&self, recovery_id: u8) -> Result<u64, EthError> {
        if recovery_id > 1 {
            return Err(EthError::SigningError(format!(
                "recovery id {recovery_id} is not representable"
            )));
        }
        match *self {
            VEncoding::Legacy { offset } => Ok(u64::from(offset) + u64::from(recovery_id)),
            VEncoding::Eip155 { chain_id } => chain_id
                .checked_mul(2)
                .and_then(|v| v.checked_add(35 + u64::from(recovery_id)))
                .ok_or_else(|| {
                    EthError::EncodingError(format!("chain id {chain_id} too large for EIP-155"))
                }),
        }
    }

    /// Recovers the recovery id from an encoded `v`.
    pub fn decode(&self, v: u64) -> Result<u8, EthError> {
        let base = match *self {
            VEncoding::Legacy { offset } => u64::from(offset),
            VEncoding::Eip155 { chain_id } => chain_id
                .checked_mul(2)
                .and_then(|b| b.checked_add(35))
                .ok_or_else(|| {
                    EthError::InvalidSignature(format!("chain id {chain_id} too large"))
                })?,
        };
        match v.checked_sub(base) {
            Some(id @ (0 | 1)) => Ok(id as u8),
            _ => Err(EthError::InvalidSignature(format!(
                "v = {v} does not match {self:?}"
            ))),
        }
    }
}

/// An ECDSA signature over a 32-byte prehash with its raw recovery id.
///
/// The recovery id is the curve library's 0/1 value; callers must pass it
/// through a [`VEncoding`] before handing it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// Encodes as `r || s || v` for encodings whose `v` fits in one byte.
    pub fn to_rsv_bytes(&self, encoding: VEncoding) -> Result<[u8; 65], EthError> {
        let v = encoding.encode(self.recovery_id)?;
        let v = u8::try_from(v).map_err(|_| {
            EthError::EncodingError(format!("v = {v} does not fit in a single byte"))
        })?;

        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = v;
        Ok(out)
    }

    /// Parses `r || s || v`, decoding `v` with the given policy.
    pub fn from_rsv_bytes(bytes: &[u8], encoding: VEncoding) -> Result<Self, EthError> {
        if bytes.len() != 65 {
            return Err(EthError::InvalidSignature(format!(
                "expected 65 bytes, got {}",
                bytes.len()
            )));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        let recovery_id = encoding.decode(u64::from(bytes[64]))?;
        Ok(Self { r, s, recovery_id })
    }

    /// Recovers the verifying key that produced this signature over `prehash`.
    pub fn recover(&self, prehash: &[u8; 32]) -> Result<VerifyingKey, EthError> {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&self.r);
        rs[32..].copy_from_slice(&self.s);
        let signature =
            Signature::from_slice(&rs).map_err(|e| EthError::InvalidSignature(e.to_string()))?;
        let recovery_id = RecoveryId::from_byte(self.recovery_id).ok_or_else(|| {
            EthError::InvalidSignature(format!("bad recovery id {}", self.recovery_id))
        })?;

        VerifyingKey::recover_from_prehash(prehash, &signature, recovery_id)
            .map_err(|e| EthError::InvalidSignature(e.to_string()))
    }
}

/// Signs a 32-byte prehash with RFC 6979 deterministic nonces.
///
/// k256 emits low-s signatures and adjusts the recovery id to match.
pub fn sign_prehash(
    signing_key: &SigningKey,
    prehash: &[u8; 32],
) -> Result<RecoverableSignature, EthError> {
    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(prehash)
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    if recovery_id.is_x_reduced() {
        return Err(EthError::SigningError(
            "signature r overflowed the curve order".into(),
        ));
    }

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature.r().to_bytes());
    s.copy_from_slice(&signature.s().to_bytes());

    Ok(RecoverableSignature {
        r,
        s,
        recovery_id: recovery_id.is_y_odd() as u8,
    })
}
