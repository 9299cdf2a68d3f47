use std::fmt;

use chain_eth::address::address_of;
use chain_eth::encoding::strip_hex_prefix;
use k256::ecdsa::{SigningKey, VerifyingKey};
use zeroize::Zeroize;

use crate::error::WalletError;

/// The wallet's secp256k1 spending key.
///
/// Validated on construction; the inner scalar is zeroized on drop by k256.
/// `Debug` never prints it.
#[derive(Clone)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Wraps a raw scalar, rejecting zero and values at or above the curve order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, WalletError> {
        SigningKey::from_bytes(bytes.into())
            .map(Self)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))
    }

    /// Parses 64 hex characters, with or without a `0x` prefix, in any case.
    pub fn from_hex(hex_key: &str) -> Result<Self, WalletError> {
        let digits = strip_hex_prefix(hex_key.trim());
        if digits.len() != 64 {
            return Err(WalletError::InvalidPrivateKey(format!(
                "expected 64 hex characters, got {}",
                digits.len()
            )));
        }

        let mut bytes = [0u8; 32];
        let key = hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| WalletError::InvalidPrivateKey(e.to_string()))
            .and_then(|()| Self::from_bytes(&bytes));
        bytes.zeroize();
        key
    }

    /// Lowercase hex without a `0x` prefix.
    pub fn to_hex(&self) -> String {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.0.to_bytes());
        let encoded = hex::encode(bytes);
        bytes.zeroize();
        encoded
    }

    pub fn signing_key(&self) -> &SigningKey {
        &self.0
    }

    pub fn public_key(&self) -> VerifyingKey {
        *self.0.verifying_key()
    }

    /// EIP-55 checksummed address of this key.
    pub fn address(&self) -> String {
        address_of(self.0.verifying_key())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}
