use alloy_primitives::Address;
use k256::ecdsa::VerifyingKey;
use sha3::{Digest, Keccak256};

use crate::encoding::strip_hex_prefix;
use crate::error::EthError;

/// Derives the EIP-55 checksummed address of a secp256k1 verifying key.
pub fn address_of(public_key: &VerifyingKey) -> String {
    address_bytes_of(public_key).to_checksum(None)
}

/// Derives the raw 20-byte address of a secp256k1 verifying key.
///
/// Keccak-256 over the 64-byte uncompressed point (the `0x04` tag dropped),
/// keeping the last 20 bytes.
pub fn address_bytes_of(public_key: &VerifyingKey) -> Address {
    let point = public_key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Parses a `0x`-prefixed address.
///
/// All-lowercase and all-uppercase inputs are accepted as-is; mixed case must
/// carry a valid EIP-55 checksum.
pub fn parse_address(address: &str) -> Result<Address, EthError> {
    if !address.starts_with("0x") && !address.starts_with("0X") {
        return Err(EthError::InvalidAddress(
            "address must start with 0x".into(),
        ));
    }
    let hex_part = strip_hex_prefix(address);

    if hex_part.len() != 40 {
        return Err(EthError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_part.len()
        )));
    }

    let is_all_lower = !hex_part.chars().any(|c| c.is_ascii_uppercase());
    let is_all_upper = !hex_part.chars().any(|c| c.is_ascii_lowercase());
    if is_all_lower || is_all_upper {
        return hex_part
            .parse::<Address>()
            .map_err(|e| EthError::InvalidAddress(format!("invalid hex: {e}")));
    }

    Address::parse_checksummed(format!("0x{hex_part}"), None)
        .map_err(|e| EthError::InvalidAddress(format!("{address}: {e}")))
}

/// Returns `true` if `address` would be accepted by [`parse_address`].
pub fn is_valid_address(address: &str) -> bool {
    parse_address(address).is_ok()
}
