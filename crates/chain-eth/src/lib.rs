//! Ethereum chain support for the single-address wallet.
//!
//! This crate provides:
//! - Ethereum address derivation from secp256k1 public keys (with EIP-55 checksums)
//! - Recoverable secp256k1 signatures and the two `v` encodings Ethereum uses
//! - EIP-191 `personal_sign` message hashing and signing
//! - EIP-155 legacy transaction encoding and signing
//! - Network parameters (BIP-44 coin type, chain ID) and unit conversion

pub mod address;
pub mod encoding;
pub mod error;
pub mod message;
pub mod network;
pub mod signature;
pub mod transaction;
pub mod units;

pub use error::EthError;
pub use network::Network;
pub use signature::{RecoverableSignature, VEncoding};
pub use transaction::{RawTransaction, SignTransaction, SignedTransaction};
