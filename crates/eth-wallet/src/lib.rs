//! A single-address Ethereum wallet.
//!
//! One spending key is derived from a seed (or imported as hex) and used to
//! produce an address, EIP-155 signed transactions and `personal_sign`
//! message signatures.

pub mod config;
pub mod error;
pub mod hd_derivation;
pub mod private_key;
pub mod wallet;

pub use chain_eth::network::Network;
pub use chain_eth::transaction::RawTransaction;
pub use config::GasConfig;
pub use error::WalletError;
pub use private_key::PrivateKey;
pub use wallet::Wallet;
