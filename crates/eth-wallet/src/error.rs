use chain_eth::error::EthError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Encoding failed: {0}")]
    Encoding(String),

    #[error("Signing failed: {0}")]
    Signing(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<EthError> for WalletError {
    fn from(e: EthError) -> Self {
        match e {
            EthError::InvalidAddress(_) | EthError::EncodingError(_) => {
                WalletError::Encoding(e.to_string())
            }
            EthError::InvalidPrivateKey(_) => WalletError::InvalidPrivateKey(e.to_string()),
            EthError::UnknownNetwork(_) => WalletError::Config(e.to_string()),
            EthError::InvalidPublicKey(_)
            | EthError::InvalidSignature(_)
            | EthError::SigningError(_) => WalletError::Signing(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(e: serde_json::Error) -> Self {
        WalletError::Config(e.to_string())
    }
}
