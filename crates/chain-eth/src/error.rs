use thiserror::Error;

/// Ethereum chain operation errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_invalid_private_key() {
        let err = EthError::InvalidPrivateKey("key too short".into());
        assert_eq!(err.to_string(), "invalid private key: key too short");
    }

    #[test]
    fn display_invalid_address() {
        let err = EthError::InvalidAddress("bad checksum".into());
        assert_eq!(err.to_string(), "invalid address: bad checksum");
    }

    #[test]
    fn display_invalid_signature() {
        let err = EthError::InvalidSignature("expected 65 bytes".into());
        assert_eq!(err.to_string(), "invalid signature: expected 65 bytes");
    }

    #[test]
    fn display_encoding_error() {
        let err = EthError::EncodingError("prefix is not ascii".into());
        assert_eq!(err.to_string(), "encoding error: prefix is not ascii");
    }

    #[test]
    fn display_unknown_network() {
        let err = EthError::UnknownNetwork("goerli".into());
        assert_eq!(err.to_string(), "unknown network: goerli");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> =
            Box::new(EthError::SigningError("test".into()));
        assert!(err.to_string().contains("test"));
    }
}
