//! EIP-191 `personal_sign` messages.
//!
//! The signed hash is `keccak256("\x19Ethereum Signed Message:\n" + len + message)`
//! where `len` is the decimal byte length of the message. The hash is the
//! original Keccak-256, not NIST SHA3-256.

use k256::ecdsa::SigningKey;
use sha3::{Digest, Keccak256};

use crate::address::address_of;
use crate::encoding::{decode_hex, to_prefixed_hex};
use crate::error::EthError;
use crate::signature::{sign_prehash, RecoverableSignature, VEncoding};

pub const PERSONAL_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";

/// Builds `prefix || message`, the bytes that get hashed.
pub fn personal_message_preimage(message: &[u8]) -> Result<Vec<u8>, EthError> {
    let prefix = format!("{PERSONAL_MESSAGE_PREFIX}{}", message.len());
    if !prefix.is_ascii() {
        return Err(EthError::EncodingError(format!(
            "message prefix is not ascii: {prefix:?}"
        )));
    }

    let mut preimage = Vec::with_capacity(prefix.len() + message.len());
    preimage.extend_from_slice(prefix.as_bytes());
    preimage.extend_from_slice(message);
    Ok(preimage)
}

/// Keccak-256 of the personal message preimage.
pub fn hash_personal_message(message: &[u8]) -> Result<[u8; 32], EthError> {
    let preimage = personal_message_preimage(message)?;
    Ok(Keccak256::digest(&preimage).into())
}

/// Signs `message` and returns the 65-byte `r || s || v` with `v` in {27, 28}.
pub fn sign_personal_message(
    message: &[u8],
    signing_key: &SigningKey,
) -> Result<[u8; 65], EthError> {
    let hash = hash_personal_message(message)?;
    let signature = sign_prehash(signing_key, &hash)?;
    signature.to_rsv_bytes(VEncoding::PERSONAL_SIGN)
}

/// [`sign_personal_message`] rendered as `0x`-prefixed lowercase hex.
pub fn sign_personal_message_hex(
    message: &[u8],
    signing_key: &SigningKey,
) -> Result<String, EthError> {
    sign_personal_message(message, signing_key).map(|sig| to_prefixed_hex(sig))
}

/// Recovers the checksummed address that signed `message`.
///
/// Accepts `v` as 27/28 and also the raw recovery id 0/1 some signers emit.
pub fn recover_personal_signer(message: &[u8], signature: &[u8]) -> Result<String, EthError> {
    let encoding = match signature.get(64) {
        Some(0 | 1) => VEncoding::Legacy { offset: 0 },
        _ => VEncoding::PERSONAL_SIGN,
    };
    let signature = RecoverableSignature::from_rsv_bytes(signature, encoding)?;
    let hash = hash_personal_message(message)?;
    let key = signature.recover(&hash)?;
    Ok(address_of(&key))
}

/// [`recover_personal_signer`] for a hex-encoded signature.
pub fn recover_personal_signer_hex(message: &[u8], signature: &str) -> Result<String, EthError> {
    let bytes = decode_hex(signature)?;
    recover_personal_signer(message, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sha3::Sha3_256;

    const TEST_PRIVKEY: [u8; 32] = {
        let mut key = [0u8; 32];
        key[31] = 1;
        key
    };
    const TEST_ADDRESS: &str = "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf";

    fn test_key() -> SigningKey {
        SigningKey::from_bytes((&TEST_PRIVKEY).into()).unwrap()
    }

    #[test]
    fn preimage_for_hello() {
        let preimage = personal_message_preimage(b"hello").unwrap();
        assert_eq!(preimage, b"\x19Ethereum Signed Message:\n5hello".to_vec());
    }

    #[test]
    fn preimage_uses_byte_length() {
        let message = [0xffu8; 12];
        let preimage = personal_message_preimage(&message).unwrap();
        assert!(preimage.starts_with(b"\x19Ethereum Signed Message:\n12"));
        assert_eq!(preimage.len(), PERSONAL_MESSAGE_PREFIX.len() + 2 + 12);
    }

    #[test]
    fn preimage_for_empty_message() {
        let preimage = personal_message_preimage(&[]).unwrap();
        assert_eq!(preimage, b"\x19Ethereum Signed Message:\n0".to_vec());
    }

    #[test]
    fn hash_matches_known_vector() {
        // hashMessage("Hello World") as computed by ethers.js / go-ethereum.
        let hash = hash_personal_message(b"Hello World").unwrap();
        assert_eq!(
            hex::encode(hash),
            "a1de988600a42c4b4ab089b619297c17d53cffae5d5120d82d8a92d0bb3b78f2"
        );
    }

    #[test]
    fn hash_is_keccak_not_nist_sha3() {
        let preimage = personal_message_preimage(b"Hello World").unwrap();
        let keccak: [u8; 32] = Keccak256::digest(&preimage).into();
        let nist: [u8; 32] = Sha3_256::digest(&preimage).into();
        assert_ne!(keccak, nist);
        assert_eq!(hash_personal_message(b"Hello World").unwrap(), keccak);
    }

    #[test]
    fn signature_v_is_legacy() {
        let messages: [&[u8]; 4] = [b"hello", b"", b"another message", &[0u8; 100]];
        for msg in messages {
            let sig = sign_personal_message(msg, &test_key()).unwrap();
            assert!(sig[64] == 27 || sig[64] == 28, "v was {}", sig[64]);
        }
    }

    #[test]
    fn signature_recovers_to_signer() {
        let sig = sign_personal_message(b"hello", &test_key()).unwrap();
        let signer = recover_personal_signer(b"hello", &sig).unwrap();
        assert_eq!(signer, TEST_ADDRESS);
    }

    #[test]
    fn recovery_accepts_raw_recovery_id() {
        let mut sig = sign_personal_message(b"hello", &test_key()).unwrap();
        sig[64] -= 27;
        let signer = recover_personal_signer(b"hello", &sig).unwrap();
        assert_eq!(signer, TEST_ADDRESS);
    }

    #[test]
    fn recovery_for_other_message_differs() {
        let sig = sign_personal_message(b"hello", &test_key()).unwrap();
        let signer = recover_personal_signer(b"goodbye", &sig).unwrap_or_default();
        assert_ne!(signer, TEST_ADDRESS);
    }

    #[test]
    fn hex_output_format() {
        let sig = sign_personal_message_hex(b"hello", &test_key()).unwrap();
        assert!(sig.starts_with("0x"));
        assert_eq!(sig.len(), 2 + 130);
        assert_eq!(sig, sig.to_lowercase());
        assert_eq!(recover_personal_signer_hex(b"hello", &sig).unwrap(), TEST_ADDRESS);
    }

    #[test]
    fn eip155_v_is_rejected_for_messages() {
        let mut sig = sign_personal_message(b"hello", &test_key()).unwrap();
        sig[64] = 37;
        assert!(recover_personal_signer(b"hello", &sig).is_err());
    }
}
