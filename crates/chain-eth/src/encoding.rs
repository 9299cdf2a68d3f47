//! Hex string helpers shared by the signers.

use crate::error::EthError;

/// Removes a leading `0x` / `0X` if present.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Lowercase hex with a leading `0x`.
pub fn to_prefixed_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Strict hex decoding with an optional `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, EthError> {
    hex::decode(strip_hex_prefix(s))
        .map_err(|e| EthError::EncodingError(format!("invalid hex: {e}")))
}

/// Lenient hex decoding used for message payloads.
///
/// Nibbles are consumed in pairs and a trailing odd nibble becomes a byte of
/// its own value, so `"abc"` decodes to `[0xab, 0x0c]`. Any character that is
/// not a hex digit makes the whole input decode to an empty byte string.
pub fn decode_hex_lenient(s: &str) -> Vec<u8> {
    let digits = strip_hex_prefix(s);
    let mut out = Vec::with_capacity(digits.len() / 2 + 1);
    let mut high: Option<u8> = None;

    for c in digits.chars() {
        let Some(nibble) = c.to_digit(16) else {
            return Vec::new();
        };
        let nibble = nibble as u8;
        match high.take() {
            Some(h) => out.push(h << 4 | nibble),
            None => high = Some(nibble),
        }
    }
    if let Some(h) = high {
        out.push(h);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_prefix_variants() {
        assert_eq!(strip_hex_prefix("0xdead"), "dead");
        assert_eq!(strip_hex_prefix("0Xdead"), "dead");
        assert_eq!(strip_hex_prefix("dead"), "dead");
        assert_eq!(strip_hex_prefix(""), "");
    }

    #[test]
    fn prefixed_hex_is_lowercase() {
        assert_eq!(to_prefixed_hex([0xAB, 0x01]), "0xab01");
        assert_eq!(to_prefixed_hex([]), "0x");
    }

    #[test]
    fn strict_decode_rejects_garbage() {
        assert_eq!(decode_hex("0x0102").unwrap(), vec![1, 2]);
        assert!(decode_hex("0xzz").is_err());
        assert!(decode_hex("abc").is_err());
    }

    #[test]
    fn lenient_decode_even_length() {
        assert_eq!(decode_hex_lenient("68656c6c6f"), b"hello".to_vec());
        assert_eq!(decode_hex_lenient("0x68656C6C6F"), b"hello".to_vec());
    }

    #[test]
    fn lenient_decode_keeps_trailing_nibble() {
        assert_eq!(decode_hex_lenient("abc"), vec![0xab, 0x0c]);
        assert_eq!(decode_hex_lenient("f"), vec![0x0f]);
    }

    #[test]
    fn lenient_decode_non_hex_is_empty() {
        assert!(decode_hex_lenient("hello").is_empty());
        assert!(decode_hex_lenient("0x12g4").is_empty());
        assert!(decode_hex_lenient("").is_empty());
    }
}
