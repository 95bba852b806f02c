/// SHA-256 utilities for document proofs.
///
/// Documents are identified on-ledger by the lowercase hex SHA-256 digest
/// of their raw bytes. Callers may supply either the digest directly or a
/// base64-encoded document from which the digest is computed.
use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine as _;
use sha2::{Digest, Sha256};

use crate::error::{NotaryError, Result};

/// Compute the lowercase hex SHA-256 digest of raw bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Check whether a string is exactly a 64-character hex digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode a base64 document and compute its digest.
///
/// Whitespace is stripped first; transports often wrap base64 payloads
/// across lines.
pub fn sha256_from_base64(b64: &str) -> Result<String> {
    let cleaned: String = b64.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = B64
        .decode(cleaned.as_bytes())
        .map_err(|e| NotaryError::InvalidInput(format!("Base64 decode failed: {e}")))?;
    Ok(sha256_hex(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_known_value() {
        // SHA-256 of the empty input
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_is_sha256_hex() {
        let valid = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";
        assert!(is_sha256_hex(valid));
        assert!(is_sha256_hex(&valid.to_uppercase()));

        assert!(!is_sha256_hex(""));
        assert!(!is_sha256_hex("a7ffc6f8"));
        assert!(!is_sha256_hex(&format!("{valid}00")));
        assert!(!is_sha256_hex(&valid.replace('a', "g")));
    }

    #[test]
    fn test_sha256_from_base64() {
        // "hello" in base64
        let digest = sha256_from_base64("aGVsbG8=").unwrap();
        assert_eq!(digest, sha256_hex(b"hello"));
    }

    #[test]
    fn test_sha256_from_base64_strips_whitespace() {
        let digest = sha256_from_base64("aGVs\nbG8=\n").unwrap();
        assert_eq!(digest, sha256_hex(b"hello"));
    }

    #[test]
    fn test_sha256_from_base64_rejects_garbage() {
        let err = sha256_from_base64("!!not-base64!!").unwrap_err();
        assert!(matches!(err, NotaryError::InvalidInput(_)));
    }
}
