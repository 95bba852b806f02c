/// Memo codec for on-ledger proof payloads.
///
/// A proof payload travels inside a transaction memo as compact JSON
/// (no inserted whitespace), hex-encoded for the memo-data field. The
/// decoder is total: bytes that are not valid hex, valid UTF-8, and valid
/// JSON of the expected shape come back as a typed `Decode` error, which
/// the search path treats as "no proof here".
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NotaryError, Result};

/// Decoded application-level memo content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofPayload {
    /// Lowercase hex SHA-256 digest of the proven document.
    pub hash: String,
    /// Submission timestamp (ISO-8601 UTC), set by the writer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Caller-supplied metadata (service ids, case numbers, etc.).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Encode a payload as hex-wrapped compact JSON for a memo-data field.
pub fn encode(payload: &ProofPayload) -> Result<String> {
    let json = serde_json::to_string(payload)
        .map_err(|e| NotaryError::Serialization(e.to_string()))?;
    Ok(hex::encode_upper(json.as_bytes()))
}

/// Decode a hex-wrapped memo-data field back into a payload.
pub fn decode(memo_hex: &str) -> Result<ProofPayload> {
    let bytes = hex::decode(memo_hex)
        .map_err(|e| NotaryError::Decode(format!("invalid hex: {e}")))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| NotaryError::Decode(format!("invalid UTF-8: {e}")))?;
    serde_json::from_str(&text).map_err(|e| NotaryError::Decode(format!("invalid JSON: {e}")))
}

/// Hex-encode a short UTF-8 tag for a memo-type field.
pub fn encode_tag(tag: &str) -> String {
    hex::encode_upper(tag.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_payload() -> ProofPayload {
        let mut metadata = Map::new();
        metadata.insert("serviceId".into(), json!("passport-renewal"));
        metadata.insert("caseId".into(), json!("CR-2024-001"));

        ProofPayload {
            hash: "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a".into(),
            timestamp: Some("2025-10-25T10:30:00Z".into()),
            metadata: Some(metadata),
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let payload = sample_payload();
        let encoded = encode(&payload).unwrap();
        assert_eq!(decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_encode_is_compact_json() {
        let payload = sample_payload();
        let encoded = encode(&payload).unwrap();
        let text = String::from_utf8(hex::decode(encoded).unwrap()).unwrap();
        assert!(!text.contains(' '));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_decode_accepts_lowercase_hex() {
        let payload = sample_payload();
        let encoded = encode(&payload).unwrap().to_lowercase();
        assert_eq!(decode(&encoded).unwrap(), payload);
    }

    #[test]
    fn test_decode_minimal_payload() {
        // Only the hash field is required
        let text = r#"{"hash":"a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"}"#;
        let decoded = decode(&hex::encode_upper(text)).unwrap();
        assert!(decoded.timestamp.is_none());
        assert!(decoded.metadata.is_none());
    }

    #[test]
    fn test_decode_rejects_bad_hex() {
        let err = decode("ZZZZ").unwrap_err();
        assert!(matches!(err, NotaryError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode(&hex::encode_upper("not json at all")).unwrap_err();
        assert!(matches!(err, NotaryError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_payload_without_hash() {
        let err = decode(&hex::encode_upper(r#"{"note":"no hash here"}"#)).unwrap_err();
        assert!(matches!(err, NotaryError::Decode(_)));
    }
}
