/// NFT certificates for notarized documents.
///
/// A certificate is an NFT whose URI carries compact JSON referencing the
/// document's content identifier and metadata. The ledger caps the URI
/// field at 256 bytes (512 hex characters); oversized payloads are
/// rejected before anything goes on the wire.
use serde_json::{json, Map, Value};

use crate::error::{NotaryError, Result};

/// Maximum URI length in hex characters (256 bytes on the ledger).
pub const MAX_URI_HEX_LEN: usize = 512;

/// Encode `{cid, metadata}` as a hex URI, enforcing the size ceiling.
pub fn encode_nft_uri(cid: &str, metadata: &Map<String, Value>) -> Result<String> {
    let payload = json!({"cid": cid, "metadata": metadata});
    let compact =
        serde_json::to_string(&payload).map_err(|e| NotaryError::Serialization(e.to_string()))?;

    let uri_hex = hex::encode_upper(compact.as_bytes());
    if uri_hex.len() > MAX_URI_HEX_LEN {
        return Err(NotaryError::Encoding(format!(
            "NFT URI too large: {} hex characters (max {MAX_URI_HEX_LEN})",
            uri_hex.len()
        )));
    }

    Ok(uri_hex)
}

/// Pull the minted NFT id out of a validated mint result.
///
/// Newer servers surface `meta.nftoken_id` directly; older ones only show
/// the created `NFTokenPage`, whose first token is the fresh mint.
pub fn extract_nft_id(result: &Value) -> Option<String> {
    let meta = result.get("meta")?;

    if let Some(id) = meta.get("nftoken_id").and_then(Value::as_str) {
        return Some(id.to_string());
    }

    for node in meta.get("AffectedNodes")?.as_array()? {
        let Some(created) = node.get("CreatedNode") else {
            continue;
        };
        if created.get("LedgerEntryType").and_then(Value::as_str) != Some("NFTokenPage") {
            continue;
        }
        if let Some(id) = created
            .pointer("/NewFields/NFTokens/0/NFToken/NFTokenID")
            .and_then(Value::as_str)
        {
            return Some(id.to_string());
        }
    }

    None
}
