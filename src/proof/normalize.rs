/// Transaction record normalization.
///
/// History queries return records whose transaction body may sit under
/// `tx_json` (newer servers), under `tx` (older servers), or at the record
/// root (single-transaction lookups). The candidate order below is
/// load-bearing: servers that use `tx_json` omit `tx` entirely, so code
/// that checks only `tx` silently loses memo data.
use serde_json::Value;

use crate::memo::{self, ProofPayload};

/// Nested-body keys, tried in order. First present wins.
const BODY_KEYS: [&str; 2] = ["tx_json", "tx"];

/// Resolve the transaction body of a history record.
///
/// Falls back to the record itself, so resolution never fails — though the
/// returned body may carry no memo sequence at all.
pub fn normalize_body(record: &Value) -> &Value {
    BODY_KEYS
        .iter()
        .find_map(|key| record.get(key))
        .unwrap_or(record)
}

/// Extract the proof payload from a record's first memo, if any.
///
/// Only the first memo entry is consulted: proofs are written with exactly
/// one memo, so later entries cannot carry one. Any absence or decode
/// failure makes the record a non-match rather than an error.
pub fn first_proof_payload(record: &Value) -> Option<ProofPayload> {
    let memo_hex = normalize_body(record)
        .get("Memos")?
        .as_array()?
        .first()?
        .get("Memo")?
        .get("MemoData")?
        .as_str()?;
    memo::decode(memo_hex).ok()
}
