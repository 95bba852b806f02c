/// Linear proof search over account transaction history.
///
/// The history is scanned in the order the ledger returned it — most
/// recent first — and the first matching record wins, so duplicate
/// submissions report the most recent proof. Records that fail to parse
/// are skipped; only the history query itself can fail, upstream.
use chrono::DateTime;
use serde_json::Value;
use tracing::debug;

use super::normalize::{first_proof_payload, normalize_body};
use super::VerificationResult;
use crate::memo::ProofPayload;

/// Seconds between the ledger epoch (2000-01-01T00:00:00Z) and the Unix epoch.
pub const LEDGER_EPOCH_OFFSET: i64 = 946_684_800;

/// Search a bounded transaction history for a proof of `target_hash`.
pub fn search_history(
    target_hash: &str,
    history: &[Value],
    explorer_base: &str,
) -> VerificationResult {
    let target = target_hash.to_lowercase();

    for record in history {
        let Some(payload) = first_proof_payload(record) else {
            continue;
        };
        if payload.hash.to_lowercase() != target {
            continue;
        }

        let body = normalize_body(record);
        let tx_hash = record
            .get("hash")
            .or_else(|| body.get("hash"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        debug!(hash = %target, tx_hash = %tx_hash, "Proof found in history");

        return VerificationResult {
            hash: target,
            found: true,
            explorer_url: Some(format!("{explorer_base}/transactions/{tx_hash}")),
            timestamp: Some(resolve_timestamp(record, body, &payload)),
            metadata: Some(payload.metadata.unwrap_or_default()),
            ledger_index: record.get("ledger_index").and_then(Value::as_u64),
            tx_hash: Some(tx_hash),
            message: None,
        };
    }

    debug!(hash = %target, searched = history.len(), "Proof not found");

    VerificationResult {
        hash: target,
        found: false,
        tx_hash: None,
        explorer_url: None,
        timestamp: None,
        metadata: None,
        ledger_index: None,
        message: Some(format!(
            "Hash not found in last {} transactions",
            history.len()
        )),
    }
}

/// Resolve the best available timestamp for a matched record.
///
/// Order: the server's human-readable close time, then the numeric ledger
/// `date` (seconds since the ledger epoch, body first then top level),
/// then the timestamp the writer embedded in the payload, then empty.
fn resolve_timestamp(record: &Value, body: &Value, payload: &ProofPayload) -> String {
    if let Some(iso) = record.get("close_time_iso").and_then(Value::as_str) {
        return iso.to_string();
    }

    if let Some(date) = body
        .get("date")
        .or_else(|| record.get("date"))
        .and_then(Value::as_i64)
    {
        if let Some(ts) = DateTime::from_timestamp(date + LEDGER_EPOCH_OFFSET, 0) {
            return ts.format("%Y-%m-%dT%H:%M:%SZ").to_string();
        }
    }

    payload.timestamp.clone().unwrap_or_default()
}
