/// Proof verification over ledger transaction history.
///
/// Verification is a bounded, best-effort scan: the last N transactions of
/// the proving account are fetched and searched for a memo whose payload
/// carries the target digest. A miss never proves the document was never
/// submitted — only that it is not within the searched window.
pub mod normalize;
pub mod search;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a verification call.
///
/// A hit populates every field except `message`; a miss carries only
/// `hash` and `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    /// The digest that was searched for (lowercase hex).
    pub hash: String,
    /// Whether a matching proof was found in the searched window.
    pub found: bool,
    /// Settlement hash of the matching transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    /// Explorer link for the matching transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
    /// Best available timestamp for the proof (may be empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Metadata stored alongside the proof.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Ledger index the matching transaction settled in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_index: Option<u64>,
    /// Miss explanation, stating how many transactions were searched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
