/// Ledger gateway abstraction.
///
/// Transaction construction details — signing, fees, sequence numbers —
/// are delegated to the remote endpoint; this crate only assembles
/// `tx_json` skeletons and reads results. The trait seam keeps the tool
/// surface testable against an in-memory gateway.
pub mod xrpl;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Receipt for a validated transaction submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    /// Transaction hash on the ledger.
    pub tx_hash: String,
    /// Ledger index the transaction settled in (None if not yet known).
    pub ledger_index: Option<u64>,
    /// Whether the ledger reported the transaction as validated.
    pub validated: bool,
    /// Full transaction result, for callers that need the metadata
    /// (e.g. minted NFT ids).
    pub result: Value,
}

/// Trait for a ledger connection.
///
/// One logical operation in flight per gateway; callers serialize their
/// own use. Implementations must be safe to share across tasks.
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Classic address of the account this gateway submits from.
    fn account(&self) -> &str;

    /// Sign and submit a transaction, then wait for validation.
    async fn submit(&self, tx_json: Value) -> Result<SubmitReceipt>;

    /// Fetch the most recent transactions of the gateway account,
    /// most recent first.
    async fn account_transactions(&self, limit: u32) -> Result<Vec<Value>>;
}
