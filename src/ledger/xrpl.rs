/// XRPL JSON-RPC gateway.
///
/// Talks to a rippled HTTP endpoint with raw JSON-RPC for maximum
/// compatibility. Submission uses sign-and-submit mode: the wallet secret
/// travels with each submit request and the endpoint handles autofill and
/// signing, so this gateway is only suitable for the testnet or a trusted
/// local rippled — exactly the deployments the tools target.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::{LedgerGateway, SubmitReceipt};
use crate::config::NotaryConfig;
use crate::error::{NotaryError, Result};

/// Polling schedule while waiting for a submitted transaction to validate.
const VALIDATION_ATTEMPTS: u32 = 10;
const VALIDATION_INTERVAL: Duration = Duration::from_secs(1);

/// JSON-RPC gateway to an XRPL node.
pub struct XrplGateway {
    client: Client,
    rpc_url: String,
    account: String,
    secret: String,
}

impl XrplGateway {
    pub fn new(config: &NotaryConfig) -> Self {
        Self {
            client: Client::new(),
            rpc_url: config.rpc_url.clone(),
            account: config.account.clone(),
            secret: config.secret.clone(),
        }
    }

    /// Send a JSON-RPC request to the XRPL node.
    ///
    /// XRPL responses carry their status inside `result`; an `error` status
    /// there is surfaced as a plain message for the caller to classify as
    /// query or submission failure.
    async fn rpc_call(&self, method: &str, params: Value) -> std::result::Result<Value, String> {
        let body = json!({
            "method": method,
            "params": [params],
        });

        let resp: Value = self
            .client
            .post(&self.rpc_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("{method} request failed: {e}"))?
            .json()
            .await
            .map_err(|e| format!("{method} response parse error: {e}"))?;

        let result = resp
            .get("result")
            .cloned()
            .ok_or_else(|| format!("{method}: empty RPC response"))?;

        if result.get("status").and_then(Value::as_str) == Some("error") {
            let message = result
                .get("error_message")
                .or_else(|| result.get("error"))
                .and_then(Value::as_str)
                .unwrap_or("unknown error");
            return Err(format!("{method} failed: {message}"));
        }

        Ok(result)
    }

    /// Poll the `tx` method until the transaction is validated.
    async fn wait_for_validation(&self, tx_hash: &str) -> Result<SubmitReceipt> {
        for attempt in 1..=VALIDATION_ATTEMPTS {
            tokio::time::sleep(VALIDATION_INTERVAL).await;

            let result = match self.rpc_call("tx", json!({"transaction": tx_hash})).await {
                Ok(result) => result,
                Err(e) => {
                    // Not yet in a closed ledger; keep polling
                    debug!(tx_hash = %tx_hash, attempt, error = %e, "Transaction not yet visible");
                    continue;
                }
            };

            if result.get("validated").and_then(Value::as_bool) == Some(true) {
                let ledger_index = result.get("ledger_index").and_then(Value::as_u64);
                info!(tx_hash = %tx_hash, ledger_index, "Transaction validated");
                return Ok(SubmitReceipt {
                    tx_hash: tx_hash.to_string(),
                    ledger_index,
                    validated: true,
                    result,
                });
            }
        }

        Err(NotaryError::Submission(format!(
            "Transaction {tx_hash} not validated after {VALIDATION_ATTEMPTS} attempts"
        )))
    }
}

#[async_trait]
impl LedgerGateway for XrplGateway {
    fn account(&self) -> &str {
        &self.account
    }

    async fn submit(&self, tx_json: Value) -> Result<SubmitReceipt> {
        let tx_type = tx_json
            .get("TransactionType")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        info!(tx_type = %tx_type, "Submitting transaction");

        let submitted = self
            .rpc_call(
                "submit",
                json!({
                    "tx_json": tx_json,
                    "secret": self.secret,
                }),
            )
            .await
            .map_err(NotaryError::Submission)?;

        let engine_result = submitted
            .get("engine_result")
            .and_then(Value::as_str)
            .unwrap_or("");
        if !engine_result.starts_with("tes") && engine_result != "terQUEUED" {
            let message = submitted
                .get("engine_result_message")
                .and_then(Value::as_str)
                .unwrap_or("");
            return Err(NotaryError::Submission(format!(
                "submit rejected: {engine_result} {message}"
            )));
        }

        let tx_hash = submitted
            .pointer("/tx_json/hash")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                NotaryError::Submission("submit response missing transaction hash".into())
            })?
            .to_string();

        self.wait_for_validation(&tx_hash).await
    }

    async fn account_transactions(&self, limit: u32) -> Result<Vec<Value>> {
        let result = self
            .rpc_call(
                "account_tx",
                json!({
                    "account": self.account,
                    "limit": limit,
                    "ledger_index_min": -1,
                    "ledger_index_max": -1,
                }),
            )
            .await
            .map_err(NotaryError::Query)?;

        let transactions = result
            .get("transactions")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        debug!(count = transactions.len(), "Retrieved account transactions");
        Ok(transactions)
    }
}
