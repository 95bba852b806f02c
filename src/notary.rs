/// Tool surface for the notary service.
///
/// `Notary` owns the explorer base and a gateway handle; the caller
/// constructs it once and passes it to each operation. Operations are
/// sequential request/response: one network round trip for verification,
/// one submission plus validation polling for the write-side tools.
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::{NotaryError, Result};
use crate::hash;
use crate::ledger::LedgerGateway;
use crate::memo::{self, ProofPayload};
use crate::nft;
use crate::proof::search::search_history;
use crate::proof::VerificationResult;

/// Memo type tag for proof transactions.
const PROOF_MEMO_TYPE: &str = "gov-proof";
/// Memo type tag for fee payments.
const PAYMENT_MEMO_TYPE: &str = "payment";
/// Default history window for verification.
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Result of recording a timestamp proof.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampReceipt {
    pub tx_hash: String,
    pub explorer_url: String,
    pub ledger_index: Option<u64>,
    pub validated: bool,
}

/// Result of minting a document NFT certificate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NftReceipt {
    /// Minted NFT id; None when the server metadata did not expose it.
    pub nft_id: Option<String>,
    pub tx_hash: String,
    pub explorer_url: String,
}

/// Result of a fee payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub tx_hash: String,
    pub explorer_url: String,
    pub amount: i64,
    pub destination: String,
}

/// The four notary tools over an injected ledger gateway.
pub struct Notary<G> {
    gateway: G,
    explorer_base: String,
}

impl<G: LedgerGateway> Notary<G> {
    pub fn new(gateway: G, explorer_base: impl Into<String>) -> Self {
        Self {
            gateway,
            explorer_base: explorer_base.into(),
        }
    }

    fn explorer_url(&self, tx_hash: &str) -> String {
        format!("{}/transactions/{tx_hash}", self.explorer_base)
    }

    /// Record a document hash on the ledger as a timestamp proof.
    ///
    /// The proof payload is carried in the memo of an account-settings
    /// transaction that changes nothing — the ledger rejects self-payments,
    /// and a no-op settings transaction is the accepted way to write a
    /// standalone memo.
    pub async fn timestamp_document(
        &self,
        sha256_hex_str: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<TimestampReceipt> {
        if !hash::is_sha256_hex(sha256_hex_str) {
            return Err(NotaryError::InvalidInput(format!(
                "Expected a 64-character hex SHA-256 digest, got: {sha256_hex_str}"
            )));
        }

        let payload = ProofPayload {
            hash: sha256_hex_str.to_lowercase(),
            timestamp: Some(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            metadata,
        };
        let memo_data = memo::encode(&payload)?;

        let tx_json = json!({
            "TransactionType": "AccountSet",
            "Account": self.gateway.account(),
            "Memos": [{
                "Memo": {
                    "MemoType": memo::encode_tag(PROOF_MEMO_TYPE),
                    "MemoData": memo_data,
                },
            }],
        });

        info!(hash = %payload.hash, "Submitting timestamp proof");
        let receipt = self.gateway.submit(tx_json).await?;

        Ok(TimestampReceipt {
            explorer_url: self.explorer_url(&receipt.tx_hash),
            tx_hash: receipt.tx_hash,
            ledger_index: receipt.ledger_index,
            validated: receipt.validated,
        })
    }

    /// Check whether a document proof exists in recent ledger history.
    ///
    /// Accepts either a 64-hex digest or a base64-encoded document, whose
    /// digest is then computed. The search window is bounded: a miss means
    /// "not in the last `search_limit` transactions", nothing stronger.
    pub async fn verify_document(
        &self,
        hash_or_document_b64: &str,
        search_limit: u32,
    ) -> Result<VerificationResult> {
        let target = if hash::is_sha256_hex(hash_or_document_b64) {
            hash_or_document_b64.to_lowercase()
        } else {
            hash::sha256_from_base64(hash_or_document_b64)?
        };

        if !hash::is_sha256_hex(&target) {
            return Err(NotaryError::InvalidInput(format!(
                "Invalid or corrupted hash: {target}"
            )));
        }

        info!(hash = %target, limit = search_limit, "Verifying document proof");
        let history = self.gateway.account_transactions(search_limit).await?;

        Ok(search_history(&target, &history, &self.explorer_base))
    }

    /// Mint an NFT certificate referencing a document.
    ///
    /// The URI size ceiling is enforced before any network call.
    pub async fn mint_document_nft(
        &self,
        cid: &str,
        metadata: Option<Map<String, Value>>,
    ) -> Result<NftReceipt> {
        let metadata = metadata.unwrap_or_default();
        let uri_hex = nft::encode_nft_uri(cid, &metadata)?;

        let tx_json = json!({
            "TransactionType": "NFTokenMint",
            "Account": self.gateway.account(),
            "URI": uri_hex,
            "Flags": 8, // tfTransferable
            "TransferFee": 0,
            "NFTokenTaxon": 0,
        });

        info!(cid = %cid, "Minting document NFT");
        let receipt = self.gateway.submit(tx_json).await?;

        let nft_id = nft::extract_nft_id(&receipt.result);
        if nft_id.is_none() {
            warn!(tx_hash = %receipt.tx_hash, "Mint validated but NFT id not present in metadata");
        }

        Ok(NftReceipt {
            nft_id,
            explorer_url: self.explorer_url(&receipt.tx_hash),
            tx_hash: receipt.tx_hash,
        })
    }

    /// Send a fee payment to another account, with an optional memo.
    pub async fn pay_fee(
        &self,
        amount_drops: i64,
        destination: &str,
        memo_text: Option<&str>,
    ) -> Result<PaymentReceipt> {
        if amount_drops <= 0 {
            return Err(NotaryError::InvalidInput(format!(
                "Amount must be positive, got: {amount_drops}"
            )));
        }
        if destination == self.gateway.account() {
            return Err(NotaryError::InvalidInput(
                "Destination cannot be the sender account".into(),
            ));
        }

        let mut tx_json = json!({
            "TransactionType": "Payment",
            "Account": self.gateway.account(),
            "Destination": destination,
            "Amount": amount_drops.to_string(),
        });
        if let Some(text) = memo_text {
            tx_json["Memos"] = json!([{
                "Memo": {
                    "MemoType": memo::encode_tag(PAYMENT_MEMO_TYPE),
                    "MemoData": hex::encode_upper(text.as_bytes()),
                },
            }]);
        }

        info!(amount = amount_drops, destination = %destination, "Submitting fee payment");
        let receipt = self.gateway.submit(tx_json).await?;

        Ok(PaymentReceipt {
            explorer_url: self.explorer_url(&receipt.tx_hash),
            tx_hash: receipt.tx_hash,
            amount: amount_drops,
            destination: destination.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::SubmitReceipt;
    use async_trait::async_trait;
    use std::sync::Mutex;

    const EXPLORER: &str = "https://testnet.xrpl.org";
    const ACCOUNT: &str = "rNotaryAccount111111111111111111";
    const TARGET: &str = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";

    /// In-memory gateway recording submissions and serving canned history.
    struct MockGateway {
        history: Vec<Value>,
        submit_result: Value,
        submitted: Mutex<Vec<Value>>,
    }

    impl MockGateway {
        fn new() -> Self {
            Self {
                history: Vec::new(),
                submit_result: json!({"validated": true, "ledger_index": 777}),
                submitted: Mutex::new(Vec::new()),
            }
        }

        fn submissions(&self) -> Vec<Value> {
            self.submitted.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LedgerGateway for MockGateway {
        fn account(&self) -> &str {
            ACCOUNT
        }

        async fn submit(&self, tx_json: Value) -> crate::error::Result<SubmitReceipt> {
            self.submitted.lock().unwrap().push(tx_json);
            Ok(SubmitReceipt {
                tx_hash: "MOCKTXHASH".into(),
                ledger_index: Some(777),
                validated: true,
                result: self.submit_result.clone(),
            })
        }

        async fn account_transactions(&self, _limit: u32) -> crate::error::Result<Vec<Value>> {
            Ok(self.history.clone())
        }
    }

    fn notary_with(gateway: MockGateway) -> Notary<MockGateway> {
        Notary::new(gateway, EXPLORER)
    }

    #[tokio::test]
    async fn test_timestamp_document_submits_decodable_memo() {
        let notary = notary_with(MockGateway::new());

        let mut metadata = Map::new();
        metadata.insert("caseId".into(), json!("CR-2024-001"));

        let receipt = notary
            .timestamp_document(&TARGET.to_uppercase(), Some(metadata))
            .await
            .unwrap();
        assert_eq!(receipt.tx_hash, "MOCKTXHASH");
        assert_eq!(
            receipt.explorer_url,
            "https://testnet.xrpl.org/transactions/MOCKTXHASH"
        );
        assert_eq!(receipt.ledger_index, Some(777));

        let submitted = notary.gateway.submissions();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0]["TransactionType"], "AccountSet");
        assert_eq!(submitted[0]["Account"], ACCOUNT);

        let memo_data = submitted[0]["Memos"][0]["Memo"]["MemoData"]
            .as_str()
            .unwrap();
        let payload = memo::decode(memo_data).unwrap();
        // Stored hash is lowercased regardless of input case
        assert_eq!(payload.hash, TARGET);
        assert!(payload.timestamp.is_some());
        assert_eq!(payload.metadata.unwrap()["caseId"], "CR-2024-001");
    }

    #[tokio::test]
    async fn test_timestamp_document_rejects_bad_hash_before_submitting() {
        let notary = notary_with(MockGateway::new());

        let err = notary.timestamp_document("not-a-hash", None).await.unwrap_err();
        assert!(matches!(err, NotaryError::InvalidInput(_)));
        assert!(notary.gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_verify_document_treats_hex_input_as_hash() {
        // A 64-hex string is also decodable base64; it must not be decoded
        let notary = notary_with(MockGateway::new());

        let result = notary
            .verify_document(&TARGET.to_uppercase(), 50)
            .await
            .unwrap();
        assert!(!result.found);
        assert_eq!(result.hash, TARGET);
    }

    #[tokio::test]
    async fn test_verify_document_hashes_base64_input() {
        let notary = notary_with(MockGateway::new());

        // "hello" in base64
        let result = notary.verify_document("aGVsbG8=", 50).await.unwrap();
        assert_eq!(result.hash, hash::sha256_hex(b"hello"));
    }

    #[tokio::test]
    async fn test_verify_document_rejects_corrupt_base64() {
        let notary = notary_with(MockGateway::new());

        let err = notary
            .verify_document("!!corrupt-blob!!", 50)
            .await
            .unwrap_err();
        assert!(matches!(err, NotaryError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_verify_document_finds_recorded_proof() {
        let payload = ProofPayload {
            hash: TARGET.into(),
            timestamp: Some("2025-10-25T10:30:00Z".into()),
            metadata: None,
        };
        let mut gateway = MockGateway::new();
        gateway.history = vec![json!({
            "hash": "PROOFTX",
            "ledger_index": 42,
            "tx_json": {
                "Memos": [{"Memo": {"MemoData": memo::encode(&payload).unwrap()}}],
            },
        })];

        let notary = notary_with(gateway);
        let result = notary.verify_document(TARGET, 50).await.unwrap();
        assert!(result.found);
        assert_eq!(result.tx_hash.as_deref(), Some("PROOFTX"));
        assert_eq!(
            result.explorer_url.as_deref(),
            Some("https://testnet.xrpl.org/transactions/PROOFTX")
        );
        assert_eq!(result.ledger_index, Some(42));
    }

    #[tokio::test]
    async fn test_mint_document_nft_extracts_id() {
        let mut gateway = MockGateway::new();
        gateway.submit_result = json!({"meta": {"nftoken_id": "000812AB"}});

        let notary = notary_with(gateway);
        let receipt = notary.mint_document_nft("QmCid", None).await.unwrap();
        assert_eq!(receipt.nft_id.as_deref(), Some("000812AB"));
        assert_eq!(receipt.tx_hash, "MOCKTXHASH");

        let submitted = notary.gateway.submissions();
        assert_eq!(submitted[0]["TransactionType"], "NFTokenMint");
        assert_eq!(submitted[0]["Flags"], 8);
        assert_eq!(submitted[0]["NFTokenTaxon"], 0);
    }

    #[tokio::test]
    async fn test_mint_document_nft_rejects_oversized_uri_before_submitting() {
        let notary = notary_with(MockGateway::new());

        let mut metadata = Map::new();
        metadata.insert("filler".into(), json!("x".repeat(400)));

        let err = notary
            .mint_document_nft("QmCid", Some(metadata))
            .await
            .unwrap_err();
        assert!(matches!(err, NotaryError::Encoding(_)));
        assert!(notary.gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_pay_fee_builds_payment_with_memo() {
        let notary = notary_with(MockGateway::new());

        let receipt = notary
            .pay_fee(1_000_000, "rDestination", Some("Passport renewal fee"))
            .await
            .unwrap();
        assert_eq!(receipt.amount, 1_000_000);
        assert_eq!(receipt.destination, "rDestination");

        let submitted = notary.gateway.submissions();
        assert_eq!(submitted[0]["TransactionType"], "Payment");
        // Drops amounts are serialized as strings
        assert_eq!(submitted[0]["Amount"], "1000000");
        let memo_data = submitted[0]["Memos"][0]["Memo"]["MemoData"]
            .as_str()
            .unwrap();
        assert_eq!(
            String::from_utf8(hex::decode(memo_data).unwrap()).unwrap(),
            "Passport renewal fee"
        );
    }

    #[tokio::test]
    async fn test_pay_fee_without_memo_omits_memos_field() {
        let notary = notary_with(MockGateway::new());

        notary.pay_fee(500, "rDestination", None).await.unwrap();
        let submitted = notary.gateway.submissions();
        assert!(submitted[0].get("Memos").is_none());
    }

    #[tokio::test]
    async fn test_pay_fee_rejects_non_positive_amount() {
        let notary = notary_with(MockGateway::new());

        for amount in [0, -5] {
            let err = notary.pay_fee(amount, "rDestination", None).await.unwrap_err();
            assert!(matches!(err, NotaryError::InvalidInput(_)));
        }
        assert!(notary.gateway.submissions().is_empty());
    }

    #[tokio::test]
    async fn test_pay_fee_rejects_self_payment() {
        let notary = notary_with(MockGateway::new());

        let err = notary.pay_fee(500, ACCOUNT, None).await.unwrap_err();
        assert!(matches!(err, NotaryError::InvalidInput(_)));
        assert!(notary.gateway.submissions().is_empty());
    }
}
