/// HTTP handlers for the notary tool surface.
///
/// Caller mistakes (malformed hashes, oversized payloads) come back as
/// 400; upstream ledger failures as 502; everything else as 500. The
/// error body is always a JSON `{error}` envelope.
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::AppState;
use crate::error::NotaryError;
use crate::notary::{NftReceipt, PaymentReceipt, TimestampReceipt, DEFAULT_SEARCH_LIMIT};
use crate::proof::VerificationResult;

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(err: NotaryError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        NotaryError::InvalidInput(_) | NotaryError::Encoding(_) => StatusCode::BAD_REQUEST,
        NotaryError::Query(_) | NotaryError::Submission(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

// ─── Health ──────────────────────────────────────────────

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// GET /health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}

// ─── Tools ───────────────────────────────────────────────

/// Request to record a timestamp proof.
#[derive(Debug, Deserialize)]
struct TimestampRequest {
    /// 64-character hex SHA-256 digest.
    hash: String,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// POST /api/proofs — Record a document hash on the ledger.
async fn timestamp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TimestampRequest>,
) -> Result<(StatusCode, Json<TimestampReceipt>), (StatusCode, Json<ErrorResponse>)> {
    state
        .notary
        .timestamp_document(&req.hash, req.metadata)
        .await
        .map(|receipt| (StatusCode::CREATED, Json(receipt)))
        .map_err(error_response)
}

/// Request to verify a document proof.
#[derive(Debug, Deserialize)]
struct VerifyRequest {
    /// Hash or base64-encoded document.
    document: String,
    /// Number of recent transactions to search.
    #[serde(default)]
    limit: Option<u32>,
}

/// POST /api/proofs/verify — Check whether a proof exists.
async fn verify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerificationResult>, (StatusCode, Json<ErrorResponse>)> {
    state
        .notary
        .verify_document(&req.document, req.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
        .await
        .map(Json)
        .map_err(error_response)
}

/// Request to mint a document NFT certificate.
#[derive(Debug, Deserialize)]
struct MintNftRequest {
    /// Content identifier (IPFS CID, URL, or document reference).
    cid: String,
    #[serde(default)]
    metadata: Option<Map<String, Value>>,
}

/// POST /api/nfts — Mint an NFT certificate.
async fn mint_nft(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MintNftRequest>,
) -> Result<(StatusCode, Json<NftReceipt>), (StatusCode, Json<ErrorResponse>)> {
    state
        .notary
        .mint_document_nft(&req.cid, req.metadata)
        .await
        .map(|receipt| (StatusCode::CREATED, Json(receipt)))
        .map_err(error_response)
}

/// Request to send a fee payment.
#[derive(Debug, Deserialize)]
struct PayFeeRequest {
    /// Amount in drops.
    amount: i64,
    /// Destination classic address.
    destination: String,
    #[serde(default)]
    memo: Option<String>,
}

/// POST /api/payments — Send a fee payment.
async fn pay_fee(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PayFeeRequest>,
) -> Result<(StatusCode, Json<PaymentReceipt>), (StatusCode, Json<ErrorResponse>)> {
    state
        .notary
        .pay_fee(req.amount, &req.destination, req.memo.as_deref())
        .await
        .map(|receipt| (StatusCode::CREATED, Json(receipt)))
        .map_err(error_response)
}

pub fn tool_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/proofs", post(timestamp))
        .route("/api/proofs/verify", post(verify))
        .route("/api/nfts", post(mint_nft))
        .route("/api/payments", post(pay_fee))
}
