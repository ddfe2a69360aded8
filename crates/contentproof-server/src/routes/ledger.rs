//! Ledger status and record endpoints.

use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use contentproof_crypto::require_digest;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::ledger::LedgerRecord;
use crate::state::AppState;

/// Response for `GET /api/v1/ledger/stats`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStatsResponse {
    pub total_proofs: u64,
    pub canister_id: String,
    pub network: String,
}

/// Response for an owner's anchored proofs.
#[derive(Debug, Serialize)]
pub struct OwnerProofsResponse {
    pub success: bool,
    pub proofs: Vec<LedgerRecord>,
}

/// Request body for changing a record's verification flag.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVerifiedRequest {
    pub verified: bool,
    #[serde(default)]
    pub wallet_address: String,
}

/// Response for a verification flag change.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetVerifiedResponse {
    pub success: bool,
    pub tx_ref: Option<String>,
}

/// Creates the ledger router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(ledger_stats))
        .route("/owners/{address}", get(owner_proofs))
        .route("/proofs/{hash}/verified", put(set_verified))
        .with_state(state)
}

/// GET /api/v1/ledger/stats
async fn ledger_stats(State(state): State<AppState>) -> Json<LedgerStatsResponse> {
    let config = state.ledger.config();
    Json(LedgerStatsResponse {
        total_proofs: state.ledger.total_records().await,
        canister_id: config.canister_id.clone(),
        network: config.network.to_string(),
    })
}

/// GET /api/v1/ledger/owners/{address}
///
/// Proofs anchored for an owner, newest first.
async fn owner_proofs(
    State(state): State<AppState>,
    ApiPath(address): ApiPath<String>,
) -> Json<OwnerProofsResponse> {
    Json(OwnerProofsResponse {
        success: true,
        proofs: state.ledger.owner_records(address.trim()).await,
    })
}

/// PUT /api/v1/ledger/proofs/{hash}/verified
///
/// Only the wallet that anchored the proof may change its flag.
async fn set_verified(
    State(state): State<AppState>,
    ApiPath(hash): ApiPath<String>,
    ApiJson(req): ApiJson<SetVerifiedRequest>,
) -> Result<Json<SetVerifiedResponse>, AppError> {
    require_digest(&hash)?;
    let wallet_address = req.wallet_address.trim();
    if wallet_address.is_empty() {
        return Err(AppError::BadRequest("Wallet address is required".to_string()));
    }

    if state.ledger.lookup(&hash).await.is_none() {
        return Err(AppError::NotFound(format!("No proof anchored for hash '{}'", hash)));
    }

    let receipt = state
        .ledger
        .set_verified(&hash, req.verified, wallet_address)
        .await;
    if !receipt.success {
        return Err(AppError::BadRequest(
            receipt
                .error
                .unwrap_or_else(|| "Verification update failed".to_string()),
        ));
    }

    tracing::info!(hash = %hash, verified = req.verified, "updated verification status");
    Ok(Json(SetVerifiedResponse {
        success: true,
        tx_ref: receipt.tx_ref,
    }))
}
