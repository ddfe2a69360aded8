//! Content upload and verification endpoints.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use contentproof_crypto::{
    build_fingerprint, build_proof, enrich_metadata, owner_did, require_digest, ContentInfo,
    Metadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::ledger::AnchorRequest;
use crate::models::NewContentRecord;
use crate::state::AppState;

/// Maximum metadata size in bytes (10KB).
const MAX_METADATA_SIZE: usize = 10 * 1024;

/// Request body for uploading content.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadContentRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub wallet_address: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub file_type: String,
    /// Base64-encoded content bytes.
    pub content: String,
    /// Optional caller metadata; must be a JSON object.
    pub metadata: Option<Value>,
}

/// The registered content as returned to the uploader.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredContent {
    pub id: Uuid,
    pub file_name: String,
    pub file_hash: String,
    pub metadata_hash: String,
    pub combined_hash: String,
    pub proof: String,
    pub owner: String,
    pub timestamp: String,
    pub blockchain_txn: Option<String>,
    pub verified: bool,
    /// Path of the verification endpoint for this content.
    pub verify_path: String,
}

/// Response for a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadContentResponse {
    pub success: bool,
    pub content: RegisteredContent,
}

/// Verification details for a stored proof.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// True if every stored hash recomputes to its stored value.
    pub is_valid: bool,
    pub content_hash: String,
    pub owner_address: String,
    pub owner_did: String,
    pub file_name: String,
    pub file_type: String,
    pub timestamp: String,
    pub proof: String,
    pub blockchain_txn: Option<String>,
    /// True if the ledger holds a record for this hash.
    pub anchored: bool,
}

/// Response for a verification lookup.
#[derive(Debug, Serialize)]
pub struct VerifyContentResponse {
    pub success: bool,
    pub verification: Verification,
}

/// Creates the content router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(upload_content))
        .route("/verify/{hash}", get(verify_content))
        .with_state(state)
}

/// POST /api/v1/content
///
/// Fingerprints the uploaded content, builds a proof for the uploader's
/// wallet, stores it and anchors it on the ledger.
async fn upload_content(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UploadContentRequest>,
) -> Result<Json<UploadContentResponse>, AppError> {
    // Step 1: Validate the request fields
    let file_name = req.file_name.trim();
    let wallet_address = req.wallet_address.trim();
    if file_name.is_empty() || wallet_address.is_empty() {
        return Err(AppError::BadRequest(
            "File name and wallet address are required".to_string(),
        ));
    }
    let metadata = validate_metadata(req.metadata)?;

    let bytes = BASE64_STANDARD
        .decode(req.content.as_bytes())
        .map_err(|e| AppError::BadRequest(format!("Invalid base64 content: {}", e)))?;
    if bytes.len() > state.max_upload_bytes {
        return Err(AppError::PayloadTooLarge {
            size: bytes.len(),
            max: state.max_upload_bytes,
        });
    }

    // Step 2: The wallet must belong to the uploading user
    let user = state
        .store
        .get_user(req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", req.user_id)))?;
    if !user.owns_wallet(wallet_address) {
        return Err(AppError::BadRequest(
            "Wallet address does not belong to this user".to_string(),
        ));
    }

    // Step 3: Fingerprint and prove
    let info = ContentInfo::new(file_name, req.file_type.trim());
    let fingerprint = build_fingerprint(&bytes, &info, &metadata)?;

    if state.store.find_by_hash(&fingerprint.file_hash).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Content with hash '{}' has already been registered",
            fingerprint.file_hash
        )));
    }

    let mut proof_metadata = Metadata::new();
    proof_metadata.insert("metadataHash".into(), Value::from(fingerprint.metadata_hash.clone()));
    proof_metadata.insert("combinedHash".into(), Value::from(fingerprint.combined_hash.clone()));
    let proof = build_proof(
        &fingerprint.file_hash,
        wallet_address,
        Some(fingerprint.timestamp.clone()),
        proof_metadata,
    )?;

    // Step 4: Persist
    let enriched = enrich_metadata(&info, bytes.len() as u64, &metadata, &fingerprint.timestamp);
    let mut record = state
        .store
        .insert_content(NewContentRecord {
            user_id: user.id,
            file_name: info.name.clone(),
            file_type: info.mime_type.clone(),
            file_size: bytes.len() as i64,
            fingerprint,
            proof,
            metadata: enriched,
        })
        .await?;

    // Step 5: Anchor; a ledger failure leaves the record unanchored
    let receipt = state
        .ledger
        .anchor(AnchorRequest {
            hash: record.file_hash.clone(),
            owner: record.owner.clone(),
            file_name: record.file_name.clone(),
            file_type: record.file_type.clone(),
        })
        .await;
    match (receipt.success, receipt.tx_ref) {
        (true, Some(tx_ref)) => {
            // The proof is anchored either way; a failed write only loses the stored tx ref
            if let Err(e) = state.store.set_ledger_tx(record.id, &tx_ref).await {
                tracing::error!(
                    id = %record.id,
                    tx = %tx_ref,
                    error = %e,
                    "failed to store ledger transaction reference"
                );
            }
            record.ledger_tx = Some(tx_ref);
        }
        _ => {
            tracing::warn!(
                hash = %record.file_hash,
                error = receipt.error.as_deref().unwrap_or("unknown"),
                "ledger anchoring failed"
            );
        }
    }

    tracing::info!(
        id = %record.id,
        hash = %record.file_hash,
        owner = %record.owner,
        "registered content"
    );

    Ok(Json(UploadContentResponse {
        success: true,
        content: RegisteredContent {
            verified: record.is_consistent(),
            verify_path: record.verify_path(),
            id: record.id,
            file_name: record.file_name,
            file_hash: record.file_hash,
            metadata_hash: record.metadata_hash,
            combined_hash: record.combined_hash,
            proof: record.proof,
            owner: record.owner,
            timestamp: record.timestamp,
            blockchain_txn: record.ledger_tx,
        },
    }))
}

/// GET /api/v1/content/verify/{hash}
///
/// Looks up a stored proof by exact content hash and recomputes it.
async fn verify_content(
    State(state): State<AppState>,
    ApiPath(hash): ApiPath<String>,
) -> Result<Json<VerifyContentResponse>, AppError> {
    require_digest(&hash)?;
    let hash = hash.to_lowercase();

    let record = state
        .store
        .find_by_hash(&hash)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No proof recorded for hash '{}'", hash)))?;
    let anchored = state.ledger.lookup(&hash).await.is_some();

    Ok(Json(VerifyContentResponse {
        success: true,
        verification: Verification {
            is_valid: record.is_consistent(),
            owner_did: owner_did(&record.owner),
            content_hash: record.file_hash,
            owner_address: record.owner,
            file_name: record.file_name,
            file_type: record.file_type,
            timestamp: record.timestamp,
            proof: record.proof,
            blockchain_txn: record.ledger_tx,
            anchored,
        },
    }))
}

/// Validates caller metadata: a JSON object no larger than 10KB.
fn validate_metadata(metadata: Option<Value>) -> Result<Metadata, AppError> {
    let metadata = match metadata {
        None | Some(Value::Null) => return Ok(Metadata::new()),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(AppError::BadRequest(
                "Metadata must be a JSON object".to_string(),
            ))
        }
    };

    let metadata_json = serde_json::to_string(&metadata)
        .map_err(|e| AppError::BadRequest(format!("Invalid metadata JSON: {}", e)))?;
    if metadata_json.len() > MAX_METADATA_SIZE {
        return Err(AppError::BadRequest(format!(
            "Metadata exceeds maximum size: {} bytes (max: {} bytes)",
            metadata_json.len(),
            MAX_METADATA_SIZE
        )));
    }

    Ok(metadata)
}
