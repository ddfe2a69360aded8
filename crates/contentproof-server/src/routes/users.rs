//! User registration and per-user content listing.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use contentproof_crypto::{shorten_for_display, DEFAULT_VISIBLE_EDGE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::models::{ContentRecord, NewUser, User};
use crate::state::AppState;

/// Request body for registering a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub wallet_address: String,
}

/// Public view of a user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub wallet_address: String,
    pub did: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            wallet_address: user.wallet_address,
            did: user.did,
        }
    }
}

/// Response for successful registration.
#[derive(Debug, Serialize)]
pub struct RegisterUserResponse {
    pub success: bool,
    pub user: UserView,
}

/// One entry of a user's content listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub file_hash: String,
    /// Shortened hash for display only.
    pub display_hash: String,
    pub timestamp: String,
    pub verified: bool,
    pub blockchain_txn: Option<String>,
}

impl From<ContentRecord> for ContentSummary {
    fn from(record: ContentRecord) -> Self {
        Self {
            verified: record.is_consistent(),
            display_hash: shorten_for_display(&record.file_hash, DEFAULT_VISIBLE_EDGE),
            id: record.id,
            file_name: record.file_name,
            file_type: record.file_type,
            file_size: record.file_size,
            file_hash: record.file_hash,
            timestamp: record.timestamp,
            blockchain_txn: record.ledger_tx,
        }
    }
}

/// Response for a user's content listing.
#[derive(Debug, Serialize)]
pub struct UserContentResponse {
    pub success: bool,
    pub content: Vec<ContentSummary>,
}

/// Creates the users router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(register_user))
        .route("/{user_id}/content", get(list_user_content))
        .with_state(state)
}

/// POST /api/v1/users
///
/// Registers a wallet address and derives its DID.
async fn register_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, AppError> {
    if req.name.trim().is_empty() || req.wallet_address.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and wallet address are required".to_string(),
        ));
    }

    let user = state
        .store
        .insert_user(NewUser::new(&req.name, &req.wallet_address))
        .await?;
    tracing::info!(user_id = %user.id, did = %user.did, "registered user");

    Ok(Json(RegisterUserResponse {
        success: true,
        user: user.into(),
    }))
}

/// GET /api/v1/users/{user_id}/content
///
/// Lists a user's registered content, newest first.
async fn list_user_content(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<UserContentResponse>, AppError> {
    if state.store.get_user(user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User {} not found", user_id)));
    }

    let records = state.store.list_by_user(user_id).await?;
    Ok(Json(UserContentResponse {
        success: true,
        content: records.into_iter().map(ContentSummary::from).collect(),
    }))
}
