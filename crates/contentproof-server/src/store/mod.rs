//! Proof store: persistence for users and content records.
//!
//! The store is the only shared resource behind the HTTP handlers and is
//! responsible for "one record per content hash". Two backends:
//! in-memory (tests, development) and PostgreSQL.

mod memory;
mod postgres;

pub use memory::MemoryProofStore;
pub use postgres::PgProofStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{ContentRecord, NewContentRecord, NewUser, User};

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique key (wallet address or content hash) is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Async persistence interface used by the route handlers.
#[async_trait]
pub trait ProofStore: Send + Sync {
    /// Creates a user. Fails with `Conflict` if the wallet is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<User>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Stores a content record. Fails with `Conflict` if the content hash is
    /// already recorded.
    async fn insert_content(&self, record: NewContentRecord) -> Result<ContentRecord>;

    /// Attaches a ledger transaction reference to a stored record.
    async fn set_ledger_tx(&self, id: Uuid, tx_ref: &str) -> Result<()>;

    /// Exact match on the content hash.
    async fn find_by_hash(&self, file_hash: &str) -> Result<Option<ContentRecord>>;

    /// A user's records, newest first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ContentRecord>>;
}

pub(crate) fn duplicate_wallet(wallet_address: &str) -> StoreError {
    StoreError::Conflict(format!(
        "Wallet address '{}' is already registered",
        wallet_address
    ))
}

pub(crate) fn duplicate_hash(file_hash: &str) -> StoreError {
    StoreError::Conflict(format!(
        "Content with hash '{}' has already been registered",
        file_hash
    ))
}
