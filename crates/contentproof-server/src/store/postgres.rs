//! PostgreSQL implementation of the ProofStore trait.
//!
//! Uniqueness is enforced by the unique indexes created in `migrations/`;
//! unique violations surface as `StoreError::Conflict`.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{duplicate_hash, duplicate_wallet, ProofStore, Result, StoreError};
use crate::models::{ContentRecord, NewContentRecord, NewUser, User};

const CONTENT_COLUMNS: &str = "id, user_id, owner, file_name, file_type, file_size, file_hash, \
     metadata_hash, combined_hash, proof, timestamp, metadata, proof_metadata, ledger_tx, created_at";

/// Store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgProofStore {
    pool: PgPool,
}

impl PgProofStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[async_trait]
impl ProofStore for PgProofStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, wallet_address, did, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            RETURNING id, name, wallet_address, did, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.wallet_address)
        .bind(&user.did)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                duplicate_wallet(&user.wallet_address)
            } else {
                StoreError::Database(e)
            }
        })
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, wallet_address, did, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn insert_content(&self, record: NewContentRecord) -> Result<ContentRecord> {
        let record = record.into_record(Uuid::new_v4(), chrono::Utc::now());
        let query = format!(
            r#"
            INSERT INTO content_records ({CONTENT_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, NOW())
            RETURNING {CONTENT_COLUMNS}
            "#
        );
        sqlx::query_as::<_, ContentRecord>(&query)
            .bind(record.id)
            .bind(record.user_id)
            .bind(&record.owner)
            .bind(&record.file_name)
            .bind(&record.file_type)
            .bind(record.file_size)
            .bind(&record.file_hash)
            .bind(&record.metadata_hash)
            .bind(&record.combined_hash)
            .bind(&record.proof)
            .bind(&record.timestamp)
            .bind(&record.metadata)
            .bind(&record.proof_metadata)
            .bind(&record.ledger_tx)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    duplicate_hash(&record.file_hash)
                } else {
                    StoreError::Database(e)
                }
            })
    }

    async fn set_ledger_tx(&self, id: Uuid, tx_ref: &str) -> Result<()> {
        sqlx::query("UPDATE content_records SET ledger_tx = $1 WHERE id = $2")
            .bind(tx_ref)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_hash(&self, file_hash: &str) -> Result<Option<ContentRecord>> {
        let query = format!("SELECT {CONTENT_COLUMNS} FROM content_records WHERE file_hash = $1");
        let record = sqlx::query_as::<_, ContentRecord>(&query)
            .bind(file_hash)
            .fetch_optional(&self.pool)
            .await?;
        Ok(record)
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ContentRecord>> {
        let query = format!(
            "SELECT {CONTENT_COLUMNS} FROM content_records WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let records = sqlx::query_as::<_, ContentRecord>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }
}
