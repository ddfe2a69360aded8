//! In-memory implementation of the ProofStore trait.
//!
//! Same semantics as PostgreSQL but nothing survives a restart.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::{duplicate_hash, duplicate_wallet, ProofStore, Result};
use crate::models::{ContentRecord, NewContentRecord, NewUser, User};

/// In-memory store. Thread-safe via RwLock.
#[derive(Default)]
pub struct MemoryProofStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    users: HashMap<Uuid, User>,
    /// Lowercase wallet address -> user id.
    wallets: HashMap<String, Uuid>,
    records: HashMap<Uuid, ContentRecord>,
    /// Content hash -> record id.
    hashes: HashMap<String, Uuid>,
    /// Record ids per user in insertion order.
    by_user: HashMap<Uuid, Vec<Uuid>>,
}

impl MemoryProofStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProofStore for MemoryProofStore {
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.wallets.contains_key(&user.wallet_address) {
            return Err(duplicate_wallet(&user.wallet_address));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: user.name,
            wallet_address: user.wallet_address,
            did: user.did,
            created_at: Utc::now(),
        };
        inner.wallets.insert(user.wallet_address.clone(), user.id);
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner.users.get(&id).cloned())
    }

    async fn insert_content(&self, record: NewContentRecord) -> Result<ContentRecord> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let file_hash = record.fingerprint.file_hash.clone();
        if inner.hashes.contains_key(&file_hash) {
            return Err(duplicate_hash(&file_hash));
        }

        let record = record.into_record(Uuid::new_v4(), Utc::now());
        inner.hashes.insert(file_hash, record.id);
        inner.by_user.entry(record.user_id).or_default().push(record.id);
        inner.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn set_ledger_tx(&self, id: Uuid, tx_ref: &str) -> Result<()> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(record) = inner.records.get_mut(&id) {
            record.ledger_tx = Some(tx_ref.to_string());
        }
        Ok(())
    }

    async fn find_by_hash(&self, file_hash: &str) -> Result<Option<ContentRecord>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        Ok(inner
            .hashes
            .get(file_hash)
            .and_then(|id| inner.records.get(id))
            .cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ContentRecord>> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let ids = match inner.by_user.get(&user_id) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| inner.records.get(id))
            .cloned()
            .collect())
    }
}
