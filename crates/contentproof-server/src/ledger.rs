//! Ledger anchoring.
//!
//! Proofs are anchored on a ledger (an Internet Computer canister in
//! production) through the [`LedgerAnchor`] trait. The client is built from an
//! explicit [`LedgerConfig`] passed in by the caller.
//!
//! [`LocalLedger`] is an in-process ledger for development and tests. It keeps
//! the same rules a canister enforces: one record per hash, and only the owner
//! may change a record's verification flag.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use contentproof_crypto::datetime_to_timestamp;

/// Which ledger network the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerNetwork {
    Local,
    Ic,
}

impl LedgerNetwork {
    /// Host used when none is configured.
    pub fn default_host(self) -> &'static str {
        match self {
            LedgerNetwork::Local => "http://localhost:8000",
            LedgerNetwork::Ic => "https://ic0.app",
        }
    }
}

impl fmt::Display for LedgerNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerNetwork::Local => f.write_str("local"),
            LedgerNetwork::Ic => f.write_str("ic"),
        }
    }
}

impl FromStr for LedgerNetwork {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(LedgerNetwork::Local),
            "ic" => Ok(LedgerNetwork::Ic),
            other => Err(format!("unknown ledger network '{}' (expected 'local' or 'ic')", other)),
        }
    }
}

/// Connection settings for a ledger client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Canister holding the proof records.
    pub canister_id: String,
    pub network: LedgerNetwork,
    /// Endpoint URL; defaults per network.
    pub host: String,
}

impl LedgerConfig {
    pub fn new(canister_id: impl Into<String>, network: LedgerNetwork, host: Option<String>) -> Self {
        Self {
            canister_id: canister_id.into(),
            network,
            host: host.unwrap_or_else(|| network.default_host().to_string()),
        }
    }
}

/// What gets anchored for a proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRequest {
    pub hash: String,
    pub owner: String,
    pub file_name: String,
    pub file_type: String,
}

/// Outcome of a ledger write. Failures are reported here rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnchorReceipt {
    pub success: bool,
    /// Opaque transaction reference on success.
    pub tx_ref: Option<String>,
    pub error: Option<String>,
}

impl AnchorReceipt {
    pub fn ok(tx_ref: String) -> Self {
        Self {
            success: true,
            tx_ref: Some(tx_ref),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            tx_ref: None,
            error: Some(error.into()),
        }
    }
}

/// A proof as the ledger stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRecord {
    pub hash: String,
    pub owner: String,
    /// Nanoseconds since the Unix epoch.
    pub timestamp_ns: u64,
    pub file_name: String,
    pub file_type: String,
    pub verified: bool,
}

/// Ledger client interface used by the upload and verification handlers.
#[async_trait]
pub trait LedgerAnchor: Send + Sync {
    fn config(&self) -> &LedgerConfig;

    /// Records a proof. A hash can be anchored only once.
    async fn anchor(&self, request: AnchorRequest) -> AnchorReceipt;

    async fn lookup(&self, hash: &str) -> Option<LedgerRecord>;

    async fn owner_records(&self, owner: &str) -> Vec<LedgerRecord>;

    async fn total_records(&self) -> u64;

    /// Changes the verification flag of a record. Owner only.
    async fn set_verified(&self, hash: &str, verified: bool, owner: &str) -> AnchorReceipt;
}

/// In-process ledger.
pub struct LocalLedger {
    config: LedgerConfig,
    records: Mutex<HashMap<String, LedgerRecord>>,
}

impl LocalLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            config,
            records: Mutex::new(HashMap::new()),
        }
    }
}

/// Generates a transaction reference: `0x` followed by 32 random bytes in hex.
fn generate_tx_ref() -> String {
    let mut rng = rand::thread_rng();
    let bytes: [u8; 32] = rng.gen();
    format!("0x{}", hex::encode(bytes))
}

#[async_trait]
impl LedgerAnchor for LocalLedger {
    fn config(&self) -> &LedgerConfig {
        &self.config
    }

    async fn anchor(&self, request: AnchorRequest) -> AnchorReceipt {
        let hash = request.hash.to_lowercase();
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if records.contains_key(&hash) {
            return AnchorReceipt::failed(format!("proof for hash '{}' already exists", hash));
        }

        let tx_ref = generate_tx_ref();
        tracing::info!(
            canister = %self.config.canister_id,
            network = %self.config.network,
            hash = %hash,
            tx = %tx_ref,
            "anchored proof"
        );
        records.insert(
            hash.clone(),
            LedgerRecord {
                hash,
                owner: request.owner.to_lowercase(),
                timestamp_ns: datetime_to_timestamp(Utc::now()),
                file_name: request.file_name,
                file_type: request.file_type,
                verified: true,
            },
        );
        AnchorReceipt::ok(tx_ref)
    }

    async fn lookup(&self, hash: &str) -> Option<LedgerRecord> {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.get(&hash.to_lowercase()).cloned()
    }

    async fn owner_records(&self, owner: &str) -> Vec<LedgerRecord> {
        let owner = owner.to_lowercase();
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let mut owned: Vec<LedgerRecord> = records
            .values()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.timestamp_ns.cmp(&a.timestamp_ns).then_with(|| a.hash.cmp(&b.hash)));
        owned
    }

    async fn total_records(&self) -> u64 {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.len() as u64
    }

    async fn set_verified(&self, hash: &str, verified: bool, owner: &str) -> AnchorReceipt {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(record) = records.get_mut(&hash.to_lowercase()) else {
            return AnchorReceipt::failed(format!("no proof for hash '{}'", hash));
        };
        if record.owner != owner.to_lowercase() {
            return AnchorReceipt::failed("only the owner can change verification status");
        }
        record.verified = verified;
        AnchorReceipt::ok(generate_tx_ref())
    }
}
