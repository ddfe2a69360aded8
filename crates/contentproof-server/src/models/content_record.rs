//! Content record model for fingerprinted uploads.

use chrono::{DateTime, Utc};
use contentproof_crypto::{hash_object, hash_string, Fingerprint, Metadata, ProofObject};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A fingerprinted upload together with its proof of ownership.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// User who uploaded the content.
    pub user_id: Uuid,
    /// Lowercase owner wallet address bound by the proof.
    pub owner: String,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    /// SHA-256 of the content (hex-encoded).
    pub file_hash: String,
    pub metadata_hash: String,
    pub combined_hash: String,
    /// Proof token over `{contentHash, owner, timestamp}`.
    pub proof: String,
    /// Exact timestamp string hashed into the fingerprint and the proof.
    pub timestamp: String,
    /// Enriched metadata hashed into `metadata_hash`.
    pub metadata: serde_json::Value,
    /// Metadata carried by the proof object.
    pub proof_metadata: serde_json::Value,
    /// Ledger transaction reference, once anchored.
    pub ledger_tx: Option<String>,
    /// When this record was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new content record.
#[derive(Debug, Clone)]
pub struct NewContentRecord {
    pub user_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub fingerprint: Fingerprint,
    pub proof: ProofObject,
    pub metadata: Metadata,
}

impl ContentRecord {
    /// Returns the verification URL path for this record.
    pub fn verify_path(&self) -> String {
        format!("/api/v1/content/verify/{}", self.file_hash)
    }

    /// The stored proof as a [`ProofObject`].
    pub fn proof_object(&self) -> ProofObject {
        ProofObject {
            hash: self.file_hash.clone(),
            owner: self.owner.clone(),
            timestamp: self.timestamp.clone(),
            proof: self.proof.clone(),
            metadata: self.proof_metadata.as_object().cloned().unwrap_or_default(),
        }
    }

    /// Recomputes every derived hash from the stored fields.
    ///
    /// True only if the proof, the metadata hash and the combined hash all
    /// match what was stored.
    pub fn is_consistent(&self) -> bool {
        if !self.proof_object().verify() {
            return false;
        }
        let metadata_ok = match hash_object(&self.metadata) {
            Ok(hash) => hash == self.metadata_hash,
            Err(e) => {
                tracing::warn!(id = %self.id, error = %e, "stored metadata could not be hashed");
                false
            }
        };
        metadata_ok
            && hash_string(&format!("{}{}", self.file_hash, self.metadata_hash)) == self.combined_hash
    }
}

impl NewContentRecord {
    /// Materializes the record with a fresh id.
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> ContentRecord {
        ContentRecord {
            id,
            user_id: self.user_id,
            owner: self.proof.owner,
            file_name: self.file_name,
            file_type: self.file_type,
            file_size: self.file_size,
            file_hash: self.fingerprint.file_hash,
            metadata_hash: self.fingerprint.metadata_hash,
            combined_hash: self.fingerprint.combined_hash,
            proof: self.proof.proof,
            timestamp: self.proof.timestamp,
            metadata: serde_json::Value::Object(self.metadata),
            proof_metadata: serde_json::Value::Object(self.proof.metadata),
            ledger_tx: None,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contentproof_crypto::{build_fingerprint, build_proof, enrich_metadata, ContentInfo};

    fn sample_record() -> ContentRecord {
        let info = ContentInfo::new("artwork_final.jpg", "image/jpeg");
        let fingerprint = build_fingerprint(b"pixels", &info, &Metadata::new()).unwrap();
        let proof = build_proof(
            &fingerprint.file_hash,
            "0xABC",
            Some(fingerprint.timestamp.clone()),
            Metadata::new(),
        )
        .unwrap();
        let metadata = enrich_metadata(&info, 6, &Metadata::new(), &fingerprint.timestamp);

        NewContentRecord {
            user_id: Uuid::new_v4(),
            file_name: info.name.clone(),
            file_type: info.mime_type.clone(),
            file_size: 6,
            fingerprint,
            proof,
            metadata,
        }
        .into_record(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_into_record_keeps_proof_fields() {
        let record = sample_record();
        assert_eq!(record.owner, "0xabc");
        assert_eq!(record.proof_object().metadata["algorithm"], "SHA-256");
        assert!(record.ledger_tx.is_none());
        assert!(record.verify_path().ends_with(&record.file_hash));
    }

    #[test]
    fn test_fresh_record_is_consistent() {
        assert!(sample_record().is_consistent());
    }

    #[test]
    fn test_tampered_record_is_inconsistent() {
        let mut record = sample_record();
        record.owner = "0xdef".to_string();
        assert!(!record.is_consistent());

        let mut record = sample_record();
        record.metadata["fileName"] = serde_json::json!("other.jpg");
        assert!(!record.is_consistent());

        let mut record = sample_record();
        record.combined_hash = record.metadata_hash.clone();
        assert!(!record.is_consistent());
    }
}
