// Proof object construction for ContentProof
//
// A proof binds a content hash to an owner at a timestamp. Owners are
// lowercased before anything is hashed or stored.

use serde::Serialize;
use serde_json::Value;

use crate::error::Result;
use crate::jcs::hash_object;
use crate::time::now_iso8601;
use crate::types::{Metadata, ProofObject};

/// Proof format version recorded in proof metadata.
pub const PROOF_VERSION: &str = "1.0";

/// Hash algorithm recorded in proof metadata.
pub const PROOF_ALGORITHM: &str = "SHA-256";

/// The claim whose canonical form is hashed into `ProofObject::proof`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProofClaim<'a> {
    content_hash: &'a str,
    owner: &'a str,
    timestamp: &'a str,
}

/// Computes the proof token for a claim.
///
/// `owner` is lowercased here, so callers may pass any casing.
pub fn proof_hash(content_hash: &str, owner: &str, timestamp: &str) -> Result<String> {
    let owner = owner.to_lowercase();
    hash_object(&ProofClaim {
        content_hash,
        owner: &owner,
        timestamp,
    })
}

/// Builds a proof object ready for anchoring.
///
/// # Arguments
/// * `content_hash` - Hash of the content being claimed
/// * `owner` - Owner identifier (wallet address); stored lowercase
/// * `timestamp` - ISO 8601 timestamp, or `None` to use the current time
/// * `metadata` - Caller metadata; `version` and `algorithm` always win
pub fn build_proof(
    content_hash: &str,
    owner: &str,
    timestamp: Option<String>,
    metadata: Metadata,
) -> Result<ProofObject> {
    let timestamp = timestamp.unwrap_or_else(now_iso8601);
    let owner = owner.to_lowercase();
    let proof = proof_hash(content_hash, &owner, &timestamp)?;

    let mut metadata = metadata;
    metadata.insert("version".to_string(), Value::from(PROOF_VERSION));
    metadata.insert("algorithm".to_string(), Value::from(PROOF_ALGORITHM));

    Ok(ProofObject {
        hash: content_hash.to_string(),
        owner,
        timestamp,
        proof,
        metadata,
    })
}

impl ProofObject {
    /// Recomputes the proof token from this object's own fields.
    ///
    /// Returns false on any mismatch, including a proof stored with an
    /// uppercase owner.
    pub fn verify(&self) -> bool {
        if self.owner != self.owner.to_lowercase() {
            return false;
        }
        match proof_hash(&self.hash, &self.owner, &self.timestamp) {
            Ok(expected) => expected == self.proof,
            Err(e) => {
                tracing::warn!(error = %e, hash = %self.hash, "proof could not be recomputed");
                false
            }
        }
    }
}

/// Decentralized identifier for a wallet address: `did:eth:<lowercase address>`.
pub fn owner_did(wallet_address: &str) -> String {
    format!("did:eth:{}", wallet_address.to_lowercase())
}
