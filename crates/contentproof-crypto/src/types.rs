//! Type definitions for content fingerprints and proof objects.
//!
//! Field names serialize in camelCase so stored records and API payloads
//! keep the shape clients already consume.

use serde::{Deserialize, Serialize};

/// Descriptive metadata attached to content. Key order carries no meaning;
/// keys are sorted before hashing.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Descriptive facts about an uploaded file.
///
/// The size is not part of this struct: it is always taken from the content itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    /// Name/filename of the content
    pub name: String,
    /// MIME type, e.g. "image/jpeg"; empty when unknown
    pub mime_type: String,
}

impl ContentInfo {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Content hash, metadata hash and their combination at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Fingerprint {
    /// SHA-256 of the content bytes
    pub file_hash: String,
    /// SHA-256 of the canonical enriched metadata
    pub metadata_hash: String,
    /// SHA-256 of `file_hash + metadata_hash` (hex strings concatenated)
    pub combined_hash: String,
    /// ISO 8601 timestamp embedded in the enriched metadata
    pub timestamp: String,
}

/// A claim binding a content hash to an owner at a point in time.
///
/// `proof` is the linkage token handed to ledgers and databases. It can be
/// recomputed from `hash`, `owner` and `timestamp` alone, see [`ProofObject::verify`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofObject {
    /// Content hash being claimed
    pub hash: String,
    /// Owner identifier, always lowercase
    pub owner: String,
    /// ISO 8601 timestamp of the claim
    pub timestamp: String,
    /// SHA-256 of the canonical `{contentHash, owner, timestamp}` claim
    pub proof: String,
    /// Caller metadata plus `version` and `algorithm`
    pub metadata: Metadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_serialization() {
        let fingerprint = Fingerprint {
            file_hash: "aa".to_string(),
            metadata_hash: "bb".to_string(),
            combined_hash: "cc".to_string(),
            timestamp: "2025-01-09T10:30:00.000Z".to_string(),
        };

        let json = serde_json::to_string(&fingerprint).unwrap();
        assert!(json.contains("\"fileHash\":\"aa\""));
        assert!(json.contains("\"metadataHash\":\"bb\""));
        assert!(json.contains("\"combinedHash\":\"cc\""));
    }

    #[test]
    fn test_proof_object_deserialization() {
        let json = r#"{
            "hash": "abc123",
            "owner": "0xabc",
            "timestamp": "2025-01-01T00:00:00Z",
            "proof": "def456",
            "metadata": {"version": "1.0", "algorithm": "SHA-256"}
        }"#;

        let proof: ProofObject = serde_json::from_str(json).unwrap();
        assert_eq!(proof.owner, "0xabc");
        assert_eq!(proof.metadata["algorithm"], "SHA-256");
    }

    #[test]
    fn test_content_info_serialization() {
        let info = ContentInfo::new("photo.jpg", "image/jpeg");
        let json = serde_json::to_string(&info).unwrap();
        assert_eq!(json, r#"{"name":"photo.jpg","mimeType":"image/jpeg"}"#);
    }
}
