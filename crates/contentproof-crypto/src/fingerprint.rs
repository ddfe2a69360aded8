// Content fingerprinting for ContentProof
//
// A fingerprint ties the content hash to a hash of its descriptive metadata.
// The combined hash is taken over the two hex strings, not the raw digests;
// stored fingerprints depend on that, so it must not change.

use std::io::Read;

use serde_json::Value;

use crate::error::Result;
use crate::hash::{hash_bytes, hash_string};
use crate::jcs::hash_object;
use crate::time::now_iso8601;
use crate::types::{ContentInfo, Fingerprint, Metadata};

/// Reserved metadata keys. They always override caller-supplied values.
pub const KEY_FILE_NAME: &str = "fileName";
pub const KEY_FILE_SIZE: &str = "fileSize";
pub const KEY_FILE_TYPE: &str = "fileType";
pub const KEY_TIMESTAMP: &str = "timestamp";

/// Merges the reserved content facts into the caller's metadata.
///
/// This is exactly the object whose canonical form is hashed into
/// `metadata_hash`, so collaborators can persist it and recompute later.
pub fn enrich_metadata(
    info: &ContentInfo,
    size: u64,
    metadata: &Metadata,
    timestamp: &str,
) -> Metadata {
    let mut enriched = metadata.clone();
    enriched.insert(KEY_FILE_NAME.to_string(), Value::from(info.name.clone()));
    enriched.insert(KEY_FILE_SIZE.to_string(), Value::from(size));
    enriched.insert(KEY_FILE_TYPE.to_string(), Value::from(info.mime_type.clone()));
    enriched.insert(KEY_TIMESTAMP.to_string(), Value::from(timestamp));
    enriched
}

/// Fingerprints content and its metadata, stamped with the current time.
///
/// This function:
/// 1. Computes the SHA-256 hash of the content bytes
/// 2. Takes the current time as the fingerprint timestamp
/// 3. Enriches the metadata with fileName, fileSize, fileType and timestamp
/// 4. Hashes the canonical enriched metadata
/// 5. Hashes the concatenated hex strings of both hashes
pub fn build_fingerprint(bytes: &[u8], info: &ContentInfo, metadata: &Metadata) -> Result<Fingerprint> {
    recompute_fingerprint(bytes, info, metadata, &now_iso8601())
}

/// Runs the fingerprint pipeline with a known timestamp.
///
/// Used to re-derive a fingerprint recorded earlier; with the original inputs
/// and timestamp the result is identical to the stored one.
pub fn recompute_fingerprint(
    bytes: &[u8],
    info: &ContentInfo,
    metadata: &Metadata,
    timestamp: &str,
) -> Result<Fingerprint> {
    let file_hash = hash_bytes(bytes);
    let enriched = enrich_metadata(info, bytes.len() as u64, metadata, timestamp);
    let metadata_hash = hash_object(&enriched)?;
    let combined_hash = hash_string(&format!("{}{}", file_hash, metadata_hash));

    Ok(Fingerprint {
        file_hash,
        metadata_hash,
        combined_hash,
        timestamp: timestamp.to_string(),
    })
}

/// Reads all content from `reader` and fingerprints it.
///
/// A read failure fails with `UnreadableContent`; nothing is hashed from a
/// partially read source.
pub fn build_fingerprint_from_reader<R: Read>(
    mut reader: R,
    info: &ContentInfo,
    metadata: &Metadata,
) -> Result<Fingerprint> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    build_fingerprint(&bytes, info, metadata)
}
