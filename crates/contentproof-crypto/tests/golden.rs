// Golden vector integration test for ContentProof
//
// Validates fingerprints and proofs against fixtures/golden_vectors.json.
// Stored proofs are only interoperable if every value matches exactly.

use contentproof_crypto::{
    build_proof, hash_bytes, jcs_canonical_bytes, multi_input_hash, recompute_fingerprint,
    enrich_metadata, ContentInfo, Metadata,
};
use serde::Deserialize;
use std::fs;

/// Structure for parsing the golden vector file
#[derive(Deserialize)]
struct GoldenVector {
    content_utf8: String,
    file_name: String,
    file_type: String,
    timestamp: String,
    metadata: Metadata,
    file_hash: String,
    canonical_metadata: String,
    metadata_hash: String,
    combined_hash: String,
    owner: String,
    canonical_claim: String,
    proof: String,
    multi_inputs: Vec<String>,
    multi_input_hash: String,
}

fn load_golden_vector() -> GoldenVector {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/golden_vectors.json");
    let content = fs::read_to_string(path).expect("Failed to read golden_vectors.json");
    serde_json::from_str(&content).expect("Failed to parse golden_vectors.json")
}

#[test]
fn test_file_hash() {
    let golden = load_golden_vector();
    assert_eq!(hash_bytes(golden.content_utf8.as_bytes()), golden.file_hash);
}

#[test]
fn test_canonical_enriched_metadata() {
    let golden = load_golden_vector();
    let info = ContentInfo::new(golden.file_name.clone(), golden.file_type.clone());
    let enriched = enrich_metadata(
        &info,
        golden.content_utf8.len() as u64,
        &golden.metadata,
        &golden.timestamp,
    );

    let canonical = jcs_canonical_bytes(&enriched).expect("canonicalize");
    assert_eq!(
        String::from_utf8(canonical).unwrap(),
        golden.canonical_metadata,
        "Canonical metadata mismatch"
    );
}

#[test]
fn test_fingerprint_matches_golden() {
    let golden = load_golden_vector();
    let info = ContentInfo::new(golden.file_name.clone(), golden.file_type.clone());

    let fingerprint = recompute_fingerprint(
        golden.content_utf8.as_bytes(),
        &info,
        &golden.metadata,
        &golden.timestamp,
    )
    .expect("fingerprint");

    assert_eq!(fingerprint.file_hash, golden.file_hash);
    assert_eq!(fingerprint.metadata_hash, golden.metadata_hash);
    assert_eq!(fingerprint.combined_hash, golden.combined_hash);
    assert_eq!(fingerprint.timestamp, golden.timestamp);
}

#[test]
fn test_proof_matches_golden() {
    let golden = load_golden_vector();

    let proof = build_proof(
        &golden.file_hash,
        &golden.owner,
        Some(golden.timestamp.clone()),
        Metadata::new(),
    )
    .expect("proof");

    assert_eq!(proof.owner, golden.owner.to_lowercase());
    assert_eq!(proof.proof, golden.proof, "Proof token mismatch");
    assert_eq!(hash_bytes(golden.canonical_claim.as_bytes()), golden.proof);
    assert!(proof.verify());
}

#[test]
fn test_multi_input_hash_matches_golden() {
    let golden = load_golden_vector();
    let inputs: Vec<&str> = golden.multi_inputs.iter().map(String::as_str).collect();
    assert_eq!(multi_input_hash(&inputs), golden.multi_input_hash);
}
