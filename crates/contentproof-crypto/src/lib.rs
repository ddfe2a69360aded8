// ContentProof Crypto - content fingerprinting and proof objects

pub mod digest;
pub mod error;
pub mod fingerprint;
pub mod hash;
pub mod jcs;
pub mod proof;
pub mod time;
pub mod types;

pub use digest::{is_valid_digest_format, require_digest, shorten_for_display, DEFAULT_VISIBLE_EDGE};
pub use error::{FingerprintError, Result};
pub use fingerprint::{
    build_fingerprint, build_fingerprint_from_reader, enrich_metadata, recompute_fingerprint,
};
pub use hash::{
    hash_bytes, hash_reader, hash_string, multi_input_hash, verify_integrity,
    verify_integrity_reader,
};
pub use jcs::{hash_object, jcs_canonical_bytes};
pub use proof::{build_proof, owner_did, proof_hash};
pub use time::{datetime_to_timestamp, now_iso8601, timestamp_to_datetime};
pub use types::{ContentInfo, Fingerprint, Metadata, ProofObject};
