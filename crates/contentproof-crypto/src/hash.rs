// SHA-256 hashing utilities for ContentProof

use std::io::Read;

use sha2::{Digest, Sha256};

use crate::error::Result;

/// Separator placed between inputs by [`multi_input_hash`].
pub const MULTI_INPUT_DELIMITER: &str = "|";

const READ_CHUNK_SIZE: usize = 64 * 1024;

/// Computes the SHA-256 hash of the input bytes and returns it as a lowercase hex string.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let result = hasher.finalize();
    hex::encode(result)
}

/// SHA-256 of the UTF-8 encoding of `input`.
pub fn hash_string(input: &str) -> String {
    hash_bytes(input.as_bytes())
}

/// Streams a reader through SHA-256.
///
/// Fails with [`FingerprintError::UnreadableContent`](crate::FingerprintError::UnreadableContent)
/// if the reader errors before reaching EOF.
pub fn hash_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Returns true if `bytes` hash to exactly `expected_hash`.
///
/// The comparison is an exact string comparison; an uppercase digest does not
/// match. This is not a secret-bearing comparison, so it is not constant time.
pub fn verify_integrity(bytes: &[u8], expected_hash: &str) -> bool {
    hash_bytes(bytes) == expected_hash
}

/// Reader form of [`verify_integrity`].
///
/// A read failure counts as "did not verify": it is logged and `false` is returned.
pub fn verify_integrity_reader<R: Read>(reader: R, expected_hash: &str) -> bool {
    match hash_reader(reader) {
        Ok(actual) => actual == expected_hash,
        Err(e) => {
            tracing::warn!(error = %e, "content integrity check could not read content");
            false
        }
    }
}

/// Order-independent hash over several strings.
///
/// Inputs are sorted by UTF-16 code units (the order JavaScript clients use),
/// joined with `|` and hashed. The delimiter is not escaped, so `["a|b"]` and
/// `["a", "b"]` collide; callers must keep `|` out of inputs.
pub fn multi_input_hash(inputs: &[&str]) -> String {
    let mut sorted = inputs.to_vec();
    sorted.sort_unstable_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    hash_string(&sorted.join(MULTI_INPUT_DELIMITER))
}
