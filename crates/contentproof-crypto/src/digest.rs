// Digest format checks and display helpers

use crate::error::{FingerprintError, Result};

/// Number of characters kept on each side by [`shorten_for_display`] by default.
pub const DEFAULT_VISIBLE_EDGE: usize = 8;

const DIGEST_HEX_LEN: usize = 64;

/// Returns true iff `s` is exactly 64 hex characters (either case).
///
/// Purely syntactic: says nothing about whether the digest belongs to known content.
pub fn is_valid_digest_format(s: &str) -> bool {
    s.len() == DIGEST_HEX_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Rejects anything that is not a hex SHA-256 digest.
pub fn require_digest(s: &str) -> Result<()> {
    if is_valid_digest_format(s) {
        Ok(())
    } else {
        Err(FingerprintError::MalformedDigestInput(s.to_string()))
    }
}

/// Shortens a hash for display: `first(edge) + "..." + last(edge)`.
///
/// Strings of at most `2 * edge` characters are returned unchanged. Only for
/// presentation; never compare or look up by the shortened form.
pub fn shorten_for_display(hash: &str, visible_edge: usize) -> String {
    let len = hash.chars().count();
    if len <= visible_edge.saturating_mul(2) {
        return hash.to_string();
    }
    let head: String = hash.chars().take(visible_edge).collect();
    let tail: String = hash.chars().skip(len - visible_edge).collect();
    format!("{}...{}", head, tail)
}
