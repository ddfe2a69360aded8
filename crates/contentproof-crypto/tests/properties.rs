// Property tests for the fingerprint and proof engine

use contentproof_crypto::{
    build_fingerprint, build_proof, hash_bytes, hash_object, hash_string, is_valid_digest_format,
    multi_input_hash, shorten_for_display, verify_integrity, ContentInfo, Metadata,
};
use proptest::prelude::*;
use serde_json::Value;

fn flip_first_char(hash: &str) -> String {
    let mut chars: Vec<char> = hash.chars().collect();
    chars[0] = if chars[0] == '0' { '1' } else { '0' };
    chars.into_iter().collect()
}

proptest! {
    #[test]
    fn hash_bytes_is_lowercase_hex_and_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let first = hash_bytes(&bytes);
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        prop_assert_eq!(&first, &hash_bytes(&bytes));
        prop_assert!(is_valid_digest_format(&first));
    }

    #[test]
    fn hash_object_ignores_insertion_order(
        entries in proptest::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..12)
    ) {
        let forward: serde_json::Map<String, Value> =
            entries.iter().map(|(k, v)| (k.clone(), Value::from(*v))).collect();
        let mut reversed_entries: Vec<_> = entries.iter().collect();
        reversed_entries.reverse();
        let backward: serde_json::Map<String, Value> =
            reversed_entries.into_iter().map(|(k, v)| (k.clone(), Value::from(*v))).collect();

        prop_assert_eq!(hash_object(&forward).unwrap(), hash_object(&backward).unwrap());
    }

    #[test]
    fn combined_hash_is_hash_of_concatenated_hex(
        bytes in proptest::collection::vec(any::<u8>(), 0..256),
        author in "[A-Za-z ]{0,16}",
    ) {
        let mut metadata = Metadata::new();
        metadata.insert("author".into(), Value::from(author));
        let info = ContentInfo::new("file.bin", "application/octet-stream");

        let fingerprint = build_fingerprint(&bytes, &info, &metadata).unwrap();
        prop_assert_eq!(
            &fingerprint.combined_hash,
            &hash_string(&format!("{}{}", fingerprint.file_hash, fingerprint.metadata_hash))
        );
        prop_assert_eq!(fingerprint.file_hash, hash_bytes(&bytes));
    }

    #[test]
    fn verify_integrity_accepts_own_hash_and_rejects_flipped(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        let hash = hash_bytes(&bytes);
        prop_assert!(verify_integrity(&bytes, &hash));
        prop_assert!(!verify_integrity(&bytes, &flip_first_char(&hash)));
    }

    #[test]
    fn multi_input_hash_is_symmetric(x in "[^|]{0,16}", y in "[^|]{0,16}") {
        prop_assert_eq!(multi_input_hash(&[x.as_str(), y.as_str()]), multi_input_hash(&[y.as_str(), x.as_str()]));
    }

    #[test]
    fn shorten_keeps_edges(hash in "[0-9a-f]{17,80}", edge in 1usize..8) {
        let short = shorten_for_display(&hash, edge);
        prop_assert!(short.starts_with(&hash[..edge]));
        prop_assert!(short.ends_with(&hash[hash.len() - edge..]));
        prop_assert_eq!(short.len(), edge * 2 + 3);
    }

    #[test]
    fn proof_owner_is_always_lowercase(owner in "0x[0-9a-fA-F]{40}") {
        let proof = build_proof(&hash_bytes(b"content"), &owner, None, Metadata::new()).unwrap();
        prop_assert_eq!(&proof.owner, &owner.to_lowercase());
        prop_assert!(proof.verify());
    }
}
