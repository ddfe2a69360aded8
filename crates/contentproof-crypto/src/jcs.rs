// JCS (JSON Canonicalization Scheme) - RFC 8785 implementation

use serde::Serialize;

use crate::error::{FingerprintError, Result};
use crate::hash::hash_bytes;

/// Canonicalizes a serializable value according to RFC 8785 (JCS) and returns the UTF-8 bytes.
///
/// - Object keys are sorted lexicographically, at every depth
/// - Array order is preserved
/// - No unnecessary whitespace
/// - Numbers are serialized consistently
///
/// Values that cannot be represented as JSON fail with
/// [`FingerprintError::InvalidMetadata`].
pub fn jcs_canonical_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let canonical =
        serde_jcs::to_string(value).map_err(|e| FingerprintError::InvalidMetadata(e.to_string()))?;
    Ok(canonical.into_bytes())
}

/// SHA-256 of the canonical JSON form of `value`.
///
/// Two maps holding the same entries hash identically whatever order
/// the entries were inserted in.
pub fn hash_object<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let bytes = jcs_canonical_bytes(value)?;
    Ok(hash_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;

    #[test]
    fn test_field_order_independence() {
        let json1 = r#"{"zebra": 1, "alpha": 2, "middle": 3}"#;
        let json2 = r#"{"alpha": 2, "middle": 3, "zebra": 1}"#;

        let value1: serde_json::Value = serde_json::from_str(json1).unwrap();
        let value2: serde_json::Value = serde_json::from_str(json2).unwrap();

        let bytes1 = jcs_canonical_bytes(&value1).unwrap();
        let bytes2 = jcs_canonical_bytes(&value2).unwrap();
        assert_eq!(bytes1, bytes2);

        let canonical_str = String::from_utf8(bytes1).unwrap();
        assert_eq!(canonical_str, r#"{"alpha":2,"middle":3,"zebra":1}"#);
    }

    #[test]
    fn test_nested_object_sorting() {
        let json = r#"{"outer": {"z": 1, "a": 2}, "inner": {"y": 3, "b": 4}}"#;
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        let canonical_str = String::from_utf8(jcs_canonical_bytes(&value).unwrap()).unwrap();

        assert_eq!(canonical_str, r#"{"inner":{"b":4,"y":3},"outer":{"a":2,"z":1}}"#);
    }

    #[test]
    fn test_array_order_preserved() {
        let value = serde_json::json!({"tags": ["b", "a", {"z": 1, "a": 0}]});
        let canonical_str = String::from_utf8(jcs_canonical_bytes(&value).unwrap()).unwrap();

        assert_eq!(canonical_str, r#"{"tags":["b","a",{"a":0,"z":1}]}"#);
    }

    #[test]
    fn test_hash_object_ignores_insertion_order() {
        let mut first = serde_json::Map::new();
        first.insert("title".into(), "sunset".into());
        first.insert("camera".into(), serde_json::json!({"iso": 100, "body": "x100"}));

        let mut second = serde_json::Map::new();
        second.insert("camera".into(), serde_json::json!({"body": "x100", "iso": 100}));
        second.insert("title".into(), "sunset".into());

        assert_eq!(hash_object(&first).unwrap(), hash_object(&second).unwrap());
    }

    #[test]
    fn test_hash_object_is_hash_of_canonical_string() {
        let value = serde_json::json!({"b": 2, "a": 1});
        assert_eq!(
            hash_object(&value).unwrap(),
            crate::hash::hash_string(r#"{"a":1,"b":2}"#)
        );
    }

    #[test]
    fn test_unserializable_value_is_invalid_metadata() {
        struct Opaque;

        impl Serialize for Opaque {
            fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("opaque handle cannot be serialized"))
            }
        }

        let err = hash_object(&Opaque).unwrap_err();
        assert!(matches!(err, FingerprintError::InvalidMetadata(_)));
        assert!(err.to_string().contains("opaque handle"));
    }
}
