// Metadata parsing for the --meta flag
//
// Dotted keys build nested objects: author.name=Alice becomes
// { "author": { "name": "Alice" } }

use anyhow::{anyhow, Result};
use contentproof_crypto::Metadata;
use serde_json::Value;

/// Parses `key=value` arguments into a metadata object.
///
/// - `author=Alice` -> `{ "author": "Alice" }`
/// - `author.name=Alice` -> `{ "author": { "name": "Alice" } }`
/// - `author.email=alice@example.com` -> merges into the object above
///
/// Values are always strings. A later argument with the same key replaces
/// the earlier value.
pub fn parse_metadata(args: &[String]) -> Result<Metadata> {
    let mut root = Metadata::new();

    for arg in args {
        let (key, value) = split_pair(arg)?;
        insert_path(&mut root, key, value)?;
    }

    Ok(root)
}

fn split_pair(arg: &str) -> Result<(&str, &str)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow!("Invalid metadata '{}': expected KEY=VALUE", arg))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(anyhow!("Empty key in metadata '{}'", arg));
    }

    Ok((key, value.trim()))
}

fn insert_path(root: &mut Metadata, key: &str, value: &str) -> Result<()> {
    let segments: Vec<&str> = key.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(anyhow!("Invalid key path '{}': empty segment", key));
    }

    let (last, parents) = match segments.split_last() {
        Some(split) => split,
        None => return Err(anyhow!("Empty key path")),
    };

    let mut current = root;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Metadata::new()));
        current = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(anyhow!(
                    "Cannot nest '{}': '{}' already holds a value",
                    key,
                    segment
                ))
            }
        };
    }

    current.insert(last.to_string(), Value::String(value.to_string()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flat_pairs() {
        let meta = parse_metadata(&args(&["author=Alice", "license=CC-BY"])).unwrap();
        assert_eq!(meta["author"], "Alice");
        assert_eq!(meta["license"], "CC-BY");
    }

    #[test]
    fn test_nested_keys_merge() {
        let meta = parse_metadata(&args(&[
            "author.name=Alice",
            "author.email=alice@example.com",
            "a.b.c=deep",
        ]))
        .unwrap();
        assert_eq!(meta["author"]["name"], "Alice");
        assert_eq!(meta["author"]["email"], "alice@example.com");
        assert_eq!(meta["a"]["b"]["c"], "deep");
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_metadata(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let meta = parse_metadata(&args(&["equation=a=b+c"])).unwrap();
        assert_eq!(meta["equation"], "a=b+c");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let meta = parse_metadata(&args(&["  title  =  Sunset  "])).unwrap();
        assert_eq!(meta["title"], "Sunset");
    }

    #[test]
    fn test_rejects_malformed_pairs() {
        let err = parse_metadata(&args(&["no_equals_sign"])).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));

        let err = parse_metadata(&args(&["=value"])).unwrap_err();
        assert!(err.to_string().contains("Empty key"));

        let err = parse_metadata(&args(&["a..b=value"])).unwrap_err();
        assert!(err.to_string().contains("empty segment"));
    }

    #[test]
    fn test_rejects_nesting_under_scalar() {
        let err = parse_metadata(&args(&["author=Alice", "author.name=Bob"])).unwrap_err();
        assert!(err.to_string().contains("already holds a value"));
    }
}
