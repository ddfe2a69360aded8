//! Server configuration.
//!
//! Everything is read from environment variables once at startup and passed
//! down explicitly; nothing here is global.

use std::net::SocketAddr;

use crate::ledger::{LedgerConfig, LedgerNetwork};

pub const ENV_LISTEN_ADDR: &str = "CONTENTPROOF_LISTEN_ADDR";
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_MAX_UPLOAD_BYTES: &str = "CONTENTPROOF_MAX_UPLOAD_BYTES";
pub const ENV_LEDGER_CANISTER_ID: &str = "CONTENTPROOF_LEDGER_CANISTER_ID";
pub const ENV_LEDGER_NETWORK: &str = "CONTENTPROOF_LEDGER_NETWORK";
pub const ENV_LEDGER_HOST: &str = "CONTENTPROOF_LEDGER_HOST";

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;
const DEFAULT_CANISTER_ID: &str = "rdmx6-jaaaa-aaaah-qcaiq-cai";

/// Configuration errors, each naming the offending variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is not a valid value: '{value}' ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuration for the HTTP server and its collaborators.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to.
    pub listen_addr: SocketAddr,
    /// PostgreSQL connection string; `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Largest accepted upload, in decoded content bytes.
    pub max_upload_bytes: usize,
    /// Ledger client configuration.
    pub ledger: LedgerConfig,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let listen_raw = get(ENV_LISTEN_ADDR).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: ENV_LISTEN_ADDR,
                value: listen_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let max_upload_bytes = match get(ENV_MAX_UPLOAD_BYTES) {
            Some(raw) => raw.parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
                var: ENV_MAX_UPLOAD_BYTES,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        let network = match get(ENV_LEDGER_NETWORK) {
            Some(raw) => raw.parse().map_err(|reason| ConfigError::Invalid {
                var: ENV_LEDGER_NETWORK,
                value: raw.clone(),
                reason,
            })?,
            None => LedgerNetwork::Local,
        };

        let canister_id =
            get(ENV_LEDGER_CANISTER_ID).unwrap_or_else(|| DEFAULT_CANISTER_ID.to_string());
        let ledger = LedgerConfig::new(canister_id, network, get(ENV_LEDGER_HOST));

        Ok(Self {
            listen_addr,
            database_url: get(ENV_DATABASE_URL),
            max_upload_bytes,
            ledger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:8080");
        assert!(config.database_url.is_none());
        assert_eq!(config.max_upload_bytes, 25 * 1024 * 1024);
        assert_eq!(config.ledger.canister_id, "rdmx6-jaaaa-aaaah-qcaiq-cai");
        assert_eq!(config.ledger.network, LedgerNetwork::Local);
        assert_eq!(config.ledger.host, "http://localhost:8000");
    }

    #[test]
    fn test_ic_network_default_host() {
        let config = ServerConfig::from_lookup(lookup(&[(ENV_LEDGER_NETWORK, "ic")])).unwrap();
        assert_eq!(config.ledger.network, LedgerNetwork::Ic);
        assert_eq!(config.ledger.host, "https://ic0.app");
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            (ENV_LISTEN_ADDR, "127.0.0.1:9000"),
            (ENV_DATABASE_URL, "postgres://localhost/contentproof"),
            (ENV_MAX_UPLOAD_BYTES, "1024"),
            (ENV_LEDGER_CANISTER_ID, "aaaaa-aa"),
            (ENV_LEDGER_HOST, "http://ledger.internal:4943"),
        ]))
        .unwrap();

        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/contentproof")
        );
        assert_eq!(config.max_upload_bytes, 1024);
        assert_eq!(config.ledger.canister_id, "aaaaa-aa");
        assert_eq!(config.ledger.host, "http://ledger.internal:4943");
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[(ENV_DATABASE_URL, "  ")])).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = ServerConfig::from_lookup(lookup(&[(ENV_MAX_UPLOAD_BYTES, "lots")])).unwrap_err();
        assert!(err.to_string().contains(ENV_MAX_UPLOAD_BYTES));

        let err = ServerConfig::from_lookup(lookup(&[(ENV_LEDGER_NETWORK, "mainnet")])).unwrap_err();
        assert!(err.to_string().contains(ENV_LEDGER_NETWORK));

        let err = ServerConfig::from_lookup(lookup(&[(ENV_LISTEN_ADDR, "nowhere")])).unwrap_err();
        assert!(err.to_string().contains(ENV_LISTEN_ADDR));
    }
}
