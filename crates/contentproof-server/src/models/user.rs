//! User model for wallet-registered accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Wallet address, stored lowercase.
    pub wallet_address: String,
    /// `did:eth:<wallet address>`.
    pub did: String,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub wallet_address: String,
    pub did: String,
}

impl NewUser {
    /// Builds a user from a name and wallet address, deriving the DID.
    pub fn new(name: &str, wallet_address: &str) -> Self {
        let wallet_address = wallet_address.trim().to_lowercase();
        Self {
            name: name.trim().to_string(),
            did: contentproof_crypto::owner_did(&wallet_address),
            wallet_address,
        }
    }
}

impl User {
    /// True if `address` is this user's wallet, ignoring case.
    pub fn owns_wallet(&self, address: &str) -> bool {
        self.wallet_address == address.trim().to_lowercase()
    }
}
