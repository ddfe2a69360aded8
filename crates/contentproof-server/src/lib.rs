//! ContentProof Server - API for content authenticity
//!
//! This crate provides the REST API that fingerprints uploaded content,
//! records proofs of ownership and anchors them on a ledger.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod ledger;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
