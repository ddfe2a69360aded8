//! Shared application state.

use std::sync::Arc;

use crate::ledger::LedgerAnchor;
use crate::store::ProofStore;

/// State handed to every request handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Persistence for users and content records.
    pub store: Arc<dyn ProofStore>,
    /// Ledger the proofs are anchored on.
    pub ledger: Arc<dyn LedgerAnchor>,
    /// Largest accepted upload, in decoded content bytes.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ProofStore>,
        ledger: Arc<dyn LedgerAnchor>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            store,
            ledger,
            max_upload_bytes,
        }
    }
}
