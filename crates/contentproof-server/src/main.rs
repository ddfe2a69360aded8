//! ContentProof API server binary.
//!
//! Serves `/health` and the `/api/v1` routes. Uses PostgreSQL when
//! `DATABASE_URL` is set and an in-memory store otherwise.

use std::sync::Arc;

use anyhow::Context;
use contentproof_server::config::ServerConfig;
use contentproof_server::ledger::{LedgerAnchor, LocalLedger};
use contentproof_server::store::{MemoryProofStore, PgProofStore, ProofStore};
use contentproof_server::{create_router, db, AppState};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("contentproof_server=info,tower_http=info")),
        )
        .init();

    if let Err(e) = run().await {
        tracing::error!("fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = ServerConfig::from_env()?;

    let store: Arc<dyn ProofStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url)
                .await
                .context("failed to connect to PostgreSQL")?;
            db::run_migrations(&pool)
                .await
                .context("failed to run migrations")?;
            tracing::info!("using PostgreSQL proof store");
            Arc::new(PgProofStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; proofs are kept in memory only");
            Arc::new(MemoryProofStore::new())
        }
    };

    let ledger: Arc<dyn LedgerAnchor> = Arc::new(LocalLedger::new(config.ledger.clone()));
    tracing::info!(
        canister = %config.ledger.canister_id,
        network = %config.ledger.network,
        host = %config.ledger.host,
        "ledger configured"
    );

    let app = create_router(AppState::new(store, ledger, config.max_upload_bytes));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!("ContentProof server listening on http://{}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

/// Waits for Ctrl-C, used for graceful shutdown.
async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
