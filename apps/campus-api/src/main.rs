//! Campus lifecycle service.
//!
//! Wires configuration, logging, the database pool, migrations, and the
//! lifecycle router into a running HTTP server. Identity resolution is the
//! upstream gateway's job; this service expects each request to arrive with
//! a resolved identity context.

mod config;
mod logging;

use campus_api_lifecycle::{lifecycle_router, LifecycleState};
use campus_db::DbPool;
use config::Config;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.log_filter);

    let pool = match DbPool::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "failed to connect to database");
            std::process::exit(1);
        }
    };

    if let Err(e) = campus_db::run_migrations(&pool).await {
        tracing::error!(error = %e, "failed to run migrations");
        std::process::exit(1);
    }

    let state = LifecycleState::with_store_timeout(pool.into_inner(), config.store_timeout);
    let app = lifecycle_router(state);

    let listener = match tokio::net::TcpListener::bind(&config.listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, addr = %config.listen_addr, "failed to bind");
            std::process::exit(1);
        }
    };

    tracing::info!(addr = %config.listen_addr, "campus lifecycle service listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server exited with error");
        std::process::exit(1);
    }
}
