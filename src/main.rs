mod api;
mod clock;
mod config;
mod error;
mod generator;
mod state;
mod types;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::api::routes::{router, ApiState};
use crate::clock::{civil_time, Clock, SystemClock};
use crate::config::Config;
use crate::error::Result;
use crate::generator::random::rng_from_seed;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    match cfg.rng_seed {
        Some(seed) => info!("Generator seeded with RNG_SEED={seed}"),
        None => info!("Generator seeded from entropy"),
    }
    let rng = Box::new(rng_from_seed(cfg.rng_seed));

    let api_state = ApiState::new(Arc::clone(&clock), rng, cfg.history_limit_max)?;
    info!(
        "Catalog ready: {} games | history limit cap {} | civil time {}",
        api_state.catalog.len(),
        cfg.history_limit_max,
        civil_time(clock.now()).format("%H:%M"),
    );

    let app = router(api_state);
    let bind_addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}
