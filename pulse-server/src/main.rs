use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use pulse_agent::HostSampler;
use pulse_server::{
    api::{self, AppState},
    config::ServerOptions,
    logger::init_logger,
};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let opts = ServerOptions::parse();
    init_logger();

    let app = api::routes(AppState::new(Arc::new(HostSampler::new())));

    let addr = opts.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    info!("Server running at http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving metrics")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for interrupts");
        std::future::pending::<()>().await;
    }
}
