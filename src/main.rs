use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use speccheck::config::Config;
use speccheck::routes::{self, AppState};
use speccheck::service::SpecCheckService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load();

    // Fails fast when the generator credential is absent rather than
    // discovering it mid-request.
    let service = SpecCheckService::new(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialize service: {e}"))?;

    let bind: SocketAddr = config
        .server
        .bind
        .parse()
        .expect("Invalid bind address (expected host:port)");

    let app = routes::router(Arc::new(AppState { service }));

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, model = %config.generator.model, "Starting speccheck server");

    axum::serve(listener, app).await?;
    Ok(())
}
