use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;

use league_console::{
    config::AppConfig, logging::init_tracing, middleware::catch_panic_layer, routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("console failed: {err:?}");
        eprintln!("console failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env()?;
    init_tracing(&cfg.logging);

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .with_context(|| format!("invalid host/port {}:{}", cfg.general.host, cfg.general.port))?;
    tracing::info!(api = %cfg.api.base_url, policy = ?cfg.console.submit_policy, "using REST layer");

    let state = AppState::new(cfg);
    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
