use std::net::SocketAddr;

use axum::{Router, routing::get};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Liveness surface for the operator itself. The convergence loop has no
/// request path; these routes only prove the process is up.
pub fn health_router() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/healthz", get(|| async { "ok" }))
}

pub async fn run_http_server(addr: SocketAddr) -> anyhow::Result<()> {
    let app = health_router()
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    info!("operator HTTP listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
