use std::net::SocketAddr;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Identity generated at startup, stable for this process lifetime.
#[derive(Clone)]
pub struct IdentityState {
    pub id: String,
}

#[derive(Serialize)]
struct IdResponse {
    id: String,
}

async fn handle_id(State(state): State<IdentityState>) -> Json<IdResponse> {
    Json(IdResponse {
        id: state.id.clone(),
    })
}

pub fn build_router(state: IdentityState) -> Router {
    Router::new()
        .route("/id", get(handle_id))
        .route("/readyz", get(|| async { "OK" }))
        .route("/livez", get(|| async { "OK" }))
        .with_state(state)
}

pub async fn run_http_server(
    addr: SocketAddr,
    state: IdentityState,
) -> anyhow::Result<()> {
    let app = build_router(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    info!("identity service listening on {}", addr);
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
