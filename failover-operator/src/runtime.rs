use std::net::SocketAddr;
use std::sync::Arc;

use tokio::{task::JoinHandle, try_join};

use crate::{
    config::OperatorConfig,
    reconcile::{ReconcilerContext, run_reconciler},
    web::run_http_server,
};

/// Compute the HTTP bind address based on config.
pub fn compute_http_addr(cfg: &OperatorConfig) -> SocketAddr {
    ([0, 0, 0, 0], cfg.http_port).into()
}

/// Spawn the reconciliation loop.
pub fn spawn_reconciler(
    ctx: Arc<ReconcilerContext>,
) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move { run_reconciler(ctx).await })
}

/// Spawn the health HTTP server on the provided address.
pub fn spawn_http(addr: SocketAddr) -> JoinHandle<anyhow::Result<()>> {
    tokio::spawn(async move { run_http_server(addr).await })
}

/// Start both the reconciler and the health server and wait until either
/// finishes.
pub async fn run_all(ctx: Arc<ReconcilerContext>) -> anyhow::Result<()> {
    let http_addr = compute_http_addr(&ctx.cfg);

    let reconciler = spawn_reconciler(ctx);
    let http = spawn_http(http_addr);

    let (r_res, h_res) = try_join!(reconciler, http)?;
    r_res?;
    h_res?;
    Ok(())
}
