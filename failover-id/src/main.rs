use envconfig::Envconfig;
use failover_id::{
    config::IdConfig,
    generate_cluster_id, init_tracing,
    web::{IdentityState, run_http_server},
};
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    let cfg = IdConfig::init_from_env()?;
    let id = generate_cluster_id(cfg.id_length);
    info!(%id, "generated cluster identity");

    let addr = ([0, 0, 0, 0], cfg.http_port).into();
    run_http_server(addr, IdentityState { id }).await
}
