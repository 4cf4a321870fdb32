use std::sync::Arc;
use std::time::Duration;

use envconfig::Envconfig;
use failover_operator::{
    bootstrap, config::OperatorConfig, error::FailoverError,
    identity::IdentityClient, init_tracing, reconcile::ReconcilerContext,
    runtime,
};
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing("info");

    // Ensure rustls uses the aws-lc-rs provider explicitly.
    // This avoids runtime errors when no default provider is set.
    if let Err(e) = rustls::crypto::CryptoProvider::install_default(
        rustls::crypto::aws_lc_rs::default_provider(),
    ) {
        // It's fine if a compatible provider was already installed.
        tracing::debug!(
            ?e,
            "CryptoProvider already installed or incompatible; proceeding"
        );
    }

    let cfg = OperatorConfig::init_from_env()
        .map_err(FailoverError::ConfigLoad)?;
    info!(?cfg, "starting failover operator");

    let trust = bootstrap::load_trust_material(&cfg)?;
    let client = bootstrap::build_client(&cfg, trust)?;
    let identity =
        IdentityClient::new(Duration::from_secs(cfg.request_timeout_secs))?;

    let ctx = Arc::new(ReconcilerContext {
        client,
        identity,
        cfg,
    });
    runtime::run_all(ctx).await
}
