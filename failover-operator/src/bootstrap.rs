use std::time::Duration;

use http::Uri;
use kube::{Client, Config};
use secrecy::SecretString;
use tracing::{info, warn};

use crate::config::OperatorConfig;
use crate::error::FailoverError;

/// Bearer token and CA roots read from disk once at startup.
pub struct TrustMaterial {
    pub token: Option<String>,
    /// DER-encoded root certificates; empty in debug mode.
    pub root_certs: Vec<Vec<u8>>,
}

/// Read the serviceaccount token and CA bundle.
///
/// A missing token degrades to anonymous cluster calls. A missing or
/// unparseable CA bundle is fatal unless debug mode is on, in which case the
/// bundle is not read at all and certificate validation is relaxed instead.
pub fn load_trust_material(
    cfg: &OperatorConfig,
) -> Result<TrustMaterial, FailoverError> {
    let token = match std::fs::read_to_string(&cfg.token_path) {
        Ok(raw) => {
            let token = raw.trim().to_string();
            if token.is_empty() { None } else { Some(token) }
        }
        Err(e) => {
            warn!(
                path = %cfg.token_path,
                error = %e,
                "failed to read token; cluster calls will be anonymous"
            );
            None
        }
    };
    if token.is_some() {
        info!(path = %cfg.token_path, "read bearer token");
    }

    let root_certs = if cfg.debug {
        Vec::new()
    } else {
        let bundle = std::fs::read(&cfg.ca_path).map_err(|e| {
            FailoverError::TrustStoreLoad(format!(
                "read {}: {e}",
                cfg.ca_path
            ))
        })?;
        let blocks = pem::parse_many(&bundle).map_err(|e| {
            FailoverError::TrustStoreLoad(format!(
                "parse {}: {e}",
                cfg.ca_path
            ))
        })?;
        let certs: Vec<Vec<u8>> =
            blocks.into_iter().map(pem::Pem::into_contents).collect();
        if certs.is_empty() {
            return Err(FailoverError::TrustStoreLoad(format!(
                "no certificates in {}",
                cfg.ca_path
            )));
        }
        info!(path = %cfg.ca_path, certs = certs.len(), "read CA bundle");
        certs
    };

    Ok(TrustMaterial { token, root_certs })
}

/// Build the cluster client from config and trust material. Timeouts apply to
/// every call the client makes.
pub fn build_client(
    cfg: &OperatorConfig,
    trust: TrustMaterial,
) -> Result<Client, FailoverError> {
    let uri: Uri = cfg.api_server.parse().map_err(
        |e: http::uri::InvalidUri| FailoverError::ApiServerUrl {
            url: cfg.api_server.clone(),
            reason: e.to_string(),
        },
    )?;

    let mut kube_cfg = Config::new(uri);
    kube_cfg.accept_invalid_certs = cfg.debug;
    if !trust.root_certs.is_empty() {
        kube_cfg.root_cert = Some(trust.root_certs);
    }
    if let Some(token) = trust.token {
        kube_cfg.auth_info.token = Some(SecretString::from(token));
    }
    let timeout = Duration::from_secs(cfg.request_timeout_secs);
    kube_cfg.connect_timeout = Some(timeout);
    kube_cfg.read_timeout = Some(timeout);

    Client::try_from(kube_cfg).map_err(FailoverError::ClientBuild)
}
