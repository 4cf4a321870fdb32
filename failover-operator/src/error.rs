use thiserror::Error;

/// Failure taxonomy for the operator. Startup variants are fatal; cycle
/// variants abort at most the current cycle; patch failures are isolated to
/// one workload.
#[derive(Error, Debug)]
pub enum FailoverError {
    #[error("failed to load configuration: {0}")]
    ConfigLoad(#[from] envconfig::Error),

    #[error("failed to load trust material: {0}")]
    TrustStoreLoad(String),

    #[error("invalid api server url {url}: {reason}")]
    ApiServerUrl { url: String, reason: String },

    #[error("failed to build cluster client: {0}")]
    ClientBuild(#[source] kube::Error),

    #[error("failed to build identity http client: {0}")]
    HttpClientBuild(String),

    #[error("identity fetch from {url} failed: {reason}")]
    IdentityFetch { url: String, reason: String },

    #[error("listing {kind} failed: {source}")]
    InventoryFetch {
        kind: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("patching {kind} {namespace}/{name} failed: {source}")]
    PatchFailed {
        kind: &'static str,
        namespace: String,
        name: String,
        #[source]
        source: kube::Error,
    },
}
