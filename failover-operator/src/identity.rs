use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::FailoverError;

/// Opaque token identifying a running cluster instance, generated once by the
/// identity service at its own startup. A body without an `id` field is a
/// fetch failure, never an empty identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClusterIdentity {
    pub id: String,
}

/// HTTP client for the identity endpoints. One GET per observation; retries
/// happen implicitly via the next reconciliation cycle.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
}

impl IdentityClient {
    pub fn new(timeout: Duration) -> Result<Self, FailoverError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FailoverError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch the identity served at `url`. Succeeds only on HTTP 200 plus a
    /// well-formed `{"id": ...}` body.
    pub async fn fetch(
        &self,
        url: &str,
    ) -> Result<ClusterIdentity, FailoverError> {
        let resp = self.http.get(url).send().await.map_err(|e| {
            FailoverError::IdentityFetch {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(FailoverError::IdentityFetch {
                url: url.to_string(),
                reason: format!("unexpected status {status}"),
            });
        }

        let identity =
            resp.json::<ClusterIdentity>().await.map_err(|e| {
                FailoverError::IdentityFetch {
                    url: url.to_string(),
                    reason: format!("malformed body: {e}"),
                }
            })?;
        debug!(%url, id = %identity.id, "fetched cluster identity");
        Ok(identity)
    }
}
