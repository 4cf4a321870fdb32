use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::CronJob;
use kube::Client;
use kube::api::{Api, ListParams};

use crate::error::FailoverError;

/// Label that opts a resource into failover management.
pub const MANAGED_LABEL: &str = "failovermanager=enabled";

pub const ANNOTATION_ACTIVE_MIN_REPLICAS: &str =
    "failovermanager/active-min-replicas";
pub const ANNOTATION_INACTIVE_MAX_REPLICAS: &str =
    "failovermanager/inactive-max-replicas";
pub const ANNOTATION_ACTIVE_SUSPEND: &str = "failovermanager/active-suspend";
pub const ANNOTATION_INACTIVE_SUSPEND: &str =
    "failovermanager/inactive-suspend";

/// Deployment snapshot reduced to what convergence needs. Annotation values
/// stay raw strings until the target resolver parses them at the boundary.
#[derive(Debug, Clone)]
pub struct ScalableWorkload {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub active_min_replicas: Option<String>,
    pub inactive_max_replicas: Option<String>,
}

/// CronJob snapshot reduced to what convergence needs.
#[derive(Debug, Clone)]
pub struct SuspendableWorkload {
    pub name: String,
    pub namespace: String,
    pub suspend: bool,
    pub active_suspend: Option<String>,
    pub inactive_suspend: Option<String>,
}

/// List all managed deployments cluster-wide, fully materialized so each
/// cycle converges against a stable snapshot.
pub async fn list_scalable(
    client: &Client,
) -> Result<Vec<ScalableWorkload>, FailoverError> {
    let api: Api<Deployment> = Api::all(client.clone());
    let list = api
        .list(&ListParams::default().labels(MANAGED_LABEL))
        .await
        .map_err(|source| FailoverError::InventoryFetch {
            kind: "deployments",
            source,
        })?;
    Ok(list.items.into_iter().filter_map(scalable_from).collect())
}

/// List all managed cronjobs cluster-wide.
pub async fn list_suspendable(
    client: &Client,
) -> Result<Vec<SuspendableWorkload>, FailoverError> {
    let api: Api<CronJob> = Api::all(client.clone());
    let list = api
        .list(&ListParams::default().labels(MANAGED_LABEL))
        .await
        .map_err(|source| FailoverError::InventoryFetch {
            kind: "cronjobs",
            source,
        })?;
    Ok(list.items.into_iter().filter_map(suspendable_from).collect())
}

fn scalable_from(dep: Deployment) -> Option<ScalableWorkload> {
    let name = dep.metadata.name?;
    let namespace = dep
        .metadata
        .namespace
        .unwrap_or_else(|| "default".to_string());
    let replicas = dep.spec.as_ref().and_then(|s| s.replicas).unwrap_or(0);
    let annotations = dep.metadata.annotations.unwrap_or_default();
    Some(ScalableWorkload {
        name,
        namespace,
        replicas,
        active_min_replicas: annotations
            .get(ANNOTATION_ACTIVE_MIN_REPLICAS)
            .cloned(),
        inactive_max_replicas: annotations
            .get(ANNOTATION_INACTIVE_MAX_REPLICAS)
            .cloned(),
    })
}

fn suspendable_from(cron: CronJob) -> Option<SuspendableWorkload> {
    let name = cron.metadata.name?;
    let namespace = cron
        .metadata
        .namespace
        .unwrap_or_else(|| "default".to_string());
    let suspend = cron.spec.as_ref().and_then(|s| s.suspend).unwrap_or(false);
    let annotations = cron.metadata.annotations.unwrap_or_default();
    Some(SuspendableWorkload {
        name,
        namespace,
        suspend,
        active_suspend: annotations.get(ANNOTATION_ACTIVE_SUSPEND).cloned(),
        inactive_suspend: annotations.get(ANNOTATION_INACTIVE_SUSPEND).cloned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deployment_maps_to_scalable_workload() {
        let dep: Deployment = serde_json::from_value(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {
                "name": "web",
                "namespace": "prod",
                "annotations": {
                    "failovermanager/active-min-replicas": "3",
                    "failovermanager/inactive-max-replicas": "0"
                }
            },
            "spec": { "replicas": 1, "selector": {}, "template": {} }
        }))
        .unwrap();

        let w = scalable_from(dep).unwrap();
        assert_eq!(w.name, "web");
        assert_eq!(w.namespace, "prod");
        assert_eq!(w.replicas, 1);
        assert_eq!(w.active_min_replicas.as_deref(), Some("3"));
        assert_eq!(w.inactive_max_replicas.as_deref(), Some("0"));
    }

    #[test]
    fn missing_annotations_and_replicas_default() {
        let dep: Deployment = serde_json::from_value(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": { "name": "bare", "namespace": "prod" },
            "spec": { "selector": {}, "template": {} }
        }))
        .unwrap();

        let w = scalable_from(dep).unwrap();
        assert_eq!(w.replicas, 0);
        assert_eq!(w.active_min_replicas, None);
        assert_eq!(w.inactive_max_replicas, None);
    }

    #[test]
    fn cronjob_maps_to_suspendable_workload() {
        let cron: CronJob = serde_json::from_value(json!({
            "apiVersion": "batch/v1",
            "kind": "CronJob",
            "metadata": {
                "name": "report",
                "namespace": "ops",
                "annotations": {
                    "failovermanager/active-suspend": "false",
                    "failovermanager/inactive-suspend": "true"
                }
            },
            "spec": {
                "schedule": "*/5 * * * *",
                "suspend": false,
                "jobTemplate": {}
            }
        }))
        .unwrap();

        let w = suspendable_from(cron).unwrap();
        assert_eq!(w.name, "report");
        assert_eq!(w.namespace, "ops");
        assert!(!w.suspend);
        assert_eq!(w.active_suspend.as_deref(), Some("false"));
        assert_eq!(w.inactive_suspend.as_deref(), Some("true"));
    }

    #[test]
    fn nameless_items_are_dropped() {
        let dep: Deployment = serde_json::from_value(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {},
            "spec": { "selector": {}, "template": {} }
        }))
        .unwrap();
        assert!(scalable_from(dep).is_none());
    }
}
