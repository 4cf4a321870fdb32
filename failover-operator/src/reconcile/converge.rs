use json_patch::{Patch as JsonPatch, PatchOperation, ReplaceOperation};
use jsonptr::PointerBuf;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::batch::v1::CronJob;
use kube::Client;
use kube::api::{Api, Patch, PatchParams};
use serde_json::json;
use tracing::{info, warn};

use super::targets::{scalable_target, suspend_target};
use crate::error::FailoverError;
use crate::inventory::{ScalableWorkload, SuspendableWorkload};
use crate::state::FailoverState;

/// Result of converging one workload in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    NoopAlreadyConverged,
    Patched,
    Skipped,
    PatchFailed,
}

/// Replica value to patch, if any. Active enforces a floor: counts below the
/// minimum are raised, never lowered. Inactive enforces a ceiling: counts
/// above the maximum are lowered, never raised. Anything else is already
/// converged, including counts an autoscaler pushed past the active floor.
fn desired_replicas(
    state: FailoverState,
    current: i32,
    target: i32,
) -> Option<i32> {
    match state {
        FailoverState::Active if current < target => Some(target),
        FailoverState::Inactive if current > target => Some(target),
        _ => None,
    }
}

fn desired_suspend(current: bool, target: bool) -> Option<bool> {
    (current != target).then_some(target)
}

fn replace_patch(field: &str, value: serde_json::Value) -> JsonPatch {
    JsonPatch(vec![PatchOperation::Replace(ReplaceOperation {
        path: PointerBuf::from_tokens(["spec", field]),
        value,
    })])
}

/// Converge one deployment toward the state-derived replica target. Failures
/// never propagate past this workload.
pub async fn converge_scalable(
    client: &Client,
    workload: &ScalableWorkload,
    state: FailoverState,
) -> PatchOutcome {
    let Some(target) = scalable_target(workload, state) else {
        return PatchOutcome::Skipped;
    };
    let Some(replicas) = desired_replicas(state, workload.replicas, target)
    else {
        return PatchOutcome::NoopAlreadyConverged;
    };

    match patch_replicas(client, workload, replicas).await {
        Ok(()) => {
            info!(
                namespace = %workload.namespace,
                name = %workload.name,
                from = workload.replicas,
                to = replicas,
                %state,
                "patched deployment replicas"
            );
            PatchOutcome::Patched
        }
        Err(e) => {
            warn!(error = %e, "convergence patch failed");
            PatchOutcome::PatchFailed
        }
    }
}

/// Converge one cronjob toward the state-derived suspend flag. Suspension is
/// a plain toggle; it is patched on any mismatch.
pub async fn converge_suspendable(
    client: &Client,
    workload: &SuspendableWorkload,
    state: FailoverState,
) -> PatchOutcome {
    let Some(target) = suspend_target(workload, state) else {
        return PatchOutcome::Skipped;
    };
    let Some(suspend) = desired_suspend(workload.suspend, target) else {
        return PatchOutcome::NoopAlreadyConverged;
    };

    match patch_suspend(client, workload, suspend).await {
        Ok(()) => {
            info!(
                namespace = %workload.namespace,
                name = %workload.name,
                suspend,
                %state,
                "patched cronjob suspend flag"
            );
            PatchOutcome::Patched
        }
        Err(e) => {
            warn!(error = %e, "convergence patch failed");
            PatchOutcome::PatchFailed
        }
    }
}

async fn patch_replicas(
    client: &Client,
    workload: &ScalableWorkload,
    replicas: i32,
) -> Result<(), FailoverError> {
    let api: Api<Deployment> =
        Api::namespaced(client.clone(), &workload.namespace);
    let patch = replace_patch("replicas", json!(replicas));
    api.patch(
        &workload.name,
        &PatchParams::default(),
        &Patch::Json::<()>(patch),
    )
    .await
    .map(|_| ())
    .map_err(|source| FailoverError::PatchFailed {
        kind: "deployment",
        namespace: workload.namespace.clone(),
        name: workload.name.clone(),
        source,
    })
}

async fn patch_suspend(
    client: &Client,
    workload: &SuspendableWorkload,
    suspend: bool,
) -> Result<(), FailoverError> {
    let api: Api<CronJob> =
        Api::namespaced(client.clone(), &workload.namespace);
    let patch = replace_patch("suspend", json!(suspend));
    api.patch(
        &workload.name,
        &PatchParams::default(),
        &Patch::Json::<()>(patch),
    )
    .await
    .map(|_| ())
    .map_err(|source| FailoverError::PatchFailed {
        kind: "cronjob",
        namespace: workload.namespace.clone(),
        name: workload.name.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_raises_replicas_below_the_floor() {
        assert_eq!(desired_replicas(FailoverState::Active, 1, 3), Some(3));
    }

    #[test]
    fn active_never_lowers_replicas() {
        // Manually scaled above the floor: left untouched.
        assert_eq!(desired_replicas(FailoverState::Active, 5, 3), None);
        assert_eq!(desired_replicas(FailoverState::Active, 3, 3), None);
    }

    #[test]
    fn inactive_lowers_replicas_above_the_ceiling() {
        assert_eq!(desired_replicas(FailoverState::Inactive, 3, 0), Some(0));
    }

    #[test]
    fn inactive_never_raises_replicas() {
        // Manually scaled below the ceiling: left untouched.
        assert_eq!(desired_replicas(FailoverState::Inactive, 0, 2), None);
        assert_eq!(desired_replicas(FailoverState::Inactive, 2, 2), None);
    }

    #[test]
    fn replica_planning_is_idempotent() {
        for (state, current, target) in [
            (FailoverState::Active, 1, 3),
            (FailoverState::Inactive, 4, 0),
        ] {
            let patched = desired_replicas(state, current, target).unwrap();
            assert_eq!(desired_replicas(state, patched, target), None);
        }
    }

    #[test]
    fn suspend_toggles_both_ways() {
        assert_eq!(desired_suspend(false, true), Some(true));
        assert_eq!(desired_suspend(true, false), Some(false));
        assert_eq!(desired_suspend(true, true), None);
        assert_eq!(desired_suspend(false, false), None);
    }

    #[test]
    fn replace_patch_serializes_to_a_single_replace_op() {
        let patch = replace_patch("replicas", json!(3));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([{ "op": "replace", "path": "/spec/replicas", "value": 3 }])
        );

        let patch = replace_patch("suspend", json!(true));
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!([{ "op": "replace", "path": "/spec/suspend", "value": true }])
        );
    }
}
