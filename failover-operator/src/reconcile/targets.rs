use tracing::warn;

use crate::inventory::{
    ANNOTATION_ACTIVE_MIN_REPLICAS, ANNOTATION_ACTIVE_SUSPEND,
    ANNOTATION_INACTIVE_MAX_REPLICAS, ANNOTATION_INACTIVE_SUSPEND,
    ScalableWorkload, SuspendableWorkload,
};
use crate::state::FailoverState;

/// Replica target for a deployment in the decided state, or `None` to skip
/// the workload this cycle. Annotation strings are parsed here and nowhere
/// deeper; a missing, unparseable, or negative value skips only this
/// workload.
pub fn scalable_target(
    workload: &ScalableWorkload,
    state: FailoverState,
) -> Option<i32> {
    let (annotation, value) = match state {
        FailoverState::Active => (
            ANNOTATION_ACTIVE_MIN_REPLICAS,
            workload.active_min_replicas.as_deref(),
        ),
        FailoverState::Inactive => (
            ANNOTATION_INACTIVE_MAX_REPLICAS,
            workload.inactive_max_replicas.as_deref(),
        ),
        FailoverState::Unknown => return None,
    };

    let Some(raw) = value else {
        warn!(
            namespace = %workload.namespace,
            name = %workload.name,
            annotation,
            "deployment missing replica annotation; skipping"
        );
        return None;
    };

    match raw.parse::<i32>() {
        Ok(n) if n >= 0 => Some(n),
        _ => {
            warn!(
                namespace = %workload.namespace,
                name = %workload.name,
                annotation,
                value = raw,
                "failed to read replica annotation; skipping"
            );
            None
        }
    }
}

/// Suspend target for a cronjob in the decided state. Only the literal
/// strings "true" and "false" are accepted.
pub fn suspend_target(
    workload: &SuspendableWorkload,
    state: FailoverState,
) -> Option<bool> {
    let (annotation, value) = match state {
        FailoverState::Active => {
            (ANNOTATION_ACTIVE_SUSPEND, workload.active_suspend.as_deref())
        }
        FailoverState::Inactive => (
            ANNOTATION_INACTIVE_SUSPEND,
            workload.inactive_suspend.as_deref(),
        ),
        FailoverState::Unknown => return None,
    };

    match value {
        Some("true") => Some(true),
        Some("false") => Some(false),
        other => {
            warn!(
                namespace = %workload.namespace,
                name = %workload.name,
                annotation,
                value = other.unwrap_or("<missing>"),
                "failed to read suspend annotation; skipping"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalable(
        active: Option<&str>,
        inactive: Option<&str>,
    ) -> ScalableWorkload {
        ScalableWorkload {
            name: "web".into(),
            namespace: "prod".into(),
            replicas: 1,
            active_min_replicas: active.map(str::to_string),
            inactive_max_replicas: inactive.map(str::to_string),
        }
    }

    fn suspendable(
        active: Option<&str>,
        inactive: Option<&str>,
    ) -> SuspendableWorkload {
        SuspendableWorkload {
            name: "report".into(),
            namespace: "ops".into(),
            suspend: false,
            active_suspend: active.map(str::to_string),
            inactive_suspend: inactive.map(str::to_string),
        }
    }

    #[test]
    fn active_uses_min_replicas_annotation() {
        let w = scalable(Some("3"), Some("0"));
        assert_eq!(scalable_target(&w, FailoverState::Active), Some(3));
    }

    #[test]
    fn inactive_uses_max_replicas_annotation() {
        let w = scalable(Some("3"), Some("0"));
        assert_eq!(scalable_target(&w, FailoverState::Inactive), Some(0));
    }

    #[test]
    fn unknown_state_never_yields_a_target() {
        let w = scalable(Some("3"), Some("0"));
        assert_eq!(scalable_target(&w, FailoverState::Unknown), None);
        let c = suspendable(Some("false"), Some("true"));
        assert_eq!(suspend_target(&c, FailoverState::Unknown), None);
    }

    #[test]
    fn unparseable_replicas_skip() {
        let w = scalable(Some("abc"), Some("0"));
        assert_eq!(scalable_target(&w, FailoverState::Active), None);
    }

    #[test]
    fn negative_replicas_skip() {
        let w = scalable(Some("-1"), None);
        assert_eq!(scalable_target(&w, FailoverState::Active), None);
    }

    #[test]
    fn missing_annotation_skips() {
        let w = scalable(None, Some("0"));
        assert_eq!(scalable_target(&w, FailoverState::Active), None);
    }

    #[test]
    fn suspend_accepts_only_the_literals() {
        let c = suspendable(Some("false"), Some("true"));
        assert_eq!(suspend_target(&c, FailoverState::Active), Some(false));
        assert_eq!(suspend_target(&c, FailoverState::Inactive), Some(true));

        for bad in ["True", "FALSE", "1", "yes", ""] {
            let c = suspendable(Some(bad), None);
            assert_eq!(suspend_target(&c, FailoverState::Active), None);
        }
    }

    #[test]
    fn missing_suspend_annotation_skips() {
        let c = suspendable(None, None);
        assert_eq!(suspend_target(&c, FailoverState::Inactive), None);
    }
}
