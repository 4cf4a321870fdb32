use crate::error::FailoverError;
use crate::identity::ClusterIdentity;

/// Failover state of the local cluster replica, decided fresh each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailoverState {
    Active,
    Inactive,
    Unknown,
}

impl std::fmt::Display for FailoverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FailoverState::Active => "active",
            FailoverState::Inactive => "inactive",
            FailoverState::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Turn the two identity observations into a failover state.
///
/// The replica whose cluster-local identity matches the identity reachable
/// through DNS is the one receiving external traffic. Any failed fetch yields
/// `Unknown`, on which convergence never acts, so a transient blip cannot
/// flap replicas toward a wrong state.
pub fn decide(
    internal: &Result<ClusterIdentity, FailoverError>,
    external: &Result<ClusterIdentity, FailoverError>,
) -> FailoverState {
    match (internal, external) {
        (Ok(int), Ok(ext)) if int.id == ext.id => FailoverState::Active,
        (Ok(_), Ok(_)) => FailoverState::Inactive,
        _ => FailoverState::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Result<ClusterIdentity, FailoverError> {
        Ok(ClusterIdentity { id: s.to_string() })
    }

    fn failed() -> Result<ClusterIdentity, FailoverError> {
        Err(FailoverError::IdentityFetch {
            url: "http://id.example/id".into(),
            reason: "unexpected status 503".into(),
        })
    }

    #[test]
    fn both_succeed_equal_ids_is_active() {
        assert_eq!(decide(&id("abc"), &id("abc")), FailoverState::Active);
    }

    #[test]
    fn both_succeed_unequal_ids_is_inactive() {
        assert_eq!(decide(&id("abc"), &id("xyz")), FailoverState::Inactive);
    }

    #[test]
    fn internal_failure_is_unknown() {
        assert_eq!(decide(&failed(), &id("abc")), FailoverState::Unknown);
    }

    #[test]
    fn external_failure_is_unknown() {
        assert_eq!(decide(&id("abc"), &failed()), FailoverState::Unknown);
    }

    #[test]
    fn both_failures_is_unknown() {
        assert_eq!(decide(&failed(), &failed()), FailoverState::Unknown);
    }

    #[test]
    fn empty_ids_still_compare_by_equality() {
        // An empty string is a legitimate (if odd) identity; only decode
        // failures map to Unknown.
        assert_eq!(decide(&id(""), &id("")), FailoverState::Active);
    }
}
