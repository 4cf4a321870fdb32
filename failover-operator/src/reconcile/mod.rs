mod converge;
mod targets;

pub use converge::{PatchOutcome, converge_scalable, converge_suspendable};
pub use targets::{scalable_target, suspend_target};

use std::sync::Arc;
use std::time::Duration;

use kube::Client;
use tracing::{info, instrument, warn};

use crate::config::OperatorConfig;
use crate::identity::IdentityClient;
use crate::inventory;
use crate::state::{FailoverState, decide};

/// Everything a cycle needs, constructed once at startup and immutable
/// thereafter.
pub struct ReconcilerContext {
    pub client: Client,
    pub identity: IdentityClient,
    pub cfg: OperatorConfig,
}

/// Outcome counters for one cycle. Created at cycle start, discarded at cycle
/// end; nothing carries over between cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub state: FailoverState,
    pub inventory_failed: bool,
    pub patched: usize,
    pub noop: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl CycleReport {
    fn new(state: FailoverState) -> Self {
        Self {
            state,
            inventory_failed: false,
            patched: 0,
            noop: 0,
            skipped: 0,
            failed: 0,
        }
    }

    fn record(&mut self, outcome: PatchOutcome) {
        match outcome {
            PatchOutcome::Patched => self.patched += 1,
            PatchOutcome::NoopAlreadyConverged => self.noop += 1,
            PatchOutcome::Skipped => self.skipped += 1,
            PatchOutcome::PatchFailed => self.failed += 1,
        }
    }
}

/// One reconciliation cycle: observe both identities, decide the state, list
/// the managed workloads, converge each one. The identity fetches run
/// concurrently, as do the two per-kind lists; convergence itself is strictly
/// sequential, deployments before cronjobs.
#[instrument(skip_all)]
pub async fn run_cycle(ctx: &ReconcilerContext) -> CycleReport {
    let (internal, external) = tokio::join!(
        ctx.identity.fetch(&ctx.cfg.int_url),
        ctx.identity.fetch(&ctx.cfg.ext_url),
    );
    if let Err(e) = &internal {
        warn!(error = %e, "internal identity fetch failed");
    }
    if let Err(e) = &external {
        warn!(error = %e, "external identity fetch failed");
    }

    let state = decide(&internal, &external);
    let mut report = CycleReport::new(state);
    if state == FailoverState::Unknown {
        warn!("no failover decision this cycle; skipping convergence");
        return report;
    }

    let inventory = tokio::try_join!(
        inventory::list_scalable(&ctx.client),
        inventory::list_suspendable(&ctx.client),
    );
    let (deployments, cronjobs) = match inventory {
        Ok(lists) => lists,
        Err(e) => {
            warn!(error = %e, "inventory listing failed; aborting convergence for this cycle");
            report.inventory_failed = true;
            return report;
        }
    };

    for workload in &deployments {
        report.record(converge_scalable(&ctx.client, workload, state).await);
    }
    for workload in &cronjobs {
        report.record(converge_suspendable(&ctx.client, workload, state).await);
    }

    info!(
        %state,
        deployments = deployments.len(),
        cronjobs = cronjobs.len(),
        patched = report.patched,
        noop = report.noop,
        skipped = report.skipped,
        failed = report.failed,
        "cycle complete"
    );
    report
}

/// Run cycles until process termination. A cycle never fails the loop; the
/// next one is always scheduled after the poll period.
pub async fn run_reconciler(
    ctx: Arc<ReconcilerContext>,
) -> anyhow::Result<()> {
    let period = Duration::from_secs(ctx.cfg.poll_period_secs);
    info!(poll_period_secs = ctx.cfg.poll_period_secs, "managing workloads");
    loop {
        run_cycle(&ctx).await;
        tokio::time::sleep(period).await;
    }
}
