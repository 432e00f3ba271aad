//! Freeze, migrate, thaw orchestration.
//!
//! Bracket invariant: once the group is frozen, exactly one thaw is
//! attempted before the run returns, whatever happens in between. The
//! guard in [`crate::cgroup::freezer`] enforces this structurally, so
//! every early return between freeze and thaw still resumes the group.

use std::path::PathBuf;

use numashift_common::constants::FREEZER_ROOT;
use numashift_common::error::Result;
use numashift_common::types::{
    ContainerId, FailurePolicy, MigrationReport, MigrationStatus, NodeSet, PidOutcome,
};

use crate::cgroup::FreezerGroup;
use crate::numa;

/// Parameters of a single migration run.
#[derive(Debug)]
pub struct MigrationRequest {
    /// Container whose freezer group is searched for.
    pub container_id: ContainerId,
    /// Nodes the pages currently reside on.
    pub from: NodeSet,
    /// Nodes the pages are moved to.
    pub to: NodeSet,
    /// Mount point of the freezer hierarchy.
    pub cgroup_root: PathBuf,
    /// Behavior when one process fails to migrate.
    pub policy: FailurePolicy,
}

impl MigrationRequest {
    /// Creates a request against the default freezer mount point with
    /// the default fail-fast policy.
    #[must_use]
    pub fn new(container_id: ContainerId, from: NodeSet, to: NodeSet) -> Self {
        Self {
            container_id,
            from,
            to,
            cgroup_root: PathBuf::from(FREEZER_ROOT),
            policy: FailurePolicy::default(),
        }
    }
}

/// Runs the full freeze, migrate, thaw sequence for a container.
///
/// # Errors
///
/// Returns an error if the group cannot be located, the freeze write is
/// rejected, the process list cannot be read, or the thaw write fails.
/// Per-process migration failures are recorded in the report and do not
/// fail the run.
pub fn run(request: &MigrationRequest) -> Result<MigrationReport> {
    run_with(request, numa::migrate_pages)
}

/// Runs the sequence with an injected page-migration primitive.
///
/// This is the seam the tests use to exercise ordering and policy
/// without touching the kernel; production callers go through [`run`].
///
/// # Errors
///
/// Same contract as [`run`].
pub fn run_with<F>(request: &MigrationRequest, mut migrate: F) -> Result<MigrationReport>
where
    F: FnMut(u32, &NodeSet, &NodeSet) -> Result<u64>,
{
    if !nix::unistd::geteuid().is_root() {
        tracing::warn!("not running as root; freezer control writes will likely be denied");
    }

    let group = FreezerGroup::locate(&request.cgroup_root, &request.container_id)?;
    let mut report = MigrationReport::new(
        &request.container_id,
        group.path(),
        &request.from,
        &request.to,
    );

    let guard = group.freeze()?;

    // A pid-list failure after a successful freeze still thaws: the
    // armed guard writes THAWED as the error propagates.
    let pids = group.member_pids()?;
    tracing::debug!(count = pids.len(), "member processes enumerated");

    report.processes = migrate_members(
        &pids,
        &request.from,
        &request.to,
        request.policy,
        &mut migrate,
    );

    guard.thaw()?;
    Ok(report)
}

/// Applies the migration primitive to each pid in file order.
fn migrate_members<F>(
    pids: &[u32],
    from: &NodeSet,
    to: &NodeSet,
    policy: FailurePolicy,
    migrate: &mut F,
) -> Vec<PidOutcome>
where
    F: FnMut(u32, &NodeSet, &NodeSet) -> Result<u64>,
{
    let mut outcomes = Vec::with_capacity(pids.len());
    let mut halted = false;

    for &pid in pids {
        if halted {
            outcomes.push(PidOutcome {
                pid,
                status: MigrationStatus::Skipped,
            });
            continue;
        }

        tracing::info!(pid, %from, %to, "migrating pages");
        match migrate(pid, from, to) {
            Ok(unmoved) => {
                if unmoved > 0 {
                    tracing::warn!(pid, unmoved, "some pages could not be moved");
                }
                outcomes.push(PidOutcome {
                    pid,
                    status: MigrationStatus::Migrated {
                        unmoved_pages: unmoved,
                    },
                });
            }
            Err(e) => {
                tracing::error!(pid, error = %e, "page migration failed");
                outcomes.push(PidOutcome {
                    pid,
                    status: MigrationStatus::Failed {
                        error: e.to_string(),
                    },
                });
                if policy == FailurePolicy::FailFast {
                    halted = true;
                }
            }
        }
    }
    outcomes
}
