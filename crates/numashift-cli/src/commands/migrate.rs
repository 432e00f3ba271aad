//! `nshift migrate` — Freeze a container, move its pages, thaw it.

use std::path::Path;

use clap::Args;
use numashift_common::types::{ContainerId, FailurePolicy, NodeSet};
use numashift_core::{migrate, numa};

use crate::output;

/// Arguments for the `migrate` command.
#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Container identifier (substring of its cgroup directory name).
    pub container_id: String,

    /// Source NUMA nodes, as a list expression (e.g. "0" or "0,2-3").
    pub from_nodes: String,

    /// Destination NUMA nodes, same syntax as the source set.
    pub to_nodes: String,

    /// Continue with the remaining processes after a migration failure
    /// instead of stopping at the first one.
    #[arg(long)]
    pub keep_going: bool,

    /// Print the migration report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Executes the `migrate` command.
///
/// Both node sets and the container identifier are validated, and NUMA
/// support probed, before any control file is touched.
///
/// # Errors
///
/// Returns an error on invalid arguments, missing NUMA support, or any
/// failure of the freeze/thaw bracket. Per-process migration failures
/// are reported but do not fail the command.
pub fn execute(args: MigrateArgs, cgroup_root: &Path) -> anyhow::Result<()> {
    let container_id = ContainerId::new(args.container_id)?;
    let from: NodeSet = args.from_nodes.parse()?;
    let to: NodeSet = args.to_nodes.parse()?;

    if !numa::is_available() {
        anyhow::bail!("this system does not support NUMA memory policies");
    }
    tracing::info!(container = %container_id, %from, %to, "starting migration");

    let mut request = migrate::MigrationRequest::new(container_id, from, to);
    request.cgroup_root = cgroup_root.to_path_buf();
    if args.keep_going {
        request.policy = FailurePolicy::KeepGoing;
    }

    let report = migrate::run(&request)?;

    if args.json {
        println!("{}", output::format_json(&report)?);
    } else {
        print!("{}", output::format_table(&report));
    }
    Ok(())
}
