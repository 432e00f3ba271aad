//! CLI command definitions and dispatch.

pub mod migrate;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Numashift: live NUMA-node migration for running containers.
#[derive(Parser, Debug)]
#[command(name = numashift_common::constants::BIN_NAME, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Mount point of the cgroup freezer hierarchy.
    #[arg(long, global = true, default_value = numashift_common::constants::FREEZER_ROOT)]
    pub cgroup_root: PathBuf,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Migrate a container's memory pages between NUMA node sets.
    Migrate(migrate::MigrateArgs),
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Migrate(args) => migrate::execute(args, &cli.cgroup_root),
    }
}
