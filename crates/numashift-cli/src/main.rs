//! # nshift — Numashift CLI
//!
//! One-shot live migration of a running container's memory between NUMA
//! nodes: freeze the container's cgroup, move its pages, thaw the group.

mod commands;
mod output;

use clap::Parser;

use crate::commands::Cli;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    commands::execute(cli)
}
