//! Domain primitive types used across the Numashift workspace.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NumashiftError, Result};

/// Opaque identifier of the container whose pages are migrated.
///
/// The value is matched as a substring against cgroup directory names;
/// the only validation applied is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a container ID from a string value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(NumashiftError::Config {
                message: "container id must not be empty".to_string(),
            });
        }
        Ok(Self(id))
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable, canonicalized set of NUMA node indices.
///
/// Parsed from a cpulist-style expression: comma-separated single nodes
/// and inclusive ranges, e.g. `0`, `0,2`, `1-3`, `0,2-4,7`. Duplicates
/// and overlapping ranges collapse; `Display` renders the canonical form
/// with consecutive runs folded back into ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSet(BTreeSet<u32>);

impl NodeSet {
    /// Returns the number of nodes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns whether `node` is a member of the set.
    #[must_use]
    pub fn contains(&self, node: u32) -> bool {
        self.0.contains(&node)
    }

    /// Returns the highest node index in the set, if any.
    #[must_use]
    pub fn highest(&self) -> Option<u32> {
        self.0.iter().next_back().copied()
    }

    /// Iterates the node indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

fn invalid_node_set(expr: &str, why: &str) -> NumashiftError {
    NumashiftError::Config {
        message: format!("node set <{expr}> is invalid: {why}"),
    }
}

fn parse_node(expr: &str, part: &str) -> Result<u32> {
    part.trim()
        .parse::<u32>()
        .map_err(|_| invalid_node_set(expr, "expected a node index or range"))
}

impl FromStr for NodeSet {
    type Err = NumashiftError;

    fn from_str(s: &str) -> Result<Self> {
        let expr = s.trim();
        if expr.is_empty() {
            return Err(invalid_node_set(s, "empty expression"));
        }

        let mut nodes = BTreeSet::new();
        for part in expr.split(',') {
            match part.split_once('-') {
                None => {
                    let _ = nodes.insert(parse_node(s, part)?);
                }
                Some((lo, hi)) => {
                    let lo = parse_node(s, lo)?;
                    let hi = parse_node(s, hi)?;
                    if lo > hi {
                        return Err(invalid_node_set(s, "descending range"));
                    }
                    for node in lo..=hi {
                        let _ = nodes.insert(node);
                    }
                }
            }
        }
        Ok(Self(nodes))
    }
}

impl fmt::Display for NodeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.0.iter().copied().peekable();
        let mut first = true;
        while let Some(start) = iter.next() {
            let mut end = start;
            while let Some(&next) = iter.peek() {
                if next != end + 1 {
                    break;
                }
                end = next;
                let _ = iter.next();
            }
            if !first {
                f.write_str(",")?;
            }
            first = false;
            if start == end {
                write!(f, "{start}")?;
            } else {
                write!(f, "{start}-{end}")?;
            }
        }
        Ok(())
    }
}

/// State token accepted by a freezer cgroup's `freezer.state` file.
///
/// The control file is the source of truth; this tool only ever writes
/// these two tokens into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FreezerState {
    /// All tasks in the group are suspended.
    Frozen,
    /// All tasks in the group are running.
    Thawed,
}

impl FreezerState {
    /// Returns the literal token written to `freezer.state`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Frozen => "FROZEN",
            Self::Thawed => "THAWED",
        }
    }
}

impl fmt::Display for FreezerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior when page migration fails for one process in the group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing process; remaining members are skipped.
    #[default]
    FailFast,
    /// Continue with the remaining processes and report every failure.
    KeepGoing,
}

/// Result of one process's migration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MigrationStatus {
    /// Pages were moved.
    Migrated {
        /// Number of pages the kernel could not move.
        unmoved_pages: u64,
    },
    /// The kernel rejected migration for this process.
    Failed {
        /// Rendered error message.
        error: String,
    },
    /// Never attempted because an earlier process failed.
    Skipped,
}

/// Per-process entry of a [`MigrationReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidOutcome {
    /// Process ID the attempt applied to.
    pub pid: u32,
    /// What happened to it.
    pub status: MigrationStatus,
}

/// Summary of one migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Container the run targeted.
    pub container_id: ContainerId,
    /// Freezer cgroup directory that was located.
    pub group_path: PathBuf,
    /// Source node set.
    pub from: NodeSet,
    /// Destination node set.
    pub to: NodeSet,
    /// Per-process outcomes in `cgroup.procs` file order.
    pub processes: Vec<PidOutcome>,
    /// ISO-8601 timestamp taken when the run started.
    pub started_at: String,
}

impl MigrationReport {
    /// Creates an empty report for a located group.
    #[must_use]
    pub fn new(
        container_id: &ContainerId,
        group_path: &Path,
        from: &NodeSet,
        to: &NodeSet,
    ) -> Self {
        Self {
            container_id: container_id.clone(),
            group_path: group_path.to_path_buf(),
            from: from.clone(),
            to: to.clone(),
            processes: Vec::new(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Number of processes whose pages were migrated.
    #[must_use]
    pub fn migrated_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| matches!(p.status, MigrationStatus::Migrated { .. }))
            .count()
    }

    /// Number of processes the kernel rejected.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| matches!(p.status, MigrationStatus::Failed { .. }))
            .count()
    }

    /// Number of processes never attempted.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| matches!(p.status, MigrationStatus::Skipped))
            .count()
    }
}
