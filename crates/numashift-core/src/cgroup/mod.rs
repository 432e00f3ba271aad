//! Cgroup v1 freezer hierarchy access.
//!
//! Provides interfaces for locating a container's freezer group by name,
//! writing freezer state transitions, and enumerating member processes
//! via the control files under the freezer mount point.

pub mod freezer;
pub mod locator;
pub mod procs;

use std::path::{Path, PathBuf};

use numashift_common::error::Result;
use numashift_common::types::ContainerId;

pub use freezer::FreezeGuard;

/// Handle to a located freezer cgroup directory.
///
/// The handle is valid only as long as the underlying directory exists;
/// nothing is held open or locked across calls.
#[derive(Debug, Clone)]
pub struct FreezerGroup {
    /// Path to the group directory under the freezer mount point.
    path: PathBuf,
}

impl FreezerGroup {
    /// Locates the freezer group whose directory name contains the
    /// container ID, searching depth-first below `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the traversal hits an unreadable directory or
    /// no directory in the subtree matches.
    pub fn locate(root: &Path, id: &ContainerId) -> Result<Self> {
        let path = locator::find_group(root, id.as_str())?;
        tracing::debug!(path = %path.display(), "freezer group located");
        Ok(Self { path })
    }

    /// Returns the group directory path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Freezes every task in the group and returns the armed guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the `FROZEN` write is rejected; in that case
    /// the group must be assumed running.
    pub fn freeze(&self) -> Result<FreezeGuard> {
        FreezeGuard::freeze(&self.path)
    }

    /// Reads the member process IDs of the group in file order.
    ///
    /// # Errors
    ///
    /// Returns an error if `cgroup.procs` cannot be opened or read.
    pub fn member_pids(&self) -> Result<Vec<u32>> {
        procs::member_pids(&self.path)
    }
}
