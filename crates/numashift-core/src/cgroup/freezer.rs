//! Freezer state control.
//!
//! The freezer controller suspends and resumes every task in a group
//! through the `freezer.state` control file: writing `FROZEN` suspends,
//! writing `THAWED` resumes. The state is not read back; the write's
//! success is the only confirmation this module relies on.

use std::path::{Path, PathBuf};

use numashift_common::constants::FREEZER_STATE_FILE;
use numashift_common::error::{NumashiftError, Result};
use numashift_common::types::FreezerState;

/// Writes a state token to the group's `freezer.state` file.
///
/// # Errors
///
/// Returns an error if the control file cannot be opened or written.
pub fn write_state(group: &Path, state: FreezerState) -> Result<()> {
    let file = group.join(FREEZER_STATE_FILE);
    std::fs::write(&file, state.as_str()).map_err(|e| NumashiftError::Io {
        path: file,
        source: e,
    })?;
    tracing::debug!(state = %state, group = %group.display(), "freezer state written");
    Ok(())
}

/// Scoped freeze of a cgroup.
///
/// Freezing is an acquisition: constructing the guard writes `FROZEN`,
/// and the group is thawed exactly once afterwards. Callers consume the
/// guard with [`FreezeGuard::thaw`] to observe the thaw write's result.
/// If an armed guard is dropped instead (early return or unwind between
/// freeze and thaw), the drop handler writes `THAWED` on a best-effort
/// basis, so a group is never left frozen once the freeze succeeded.
///
/// Double-freezing the same group is not guarded against.
#[derive(Debug)]
pub struct FreezeGuard {
    group: PathBuf,
    armed: bool,
}

impl FreezeGuard {
    /// Freezes the group and arms the guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the `FROZEN` write is rejected; no guard is
    /// created and the group must be assumed running.
    pub fn freeze(group: &Path) -> Result<Self> {
        write_state(group, FreezerState::Frozen)?;
        tracing::info!(group = %group.display(), "cgroup frozen");
        Ok(Self {
            group: group.to_path_buf(),
            armed: true,
        })
    }

    /// Thaws the group and disarms the guard.
    ///
    /// Thawing an already-thawed group rewrites the same token and
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the `THAWED` write is rejected. The guard is
    /// disarmed either way; retrying is the operator's call.
    pub fn thaw(mut self) -> Result<()> {
        self.armed = false;
        write_state(&self.group, FreezerState::Thawed)?;
        tracing::info!(group = %self.group.display(), "cgroup thawed");
        Ok(())
    }
}

impl Drop for FreezeGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(e) = write_state(&self.group, FreezerState::Thawed) {
            tracing::error!(
                group = %self.group.display(),
                error = %e,
                "failed to thaw cgroup on exit; tasks may still be frozen"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn freezer_dir() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join(FREEZER_STATE_FILE), "THAWED").expect("fixture");
        tmp
    }

    fn state_content(dir: &Path) -> String {
        std::fs::read_to_string(dir.join(FREEZER_STATE_FILE)).expect("read state")
    }

    #[test]
    fn freeze_writes_frozen_token() {
        let tmp = freezer_dir();
        let guard = FreezeGuard::freeze(tmp.path()).expect("freeze");
        assert_eq!(state_content(tmp.path()), "FROZEN");
        drop(guard);
    }

    #[test]
    fn thaw_writes_thawed_token() {
        let tmp = freezer_dir();
        let guard = FreezeGuard::freeze(tmp.path()).expect("freeze");
        guard.thaw().expect("thaw");
        assert_eq!(state_content(tmp.path()), "THAWED");
    }

    #[test]
    fn thaw_is_idempotent_on_thawed_group() {
        let tmp = freezer_dir();
        write_state(tmp.path(), FreezerState::Thawed).expect("first write");
        write_state(tmp.path(), FreezerState::Thawed).expect("second write");
        assert_eq!(state_content(tmp.path()), "THAWED");
    }

    #[test]
    fn dropped_armed_guard_thaws() {
        let tmp = freezer_dir();
        {
            let _guard = FreezeGuard::freeze(tmp.path()).expect("freeze");
            assert_eq!(state_content(tmp.path()), "FROZEN");
        }
        assert_eq!(state_content(tmp.path()), "THAWED");
    }

    #[test]
    fn consumed_guard_writes_nothing_on_drop() {
        let tmp = freezer_dir();
        let guard = FreezeGuard::freeze(tmp.path()).expect("freeze");
        guard.thaw().expect("thaw");

        // The guard is gone; later state changes must stick.
        std::fs::write(tmp.path().join(FREEZER_STATE_FILE), "SENTINEL").expect("write");
        assert_eq!(state_content(tmp.path()), "SENTINEL");
    }

    #[test]
    fn freeze_fails_for_missing_group() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let missing = tmp.path().join("gone");

        let err = FreezeGuard::freeze(&missing).expect_err("freeze must fail");
        assert!(matches!(err, NumashiftError::Io { .. }));
    }
}
