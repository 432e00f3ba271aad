//! System-wide constants and well-known paths.

/// Mount point of the cgroup v1 freezer hierarchy.
pub const FREEZER_ROOT: &str = "/sys/fs/cgroup/freezer";

/// Control file exposing a freezer cgroup's state.
pub const FREEZER_STATE_FILE: &str = "freezer.state";

/// Control file listing the member process IDs of a cgroup.
pub const CGROUP_PROCS: &str = "cgroup.procs";

/// Application name used in CLI output.
pub const APP_NAME: &str = "numashift";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "nshift";
