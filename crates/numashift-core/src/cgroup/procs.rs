//! Cgroup member process enumeration.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use numashift_common::constants::CGROUP_PROCS;
use numashift_common::error::{NumashiftError, Result};

/// Reads the member process IDs of a cgroup in file order.
///
/// Each line of `cgroup.procs` holds one decimal PID. Lines that do not
/// parse as a positive integer are rejected here and logged; they never
/// reach the migration primitive.
///
/// # Errors
///
/// Returns an error if the control file cannot be opened or read.
pub fn member_pids(group: &Path) -> Result<Vec<u32>> {
    let file = group.join(CGROUP_PROCS);
    let reader = BufReader::new(File::open(&file).map_err(|e| NumashiftError::Io {
        path: file.clone(),
        source: e,
    })?);

    let mut pids = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| NumashiftError::Io {
            path: file.clone(),
            source: e,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.parse::<u32>() {
            Ok(pid) if pid > 0 => pids.push(pid),
            _ => tracing::warn!(line = trimmed, "ignoring malformed pid line"),
        }
    }
    Ok(pids)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with_procs(content: &str) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::write(tmp.path().join(CGROUP_PROCS), content).expect("fixture");
        tmp
    }

    #[test]
    fn reads_pids_in_file_order() {
        let tmp = group_with_procs("101\n202\n303\n");
        let pids = member_pids(tmp.path()).expect("pids");
        assert_eq!(pids, vec![101, 202, 303]);
    }

    #[test]
    fn empty_file_yields_no_pids() {
        let tmp = group_with_procs("");
        let pids = member_pids(tmp.path()).expect("pids");
        assert!(pids.is_empty());
    }

    #[test]
    fn rejects_malformed_lines() {
        let tmp = group_with_procs("101\nnot-a-pid\n0\n-5\n202\n");
        let pids = member_pids(tmp.path()).expect("pids");
        assert_eq!(pids, vec![101, 202]);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let tmp = group_with_procs("  101  \n\n202\n");
        let pids = member_pids(tmp.path()).expect("pids");
        assert_eq!(pids, vec![101, 202]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let err = member_pids(tmp.path()).expect_err("no procs file");
        assert!(matches!(err, NumashiftError::Io { .. }));
    }
}
