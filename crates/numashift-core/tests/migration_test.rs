//! End-to-end tests for the migration pipeline against a fake freezer
//! hierarchy built in a tempdir.
//!
//! Covered scenarios:
//! - Locate a docker-style nested group, freeze it, migrate every member,
//!   thaw it, and report the outcomes.
//! - A failing process halts the remaining loop but never the thaw.
//! - An unmatched container identifier leaves every control file untouched.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::Path;

use numashift_common::constants::{CGROUP_PROCS, FREEZER_STATE_FILE};
use numashift_common::error::NumashiftError;
use numashift_common::types::{ContainerId, MigrationStatus, NodeSet};
use numashift_core::cgroup::FreezerGroup;
use numashift_core::migrate::{run_with, MigrationRequest};

fn seed_group(root: &Path, rel: &str, procs: &str) {
    let group = root.join(rel);
    std::fs::create_dir_all(&group).expect("mkdir");
    std::fs::write(group.join(FREEZER_STATE_FILE), "THAWED").expect("seed state");
    std::fs::write(group.join(CGROUP_PROCS), procs).expect("seed procs");
}

fn state_of(root: &Path, rel: &str) -> String {
    std::fs::read_to_string(root.join(rel).join(FREEZER_STATE_FILE)).expect("read state")
}

fn request(root: &Path, id: &str) -> MigrationRequest {
    let mut request = MigrationRequest::new(
        ContainerId::new(id).expect("valid id"),
        "0,2-3".parse::<NodeSet>().expect("valid expression"),
        "1".parse::<NodeSet>().expect("valid expression"),
    );
    request.cgroup_root = root.to_path_buf();
    request
}

// ── Full pipeline ────────────────────────────────────────────────────

#[test]
fn pipeline_locates_freezes_migrates_and_thaws() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_group(tmp.path(), "docker/abc123", "101\n202\n303\n");
    seed_group(tmp.path(), "docker/other", "999\n");

    let mut seen_states = Vec::new();
    let report = run_with(&request(tmp.path(), "abc123"), |pid, from, to| {
        // The group must be frozen while the primitive runs.
        seen_states.push(state_of(tmp.path(), "docker/abc123"));
        assert!(from.contains(2));
        assert!(to.contains(1));
        assert!(pid > 0);
        Ok(0)
    })
    .expect("run succeeds");

    assert_eq!(seen_states, vec!["FROZEN", "FROZEN", "FROZEN"]);
    assert_eq!(report.migrated_count(), 3);
    assert_eq!(report.group_path, tmp.path().join("docker/abc123"));
    assert_eq!(state_of(tmp.path(), "docker/abc123"), "THAWED");
    assert_eq!(
        state_of(tmp.path(), "docker/other"),
        "THAWED",
        "unrelated groups are never frozen"
    );
}

#[test]
fn pipeline_locates_docker_style_group() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_group(tmp.path(), "docker/abc123", "");

    let id = ContainerId::new("abc123").expect("valid id");
    let group = FreezerGroup::locate(tmp.path(), &id).expect("group found");
    assert_eq!(group.path(), tmp.path().join("docker/abc123"));
}

// ── Partial failure ──────────────────────────────────────────────────

#[test]
fn pipeline_halts_on_first_failure_but_thaws() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_group(tmp.path(), "docker/abc123", "101\n202\n303\n");

    let mut attempted = Vec::new();
    let report = run_with(&request(tmp.path(), "abc123"), |pid, _, _| {
        attempted.push(pid);
        if pid == 202 {
            return Err(NumashiftError::Migration {
                pid,
                source: std::io::Error::from_raw_os_error(libc::EBUSY),
            });
        }
        Ok(0)
    })
    .expect("per-process failure does not fail the run");

    assert_eq!(attempted, vec![101, 202], "303 must never be attempted");
    assert_eq!(report.skipped_count(), 1);
    assert!(matches!(
        report.processes[1].status,
        MigrationStatus::Failed { .. }
    ));
    assert_eq!(state_of(tmp.path(), "docker/abc123"), "THAWED");
}

// ── No match ─────────────────────────────────────────────────────────

#[test]
fn pipeline_unmatched_id_touches_nothing() {
    let tmp = tempfile::tempdir().expect("tempdir");
    seed_group(tmp.path(), "docker/unrelated", "101\n");
    std::fs::write(
        tmp.path().join("docker/unrelated").join(FREEZER_STATE_FILE),
        "",
    )
    .expect("blank state");

    let mut called = false;
    let err = run_with(&request(tmp.path(), "abc123"), |_, _, _| {
        called = true;
        Ok(0)
    })
    .expect_err("run fails");

    assert!(matches!(err, NumashiftError::NotFound { .. }));
    assert!(!called, "the primitive must never run without a group");
    assert_eq!(state_of(tmp.path(), "docker/unrelated"), "");
}
