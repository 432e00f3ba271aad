//! Container cgroup discovery.
//!
//! Container engines place a container's freezer group at an
//! engine-specific depth below the mount point (for example
//! `freezer/docker/<id>/` or `freezer/kubepods/.../<id>/`), so the group
//! is found by name search rather than a fixed layout.

use std::path::{Path, PathBuf};

use numashift_common::error::{NumashiftError, Result};

/// Finds the first directory under `root` whose name contains `fragment`.
///
/// The traversal is depth-first over an explicit work list. All entries
/// of a directory are tested for a name match before any of them is
/// descended into, so a match at the current level always wins over a
/// deeper one; the first match in directory-enumeration order ends the
/// search immediately. Non-directory entries are ignored.
///
/// # Errors
///
/// Returns [`NumashiftError::Io`] if any directory along the traversal
/// cannot be read, and [`NumashiftError::NotFound`] when no directory in
/// the subtree matches. Partial traversal results are discarded.
pub fn find_group(root: &Path, fragment: &str) -> Result<PathBuf> {
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| NumashiftError::Io {
            path: dir.clone(),
            source: e,
        })?;

        let mut subdirs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| NumashiftError::Io {
                path: dir.clone(),
                source: e,
            })?;
            let file_type = entry.file_type().map_err(|e| NumashiftError::Io {
                path: entry.path(),
                source: e,
            })?;
            if !file_type.is_dir() {
                continue;
            }
            if entry.file_name().to_string_lossy().contains(fragment) {
                return Ok(entry.path());
            }
            subdirs.push(entry.path());
        }

        // Reversed push so the first subdirectory is popped next.
        while let Some(sub) = subdirs.pop() {
            pending.push(sub);
        }
    }

    Err(NumashiftError::NotFound {
        kind: "cgroup",
        id: fragment.to_string(),
    })
}
