//! # numashift-core
//!
//! Low-level Linux primitives for live NUMA migration of container memory.
//!
//! This crate provides safe abstractions over:
//! - **Cgroup freezer**: locating a container's freezer group by name,
//!   suspending and resuming its tasks, and enumerating its members.
//! - **NUMA syscalls**: availability probing and `migrate_pages(2)`.
//! - **Orchestration**: the freeze, migrate, thaw bracket with a thaw
//!   guaranteed on every exit path once the freeze succeeded.
//!
//! All unsafe system calls are encapsulated in safe wrappers with
//! proper error handling and `// SAFETY:` documentation.

pub mod cgroup;
pub mod migrate;
pub mod numa;
