//! NUMA syscall wrappers.
//!
//! Thin safe wrappers over `get_mempolicy(2)` and `migrate_pages(2)`.
//! Node sets are converted into the word-aligned bitmasks the kernel
//! expects, sized to cover the highest node in either set.

use numashift_common::error::Result;
use numashift_common::types::NodeSet;

#[cfg(target_os = "linux")]
use numashift_common::error::NumashiftError;

#[cfg(target_os = "linux")]
const WORD_BITS: usize = libc::c_ulong::BITS as usize;

/// Returns whether the kernel exposes NUMA memory policy support.
///
/// Probes `get_mempolicy(2)` the same way libnuma's `numa_available()`
/// does; a kernel built without NUMA rejects the call with `ENOSYS`.
#[cfg(target_os = "linux")]
#[must_use]
pub fn is_available() -> bool {
    // SAFETY: every pointer argument is null and maxnode is zero, which
    // get_mempolicy accepts as a pure capability probe without writing
    // through any of them.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_get_mempolicy,
            std::ptr::null_mut::<libc::c_int>(),
            std::ptr::null_mut::<libc::c_ulong>(),
            0_usize,
            std::ptr::null_mut::<libc::c_void>(),
            0_usize,
        )
    };
    ret == 0
}

/// Stub for non-Linux platforms: NUMA page migration requires Linux.
#[cfg(not(target_os = "linux"))]
#[must_use]
pub fn is_available() -> bool {
    false
}

/// Moves the resident pages of `pid` from the `from` nodes to the `to`
/// nodes.
///
/// Virtual addresses are unchanged; only the backing physical pages
/// relocate. Returns the number of pages the kernel could not move,
/// matching `numa_migrate_pages(3)` semantics where a non-negative
/// return is still a success.
///
/// # Errors
///
/// Returns [`NumashiftError::Migration`] carrying the errno if
/// `migrate_pages(2)` fails for the process.
#[cfg(target_os = "linux")]
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn migrate_pages(pid: u32, from: &NodeSet, to: &NodeSet) -> Result<u64> {
    let highest = from.highest().max(to.highest()).unwrap_or(0);
    // maxnode counts bits; one spare bit keeps the kernel from rounding
    // the mask width down. Both masks cover max_node bits.
    let max_node = highest as usize + 2;
    let words = max_node.div_ceil(WORD_BITS);
    let old_nodes = node_mask(from, words);
    let new_nodes = node_mask(to, words);

    // SAFETY: both masks are live allocations of `words` c_ulongs and
    // max_node never exceeds their bit capacity, so the kernel reads
    // only within bounds.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_migrate_pages,
            pid as libc::pid_t,
            max_node as libc::c_ulong,
            old_nodes.as_ptr(),
            new_nodes.as_ptr(),
        )
    };
    if ret < 0 {
        let errno = nix::errno::Errno::last();
        return Err(NumashiftError::Migration {
            pid,
            source: std::io::Error::from_raw_os_error(errno as i32),
        });
    }
    Ok(ret as u64)
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error; NUMA page migration requires Linux.
#[cfg(not(target_os = "linux"))]
pub fn migrate_pages(_pid: u32, _from: &NodeSet, _to: &NodeSet) -> Result<u64> {
    Err(numashift_common::error::NumashiftError::Unsupported {
        message: "Linux required for NUMA page migration".to_string(),
    })
}

/// Renders a node set as the kernel's `unsigned long` bitmask layout.
#[cfg(target_os = "linux")]
fn node_mask(set: &NodeSet, words: usize) -> Vec<libc::c_ulong> {
    let one: libc::c_ulong = 1;
    let mut mask = vec![0 as libc::c_ulong; words];
    for node in set.iter() {
        let word = node as usize / WORD_BITS;
        let bit = node as usize % WORD_BITS;
        mask[word] |= one << bit;
    }
    mask
}
