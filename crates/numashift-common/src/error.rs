//! Unified error types for the Numashift workspace.
//!
//! One enum covers the whole tool; every variant names the resource
//! (path or pid) involved so operator-facing messages stay actionable.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum NumashiftError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A user-supplied value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid value.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// The running kernel lacks a required capability.
    #[error("unsupported: {message}")]
    Unsupported {
        /// Description of the missing capability.
        message: String,
    },

    /// The kernel rejected page migration for a specific process.
    #[error("page migration failed for pid {pid}: {source}")]
    Migration {
        /// Process whose pages could not be migrated.
        pid: u32,
        /// Errno reported by `migrate_pages(2)`.
        source: std::io::Error,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, NumashiftError>;
