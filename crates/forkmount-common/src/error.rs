//! Unified error type for the forkmount workspace.
//!
//! Every variant is fatal. Components return the first failure they hit and
//! the binary turns it into a nonzero exit with the message below.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{NamespaceKind, PathRole, TargetPid};

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ForkmountError {
    /// The helper was started without an effective uid of 0.
    #[error("forkmount requires root privileges")]
    PrivilegeRequired,

    /// The pid token is not a positive integer.
    #[error("invalid pid: {value:?}")]
    InvalidPid {
        /// Token found in place of the pid.
        value: String,
    },

    /// A positional argument required by the subcommand is absent.
    #[error("missing required argument <{name}>")]
    MissingArgument {
        /// Name of the missing argument.
        name: &'static str,
    },

    /// More positional arguments were supplied than the subcommand takes.
    #[error("unexpected argument: {value:?}")]
    UnexpectedArgument {
        /// First surplus token.
        value: String,
    },

    /// The mount source does not exist.
    #[error("source {path} does not exist")]
    SourceNotFound {
        /// Source path that could not be found.
        path: PathBuf,
    },

    /// A path was not visible at the point it was checked.
    #[error("mount {which} doesn't exist: {path}: {source}")]
    PathMissing {
        /// Which operand failed the check.
        which: PathRole,
        /// Path that could not be accessed.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// An ancestor directory could not be created.
    #[error("failed to create directory '{path}': {source}")]
    DirectoryCreateFailed {
        /// Ancestor directory being created.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The destination exists with the wrong node kind and cannot be removed.
    #[error("failed to remove old {path}: {source}")]
    StaleNodeConflict {
        /// Stale destination node.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The destination placeholder could not be created.
    #[error("failed to create mount point {path}: {source}")]
    PlaceholderCreateFailed {
        /// Destination path.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// Attaching to the target's user namespace failed.
    #[error("failed to attach to user namespace of pid {pid}: {reason}")]
    UserNamespaceAttachFailed {
        /// Target process.
        pid: TargetPid,
        /// Description of the failing step.
        reason: String,
    },

    /// Switching into one of the target's namespaces failed.
    #[error("failed setns to container {kind} namespace of pid {pid}: {source}")]
    NamespaceSwitchFailed {
        /// Target process.
        pid: TargetPid,
        /// Namespace being joined.
        kind: NamespaceKind,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The recursive move mount failed.
    #[error("failed mounting {source_path} onto {destination}: {source}")]
    MountMoveFailed {
        /// Mount being moved.
        source_path: PathBuf,
        /// New mount point.
        destination: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The detach unmount failed.
    #[error("error unmounting {path}: {source}")]
    UnmountFailed {
        /// Mount point being detached.
        path: PathBuf,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The operation needs a Linux kernel.
    #[error("unsupported platform: {message}")]
    Unsupported {
        /// Description of the unavailable operation.
        message: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ForkmountError>;
