//! Attaching to the user namespace of a target process.
//!
//! A target that shares the helper's user namespace needs nothing. A
//! target in a different one is joined, and the helper then becomes root
//! inside it so that the subsequent mount-namespace switch and mount calls
//! are evaluated with the container's root credentials.

use std::path::Path;

use forkmount_common::config::HelperConfig;
use forkmount_common::error::{ForkmountError, Result};
use forkmount_common::types::{NamespaceKind, TargetPid};

/// Joins the user namespace of `pid` when it differs from the caller's.
///
/// # Errors
///
/// Returns [`ForkmountError::UserNamespaceAttachFailed`] if the namespace
/// links cannot be read, `setns(2)` fails, or the uid/gid switch fails.
#[cfg(target_os = "linux")]
pub fn attach_user_namespace(config: &HelperConfig, pid: TargetPid) -> Result<()> {
    use nix::unistd::{Gid, Uid, setgid, setuid};

    let attach_failed = |reason: String| ForkmountError::UserNamespaceAttachFailed { pid, reason };

    let target = config.ns_path(&pid.to_string(), NamespaceKind::User.proc_name());
    if std::fs::symlink_metadata(&target).is_err() {
        tracing::debug!(%pid, "kernel exposes no user namespace, nothing to attach");
        return Ok(());
    }

    let own = config.ns_path("self", NamespaceKind::User.proc_name());
    if same_namespace(&own, &target).map_err(attach_failed)? {
        tracing::debug!(%pid, "already in target user namespace");
        return Ok(());
    }

    super::join::join_namespace(config, pid, NamespaceKind::User)
        .map_err(|e| attach_failed(e.to_string()))?;
    setgid(Gid::from_raw(0)).map_err(|e| attach_failed(format!("setgid(0): {e}")))?;
    setuid(Uid::from_raw(0)).map_err(|e| attach_failed(format!("setuid(0): {e}")))?;

    tracing::debug!(%pid, "attached to target user namespace");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error. User namespaces are Linux-only.
#[cfg(not(target_os = "linux"))]
pub fn attach_user_namespace(_config: &HelperConfig, _pid: TargetPid) -> Result<()> {
    Err(ForkmountError::Unsupported {
        message: "user namespaces require Linux".into(),
    })
}

/// Compares the link targets (`user:[<inode>]`) of two namespace entries.
#[cfg(target_os = "linux")]
fn same_namespace(own: &Path, target: &Path) -> std::result::Result<bool, String> {
    let read = |path: &Path| {
        std::fs::read_link(path).map_err(|e| format!("readlink {}: {e}", path.display()))
    };
    Ok(read(own)? == read(target)?)
}
