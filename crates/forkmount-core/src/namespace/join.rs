//! Joining a namespace of another process through `/proc/<pid>/ns`.

use std::fs::File;

use forkmount_common::config::HelperConfig;
use forkmount_common::error::{ForkmountError, Result};
use forkmount_common::types::{NamespaceKind, TargetPid};

/// Joins the `kind` namespace of `pid` via `setns(2)`.
///
/// # Errors
///
/// Returns [`ForkmountError::NamespaceSwitchFailed`] if the namespace file
/// cannot be opened (typically because the process has exited) or if
/// `setns(2)` fails.
#[cfg(target_os = "linux")]
pub fn join_namespace(config: &HelperConfig, pid: TargetPid, kind: NamespaceKind) -> Result<()> {
    use nix::sched::{CloneFlags, setns};

    let path = config.ns_path(&pid.to_string(), kind.proc_name());
    let switch_failed = |source: std::io::Error| ForkmountError::NamespaceSwitchFailed {
        pid,
        kind,
        source,
    };

    let ns_file = File::open(&path).map_err(switch_failed)?;
    let flag = match kind {
        NamespaceKind::User => CloneFlags::CLONE_NEWUSER,
        NamespaceKind::Mount => CloneFlags::CLONE_NEWNS,
    };
    setns(&ns_file, flag).map_err(|e| switch_failed(e.into()))?;

    tracing::debug!(%pid, %kind, path = %path.display(), "joined namespace");
    Ok(())
}

/// Stub for non-Linux platforms.
///
/// # Errors
///
/// Always returns an error. `setns(2)` is Linux-only.
#[cfg(not(target_os = "linux"))]
pub fn join_namespace(_config: &HelperConfig, _pid: TargetPid, _kind: NamespaceKind) -> Result<()> {
    Err(ForkmountError::Unsupported {
        message: "namespace switching requires Linux".into(),
    })
}
