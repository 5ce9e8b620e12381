//! Filesystem side of the helper.
//!
//! Destination materialization, the recursive move mount, and the lazy
//! unmount. The two mount syscalls go through [`MountTable`] so callers can
//! substitute a fake kernel in tests.

pub mod materialize;
pub mod mount;
pub mod unmount;

use std::path::Path;

use forkmount_common::error::{ForkmountError, Result};
use forkmount_common::types::PathRole;
use nix::unistd::{AccessFlags, access};

/// Mount syscalls issued by the helper.
pub trait MountTable {
    /// Moves the mount at `source` (and its submounts) onto `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`ForkmountError::MountMoveFailed`]
    /// if the kernel rejects the move.
    fn move_mount_recursive(&self, source: &Path, destination: &Path) -> Result<()>;

    /// Lazily detaches the mount at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ForkmountError::UnmountFailed`]
    /// if the kernel rejects the unmount.
    fn detach(&self, path: &Path) -> Result<()>;
}

/// Fails with [`ForkmountError::PathMissing`] unless `path` is visible to
/// the calling process right now.
///
/// # Errors
///
/// Returns the `access(2)` failure wrapped as `PathMissing`.
pub fn require_exists(which: PathRole, path: &Path) -> Result<()> {
    access(path, AccessFlags::F_OK).map_err(|e| ForkmountError::PathMissing {
        which,
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// [`MountTable`] backed by `mount(2)` and `umount2(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct KernelMounts;

#[cfg(target_os = "linux")]
impl MountTable for KernelMounts {
    fn move_mount_recursive(&self, source: &Path, destination: &Path) -> Result<()> {
        use nix::mount::{MsFlags, mount};

        mount(
            Some(source),
            destination,
            Some("none"),
            MsFlags::MS_MOVE | MsFlags::MS_REC,
            None::<&str>,
        )
        .map_err(|e| ForkmountError::MountMoveFailed {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e.into(),
        })
    }

    fn detach(&self, path: &Path) -> Result<()> {
        use nix::mount::{MntFlags, umount2};

        umount2(path, MntFlags::MNT_DETACH).map_err(|e| ForkmountError::UnmountFailed {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}

/// Stub for non-Linux platforms.
#[cfg(not(target_os = "linux"))]
impl MountTable for KernelMounts {
    fn move_mount_recursive(&self, _source: &Path, _destination: &Path) -> Result<()> {
        Err(ForkmountError::Unsupported {
            message: "move mounts require Linux".into(),
        })
    }

    fn detach(&self, _path: &Path) -> Result<()> {
        Err(ForkmountError::Unsupported {
            message: "detach unmounts require Linux".into(),
        })
    }
}
