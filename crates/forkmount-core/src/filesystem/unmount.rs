//! Lazy unmount inside the target namespace.

use std::path::Path;

use forkmount_common::error::Result;
use forkmount_common::types::PathRole;

use super::{MountTable, require_exists};

/// Detaches the mount at `path` with `MNT_DETACH`.
///
/// The mount disappears from the namespace immediately; the kernel releases
/// it once the last reference is gone. There is no forced or synchronous
/// variant.
///
/// # Errors
///
/// Returns [`PathMissing`](forkmount_common::error::ForkmountError::PathMissing)
/// without touching the mount table if `path` is not visible, or whatever
/// the [`MountTable`] reports for the unmount.
pub fn detach_unmount(mounts: &impl MountTable, path: &Path) -> Result<()> {
    require_exists(PathRole::Target, path)?;

    mounts.detach(path)?;
    tracing::info!(path = %path.display(), "mount detached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::PathBuf;

    use forkmount_common::error::ForkmountError;

    use super::*;

    #[derive(Default)]
    struct RecordingMounts {
        detached: RefCell<Vec<PathBuf>>,
    }

    impl MountTable for RecordingMounts {
        fn move_mount_recursive(&self, _source: &Path, _destination: &Path) -> Result<()> {
            unreachable!("unmount never moves")
        }

        fn detach(&self, path: &Path) -> Result<()> {
            self.detached.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn detaches_existing_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mounts = RecordingMounts::default();

        detach_unmount(&mounts, dir.path()).expect("detach");
        assert_eq!(mounts.detached.borrow().as_slice(), &[dir.path().to_path_buf()]);
    }

    #[test]
    fn missing_path_never_reaches_the_kernel() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mounts = RecordingMounts::default();

        let err = detach_unmount(&mounts, &dir.path().join("absent")).expect_err("fail");
        assert!(matches!(
            err,
            ForkmountError::PathMissing {
                which: PathRole::Target,
                ..
            }
        ));
        assert!(mounts.detached.borrow().is_empty());
    }
}
