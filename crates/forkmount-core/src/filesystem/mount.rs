//! Cross-namespace mount relocation.
//!
//! Runs after the helper has joined the target's mount namespace: the mount
//! at `source` is moved onto `destination` together with every mount
//! nested beneath it.

use std::path::Path;

use forkmount_common::error::Result;
use forkmount_common::types::PathRole;

use super::{MountTable, require_exists};

/// Moves the mount at `source` onto `destination`, recursively.
///
/// Both paths are re-checked first because joining the target namespace
/// changes what is visible. The move is always requested with `MS_REC`,
/// whether or not `source` carries submounts.
///
/// # Errors
///
/// Returns [`PathMissing`](forkmount_common::error::ForkmountError::PathMissing)
/// if either path is not visible, or whatever the [`MountTable`] reports for
/// the move itself.
pub fn relocate_mount(mounts: &impl MountTable, source: &Path, destination: &Path) -> Result<()> {
    require_exists(PathRole::Source, source)?;
    require_exists(PathRole::Destination, destination)?;

    mounts.move_mount_recursive(source, destination)?;
    tracing::info!(
        source = %source.display(),
        destination = %destination.display(),
        "mount relocated"
    );
    Ok(())
}
