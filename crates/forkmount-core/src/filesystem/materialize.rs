//! Mount point materialization.
//!
//! Makes sure a node of the right kind exists at the destination before a
//! mount is moved onto it: a directory for directory sources, an empty
//! regular file for everything else. Missing ancestors are created on the
//! way. A destination that already has the right kind is left alone so a
//! repeated invocation after a failed attempt succeeds.

use std::fs::{self, DirBuilder, OpenOptions};
use std::io;
use std::os::unix::fs::{DirBuilderExt, OpenOptionsExt};
use std::path::{Component, Path, PathBuf};

use forkmount_common::constants::{ANCESTOR_DIR_MODE, PLACEHOLDER_DIR_MODE, PLACEHOLDER_FILE_MODE};
use forkmount_common::error::{ForkmountError, Result};
use forkmount_common::types::NodeKind;

/// Ensures `destination` exists with the same node kind as `source`.
///
/// Returns the kind that was materialized.
///
/// # Errors
///
/// - [`ForkmountError::SourceNotFound`] if `source` cannot be stat'ed.
/// - [`ForkmountError::DirectoryCreateFailed`] if an ancestor cannot be created.
/// - [`ForkmountError::StaleNodeConflict`] if a node of the wrong kind cannot be removed.
/// - [`ForkmountError::PlaceholderCreateFailed`] if the destination itself cannot be created.
///
/// Ancestors created before a later failure are left in place.
pub fn materialize(source: &Path, destination: &Path) -> Result<NodeKind> {
    let kind = fs::metadata(source)
        .map(|meta| NodeKind::of(&meta))
        .map_err(|_| ForkmountError::SourceNotFound {
            path: source.to_path_buf(),
        })?;

    if let Some(parent) = destination.parent() {
        create_ancestors(parent)?;
    }

    match kind {
        NodeKind::Directory => ensure_dir(destination)?,
        NodeKind::Other => ensure_file(destination)?,
    }

    tracing::debug!(
        source = %source.display(),
        destination = %destination.display(),
        %kind,
        "mount point materialized"
    );
    Ok(kind)
}

/// Creates every missing directory along `dir`, component by component.
///
/// Components that already exist must resolve to a directory (symlinks are
/// followed). Empty paths, the root and `.` are no-ops.
///
/// # Errors
///
/// Returns [`ForkmountError::DirectoryCreateFailed`] for any `mkdir` error
/// other than "already exists", or when an existing component is not a
/// directory.
pub fn create_ancestors(dir: &Path) -> Result<()> {
    let mut current = PathBuf::new();
    for component in dir.components() {
        current.push(component);
        if matches!(
            component,
            Component::RootDir | Component::CurDir | Component::Prefix(_)
        ) {
            continue;
        }

        match DirBuilder::new().mode(ANCESTOR_DIR_MODE).create(&current) {
            Ok(()) => tracing::debug!(path = %current.display(), "created ancestor directory"),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                match fs::metadata(&current) {
                    Ok(meta) if meta.is_dir() => {}
                    Ok(_) => {
                        return Err(ForkmountError::DirectoryCreateFailed {
                            path: current,
                            source: io::Error::from(io::ErrorKind::NotADirectory),
                        });
                    }
                    Err(e) => {
                        return Err(ForkmountError::DirectoryCreateFailed {
                            path: current,
                            source: e,
                        });
                    }
                }
            }
            Err(e) => {
                return Err(ForkmountError::DirectoryCreateFailed {
                    path: current,
                    source: e,
                });
            }
        }
    }
    Ok(())
}

fn ensure_dir(destination: &Path) -> Result<()> {
    if let Ok(meta) = fs::metadata(destination) {
        if meta.is_dir() {
            return Ok(());
        }
        tracing::warn!(path = %destination.display(), "replacing file with directory mount point");
        fs::remove_file(destination).map_err(|e| ForkmountError::StaleNodeConflict {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }

    DirBuilder::new()
        .mode(PLACEHOLDER_DIR_MODE)
        .create(destination)
        .map_err(|e| ForkmountError::PlaceholderCreateFailed {
            path: destination.to_path_buf(),
            source: e,
        })
}

fn ensure_file(destination: &Path) -> Result<()> {
    if let Ok(meta) = fs::metadata(destination) {
        if !meta.is_dir() {
            return Ok(());
        }
        tracing::warn!(path = %destination.display(), "replacing directory with file mount point");
        // rmdir only: a populated directory is never discarded.
        fs::remove_dir(destination).map_err(|e| ForkmountError::StaleNodeConflict {
            path: destination.to_path_buf(),
            source: e,
        })?;
    }

    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(PLACEHOLDER_FILE_MODE)
        .open(destination)
        .map(drop)
        .map_err(|e| ForkmountError::PlaceholderCreateFailed {
            path: destination.to_path_buf(),
            source: e,
        })
}
