//! Operation dispatch for the helper.
//!
//! Takes the positional arguments the helper was re-executed with, checks
//! the privilege precondition, and runs exactly one operation:
//!
//! ```text
//! mount  <pid> <source> <destination>
//! umount <pid> <path>
//! ```
//!
//! Anything that looks like a request for help, or a subcommand this module
//! does not own, is handed back as [`Outcome::Deferred`] so the outer
//! command layer can deal with it.

use std::ffi::OsStr;
use std::path::PathBuf;

use forkmount_common::constants::{DEFERRED_TOKENS, MOUNT_SUBCOMMAND, UMOUNT_SUBCOMMAND};
use forkmount_common::error::{ForkmountError, Result};
use forkmount_common::types::TargetPid;

use crate::filesystem::materialize::materialize;
use crate::filesystem::mount::relocate_mount;
use crate::filesystem::unmount::detach_unmount;
use crate::host::Host;
use crate::namespace;
use crate::privilege::require_superuser;

/// How an invocation ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The requested mount or unmount was carried out.
    Completed,
    /// Nothing was done; the arguments belong to the outer command layer.
    Deferred,
}

/// A fully parsed helper operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Move the mount at `source` onto `destination` inside `pid`'s namespace.
    Mount {
        /// Target process.
        pid: TargetPid,
        /// Mount visible in the helper's own namespace.
        source: PathBuf,
        /// Mount point inside the target namespace.
        destination: PathBuf,
    },
    /// Lazily unmount `path` inside `pid`'s namespace.
    Umount {
        /// Target process.
        pid: TargetPid,
        /// Mount point inside the target namespace.
        path: PathBuf,
    },
}

impl Operation {
    /// Parses `command` and its operands.
    ///
    /// Returns `Ok(None)` for a subcommand other than `mount` or `umount`.
    ///
    /// # Errors
    ///
    /// Returns [`ForkmountError::InvalidPid`], [`ForkmountError::MissingArgument`]
    /// or [`ForkmountError::UnexpectedArgument`] for malformed operands.
    pub fn parse(command: &OsStr, pid: &OsStr, operands: &[&OsStr]) -> Result<Option<Self>> {
        match command.to_str() {
            Some(MOUNT_SUBCOMMAND) => {
                let pid = parse_pid(pid)?;
                reject_surplus(operands, 2)?;
                Ok(Some(Self::Mount {
                    pid,
                    source: operand(operands, 0, "source")?,
                    destination: operand(operands, 1, "destination")?,
                }))
            }
            Some(UMOUNT_SUBCOMMAND) => {
                let pid = parse_pid(pid)?;
                reject_surplus(operands, 1)?;
                Ok(Some(Self::Umount {
                    pid,
                    path: operand(operands, 0, "path")?,
                }))
            }
            _ => Ok(None),
        }
    }

    /// Runs the operation against `host`.
    ///
    /// # Errors
    ///
    /// Returns the first failure of any step. Nothing is rolled back.
    pub fn execute(&self, host: &impl Host) -> Result<()> {
        match self {
            Self::Mount {
                pid,
                source,
                destination,
            } => {
                if std::fs::metadata(source).is_err() {
                    return Err(ForkmountError::SourceNotFound {
                        path: source.clone(),
                    });
                }
                namespace::enter(host, *pid)?;
                let kind = materialize(source, destination)?;
                tracing::debug!(%kind, "moving mount");
                relocate_mount(host, source, destination)
            }
            Self::Umount { pid, path } => {
                namespace::enter(host, *pid)?;
                detach_unmount(host, path)
            }
        }
    }
}

/// Runs one helper invocation.
///
/// `args` are the arguments after the program name. The effective uid is
/// checked once, before any namespace or filesystem action.
///
/// No locking is performed. Callers must not run two helpers against the
/// same target pid at the same time.
///
/// # Errors
///
/// Returns the first fatal error. The caller is expected to exit nonzero.
pub fn run<S: AsRef<OsStr>>(args: &[S], host: &impl Host) -> Result<Outcome> {
    let args: Vec<&OsStr> = args.iter().map(AsRef::as_ref).collect();
    let [command, pid, operands @ ..] = args.as_slice() else {
        return Ok(Outcome::Deferred);
    };
    if DEFERRED_TOKENS.iter().any(|token| *pid == OsStr::new(token)) {
        return Ok(Outcome::Deferred);
    }

    require_superuser(host)?;

    let Some(operation) = Operation::parse(command, pid, operands)? else {
        tracing::debug!(command = %command.to_string_lossy(), "subcommand not handled here");
        return Ok(Outcome::Deferred);
    };
    tracing::debug!(?operation, "dispatching");
    operation.execute(host)?;
    Ok(Outcome::Completed)
}

fn parse_pid(token: &OsStr) -> Result<TargetPid> {
    token
        .to_str()
        .ok_or_else(|| ForkmountError::InvalidPid {
            value: token.to_string_lossy().into_owned(),
        })?
        .parse()
}

fn operand(operands: &[&OsStr], index: usize, name: &'static str) -> Result<PathBuf> {
    operands
        .get(index)
        .map(PathBuf::from)
        .ok_or(ForkmountError::MissingArgument { name })
}

fn reject_surplus(operands: &[&OsStr], arity: usize) -> Result<()> {
    match operands.get(arity) {
        Some(extra) => Err(ForkmountError::UnexpectedArgument {
            value: extra.to_string_lossy().into_owned(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(tokens: &[&'static str]) -> Vec<&'static OsStr> {
        tokens.iter().map(|t| OsStr::new(*t)).collect()
    }

    #[test]
    fn parses_mount() {
        let op = Operation::parse(
            OsStr::new("mount"),
            OsStr::new("31"),
            &os(&["/var/lib/x", "/mnt/x"]),
        )
        .expect("parse");
        assert_eq!(
            op,
            Some(Operation::Mount {
                pid: TargetPid::new(31).expect("pid"),
                source: PathBuf::from("/var/lib/x"),
                destination: PathBuf::from("/mnt/x"),
            })
        );
    }

    #[test]
    fn parses_umount() {
        let op = Operation::parse(OsStr::new("umount"), OsStr::new("8"), &os(&["/mnt/x"]))
            .expect("parse");
        assert_eq!(
            op,
            Some(Operation::Umount {
                pid: TargetPid::new(8).expect("pid"),
                path: PathBuf::from("/mnt/x"),
            })
        );
    }

    #[test]
    fn unknown_subcommand_is_not_ours() {
        let op = Operation::parse(OsStr::new("remount"), OsStr::new("8"), &[]).expect("parse");
        assert_eq!(op, None);
    }

    #[test]
    fn missing_destination_is_named() {
        let err = Operation::parse(OsStr::new("mount"), OsStr::new("8"), &os(&["/src"]))
            .expect_err("fail");
        assert!(matches!(
            err,
            ForkmountError::MissingArgument {
                name: "destination"
            }
        ));
    }

    #[test]
    fn surplus_operand_is_rejected() {
        let err = Operation::parse(OsStr::new("umount"), OsStr::new("8"), &os(&["/a", "/b"]))
            .expect_err("fail");
        assert!(matches!(err, ForkmountError::UnexpectedArgument { value } if value == "/b"));
    }

    #[test]
    fn bad_pid_is_rejected() {
        let err = Operation::parse(OsStr::new("umount"), OsStr::new("init"), &os(&["/a"]))
            .expect_err("fail");
        assert!(matches!(err, ForkmountError::InvalidPid { .. }));
    }
}
