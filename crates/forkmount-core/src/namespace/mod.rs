//! Entry into a target process's namespaces.
//!
//! [`NamespaceEntry`] is the capability the dispatcher uses to move the
//! helper into the target's user and mount namespaces. [`ProcNamespaces`]
//! implements it with `setns(2)` on `/proc/<pid>/ns/*`; tests substitute a
//! recording fake.

pub mod join;
pub mod user;

use forkmount_common::config::HelperConfig;
use forkmount_common::error::Result;
use forkmount_common::types::{NamespaceKind, TargetPid};

/// Switches the calling process into namespaces of another process.
pub trait NamespaceEntry {
    /// Attaches the caller to the user namespace context of `pid`.
    ///
    /// # Errors
    ///
    /// Returns [`UserNamespaceAttachFailed`](forkmount_common::error::ForkmountError::UserNamespaceAttachFailed)
    /// if any step of the attach fails.
    fn attach_user_namespace(&self, pid: TargetPid) -> Result<()>;

    /// Moves the caller into the `kind` namespace of `pid`.
    ///
    /// # Errors
    ///
    /// Returns [`NamespaceSwitchFailed`](forkmount_common::error::ForkmountError::NamespaceSwitchFailed)
    /// if the namespace cannot be opened or joined.
    fn switch_namespace(&self, pid: TargetPid, kind: NamespaceKind) -> Result<()>;
}

/// Enters the user namespace context and then the mount namespace of `pid`.
///
/// The order matters: the mount syscalls that follow are checked against
/// the credentials acquired in the user namespace.
///
/// # Errors
///
/// Propagates the first failure of either step.
pub fn enter(entry: &impl NamespaceEntry, pid: TargetPid) -> Result<()> {
    entry.attach_user_namespace(pid)?;
    entry.switch_namespace(pid, NamespaceKind::Mount)?;
    tracing::debug!(%pid, "entered target mount namespace");
    Ok(())
}

/// [`NamespaceEntry`] backed by procfs and `setns(2)`.
///
/// Must be used from a single-threaded process; the kernel refuses user
/// and mount namespace switches otherwise.
#[derive(Debug, Clone, Default)]
pub struct ProcNamespaces {
    config: HelperConfig,
}

impl ProcNamespaces {
    /// Creates an entry provider rooted at `config.proc_root`.
    #[must_use]
    pub const fn new(config: HelperConfig) -> Self {
        Self { config }
    }
}

impl NamespaceEntry for ProcNamespaces {
    fn attach_user_namespace(&self, pid: TargetPid) -> Result<()> {
        user::attach_user_namespace(&self.config, pid)
    }

    fn switch_namespace(&self, pid: TargetPid, kind: NamespaceKind) -> Result<()> {
        join::join_namespace(&self.config, pid, kind)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use forkmount_common::error::ForkmountError;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Step {
        AttachUser(i32),
        Switch(i32, NamespaceKind),
    }

    #[derive(Default)]
    struct RecordingEntry {
        steps: RefCell<Vec<Step>>,
        fail_attach: bool,
        fail_switch: bool,
    }

    impl NamespaceEntry for RecordingEntry {
        fn attach_user_namespace(&self, pid: TargetPid) -> Result<()> {
            self.steps.borrow_mut().push(Step::AttachUser(pid.as_raw()));
            if self.fail_attach {
                return Err(ForkmountError::UserNamespaceAttachFailed {
                    pid,
                    reason: "setns: Operation not permitted".into(),
                });
            }
            Ok(())
        }

        fn switch_namespace(&self, pid: TargetPid, kind: NamespaceKind) -> Result<()> {
            self.steps.borrow_mut().push(Step::Switch(pid.as_raw(), kind));
            if self.fail_switch {
                return Err(ForkmountError::NamespaceSwitchFailed {
                    pid,
                    kind,
                    source: std::io::Error::from_raw_os_error(3),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn enter_attaches_user_namespace_before_mount_namespace() {
        let entry = RecordingEntry::default();
        enter(&entry, TargetPid::new(77).expect("pid")).expect("enter");
        assert_eq!(
            *entry.steps.borrow(),
            vec![Step::AttachUser(77), Step::Switch(77, NamespaceKind::Mount)]
        );
    }

    #[test]
    fn enter_reports_switch_failure() {
        let entry = RecordingEntry {
            fail_switch: true,
            ..RecordingEntry::default()
        };
        let err = enter(&entry, TargetPid::new(5).expect("pid")).expect_err("fail");
        assert!(matches!(
            err,
            ForkmountError::NamespaceSwitchFailed {
                kind: NamespaceKind::Mount,
                ..
            }
        ));
    }

    #[test]
    fn failed_user_attach_stops_before_mount_switch() {
        let entry = RecordingEntry {
            fail_attach: true,
            ..RecordingEntry::default()
        };
        let err = enter(&entry, TargetPid::new(12).expect("pid")).expect_err("fail");
        assert!(matches!(err, ForkmountError::UserNamespaceAttachFailed { .. }));
        assert_eq!(*entry.steps.borrow(), vec![Step::AttachUser(12)]);
    }
}
