//! The set of kernel-facing capabilities the dispatcher runs against.

use std::path::Path;

use forkmount_common::config::HelperConfig;
use forkmount_common::error::Result;
use forkmount_common::types::{NamespaceKind, TargetPid};

use crate::filesystem::{KernelMounts, MountTable};
use crate::namespace::{NamespaceEntry, ProcNamespaces};
use crate::privilege::{Credentials, ProcessCredentials};

/// Everything the dispatcher needs from the system.
pub trait Host: NamespaceEntry + MountTable + Credentials {}

impl<T: NamespaceEntry + MountTable + Credentials> Host for T {}

/// [`Host`] that talks to the running kernel.
#[derive(Debug, Clone, Default)]
pub struct SystemHost {
    namespaces: ProcNamespaces,
    mounts: KernelMounts,
    credentials: ProcessCredentials,
}

impl SystemHost {
    /// Creates a host whose namespace entry reads `config.proc_root`.
    #[must_use]
    pub const fn new(config: HelperConfig) -> Self {
        Self {
            namespaces: ProcNamespaces::new(config),
            mounts: KernelMounts,
            credentials: ProcessCredentials,
        }
    }
}

impl NamespaceEntry for SystemHost {
    fn attach_user_namespace(&self, pid: TargetPid) -> Result<()> {
        self.namespaces.attach_user_namespace(pid)
    }

    fn switch_namespace(&self, pid: TargetPid, kind: NamespaceKind) -> Result<()> {
        self.namespaces.switch_namespace(pid, kind)
    }
}

impl MountTable for SystemHost {
    fn move_mount_recursive(&self, source: &Path, destination: &Path) -> Result<()> {
        self.mounts.move_mount_recursive(source, destination)
    }

    fn detach(&self, path: &Path) -> Result<()> {
        self.mounts.detach(path)
    }
}

impl Credentials for SystemHost {
    fn effective_uid(&self) -> u32 {
        self.credentials.effective_uid()
    }
}
