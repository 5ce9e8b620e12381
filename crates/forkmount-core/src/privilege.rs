//! Privilege precondition for the helper.

use forkmount_common::error::{ForkmountError, Result};

/// Source of the caller's effective credentials.
pub trait Credentials {
    /// Effective uid of the calling process.
    fn effective_uid(&self) -> u32;
}

/// [`Credentials`] of the running process, via `geteuid(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCredentials;

impl Credentials for ProcessCredentials {
    fn effective_uid(&self) -> u32 {
        nix::unistd::geteuid().as_raw()
    }
}

/// Fails unless the caller runs with an effective uid of 0.
///
/// # Errors
///
/// Returns [`ForkmountError::PrivilegeRequired`] for any other uid.
pub fn require_superuser(credentials: &impl Credentials) -> Result<()> {
    let euid = credentials.effective_uid();
    if euid != 0 {
        tracing::debug!(euid, "refusing to run without root");
        return Err(ForkmountError::PrivilegeRequired);
    }
    Ok(())
}
