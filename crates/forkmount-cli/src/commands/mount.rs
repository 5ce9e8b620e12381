//! `forkmount mount` — move a mount into a container's mount namespace.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `mount` command.
#[derive(Args, Debug)]
pub struct MountArgs {
    /// PID of a process inside the target container.
    #[arg(value_name = "PID")]
    pub pid: i32,

    /// Existing mount, as seen from the caller's mount namespace.
    pub source: PathBuf,

    /// Mount point inside the container. Created if missing.
    pub destination: PathBuf,
}
