//! `forkmount umount` — lazily detach a mount inside a container.

use std::path::PathBuf;

use clap::Args;

/// Arguments for the `umount` command.
#[derive(Args, Debug)]
pub struct UmountArgs {
    /// PID of a process inside the target container.
    #[arg(value_name = "PID")]
    pub pid: i32,

    /// Mount point inside the container.
    pub path: PathBuf,
}
