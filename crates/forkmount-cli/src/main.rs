//! # forkmount
//!
//! Privileged, single-shot helper that moves a mount into a running
//! container's mount namespace or lazily detaches one inside it.
//!
//! Arguments go to the dispatcher first. Only when it declines them (help,
//! version, unknown or incomplete commands) does the `clap` surface parse
//! them, to print help or a usage error.

mod commands;
mod logging;

use std::ffi::OsString;

use forkmount_common::config::{HelperConfig, LogConfig};
use forkmount_core::dispatch::{self, Outcome};
use forkmount_core::host::SystemHost;

fn main() -> anyhow::Result<()> {
    logging::init(&LogConfig::from_env());

    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    let host = SystemHost::new(HelperConfig::default());

    match dispatch::run(&args, &host)? {
        Outcome::Completed => Ok(()),
        Outcome::Deferred => {
            tracing::debug!("arguments deferred to the command-line parser");
            commands::fallback()
        }
    }
}
