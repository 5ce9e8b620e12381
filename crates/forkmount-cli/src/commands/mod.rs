//! Command-line surface for help, version, and usage errors.
//!
//! Valid `mount` and `umount` invocations never get here: the dispatcher
//! consumes them from the raw arguments. This layer only renders what the
//! dispatcher hands back.

pub mod mount;
pub mod umount;

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

/// forkmount — perform mount operations inside a running container.
///
/// Internal helper used for all container mount operations. Must run as root.
#[derive(Parser, Debug)]
#[command(name = "forkmount", version, about, long_about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Move a mount into the mount namespace of a container process.
    Mount(mount::MountArgs),
    /// Lazily unmount a path inside the mount namespace of a container process.
    Umount(umount::UmountArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Mount(_) => forkmount_common::constants::MOUNT_SUBCOMMAND,
            Self::Umount(_) => forkmount_common::constants::UMOUNT_SUBCOMMAND,
        }
    }
}

/// How the `clap` surface treats arguments the dispatcher declined.
#[derive(Debug)]
pub enum Fallback {
    /// Unknown subcommand: print the top-level help and succeed.
    Help,
    /// Help, version, or a usage error rendered and exited by `clap`.
    Usage(clap::Error),
    /// A complete invocation the dispatcher should have consumed.
    Parsed(Cli),
}

/// Classifies a full argument vector, program name included.
pub fn classify<I, T>(args: I) -> Fallback
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Fallback::Parsed(cli),
        Err(e) if e.kind() == ErrorKind::InvalidSubcommand => Fallback::Help,
        Err(e) => Fallback::Usage(e),
    }
}

/// Parses the process arguments with `clap` after the dispatcher declined them.
///
/// An unknown subcommand prints the top-level help and exits 0. Help and
/// version requests exit 0 from inside `clap`; usage errors exit 2.
///
/// # Errors
///
/// Returns an error when writing the help text fails, or when the arguments
/// parse cleanly, since such an invocation should already have been handled
/// by the dispatcher.
pub fn fallback() -> anyhow::Result<()> {
    match classify(std::env::args_os()) {
        Fallback::Help => {
            tracing::debug!("unknown subcommand, printing help");
            Cli::command().print_help()?;
            Ok(())
        }
        Fallback::Usage(e) => e.exit(),
        Fallback::Parsed(cli) => anyhow::bail!(
            "the {} command should have been intercepted by the dispatcher",
            cli.command.name()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mount_takes_exactly_three_operands() {
        let cli = Cli::try_parse_from(["forkmount", "mount", "12", "/src", "/dst"]).expect("parse");
        assert_eq!(cli.command.name(), "mount");

        assert!(Cli::try_parse_from(["forkmount", "mount", "12", "/src"]).is_err());
        assert!(Cli::try_parse_from(["forkmount", "mount", "12", "/a", "/b", "/c"]).is_err());
    }

    #[test]
    fn umount_takes_exactly_two_operands() {
        let cli = Cli::try_parse_from(["forkmount", "umount", "12", "/mnt"]).expect("parse");
        match cli.command {
            Command::Umount(args) => {
                assert_eq!(args.pid, 12);
                assert_eq!(args.path, std::path::PathBuf::from("/mnt"));
            }
            Command::Mount(_) => panic!("parsed as mount"),
        }

        assert!(Cli::try_parse_from(["forkmount", "umount", "12"]).is_err());
    }

    #[test]
    fn unknown_subcommand_is_rejected_by_strict_parsing() {
        assert!(Cli::try_parse_from(["forkmount", "remount", "12"]).is_err());
    }

    #[test]
    fn unknown_subcommand_falls_back_to_help() {
        assert!(matches!(
            classify(["forkmount", "bind", "1", "/a", "/b"]),
            Fallback::Help
        ));
    }

    #[test]
    fn help_flag_is_rendered_by_clap() {
        match classify(["forkmount", "mount", "--help"]) {
            Fallback::Usage(e) => assert_eq!(e.kind(), ErrorKind::DisplayHelp),
            other => panic!("unexpected fallback: {other:?}"),
        }
    }

    #[test]
    fn missing_operand_stays_a_usage_error() {
        match classify(["forkmount", "umount", "12"]) {
            Fallback::Usage(e) => {
                assert_eq!(e.kind(), ErrorKind::MissingRequiredArgument);
                assert_eq!(e.exit_code(), 2);
            }
            other => panic!("unexpected fallback: {other:?}"),
        }
    }

    #[test]
    fn complete_invocation_is_parsed() {
        assert!(matches!(
            classify(["forkmount", "mount", "12", "/src", "/dst"]),
            Fallback::Parsed(_)
        ));
    }
}
