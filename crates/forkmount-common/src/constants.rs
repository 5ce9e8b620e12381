//! System-wide constants and default paths.

/// Mount point of the proc filesystem used to reach `/proc/<pid>/ns/*`.
pub const DEFAULT_PROC_ROOT: &str = "/proc";

/// Mode for ancestor directories created on the way to a destination.
pub const ANCESTOR_DIR_MODE: u32 = 0o755;

/// Mode for a directory placeholder created at the destination.
pub const PLACEHOLDER_DIR_MODE: u32 = 0o755;

/// Mode for a regular-file placeholder created at the destination.
pub const PLACEHOLDER_FILE_MODE: u32 = 0o755;

/// Subcommand that relocates a mount into the target namespace.
pub const MOUNT_SUBCOMMAND: &str = "mount";

/// Subcommand that detaches a mount inside the target namespace.
pub const UMOUNT_SUBCOMMAND: &str = "umount";

/// Tokens that hand control back to the outer command layer when they
/// appear in place of the pid.
pub const DEFERRED_TOKENS: [&str; 3] = ["--help", "--version", "-h"];

/// Environment variable holding the `tracing` filter directive.
pub const LOG_FILTER_ENV: &str = "FORKMOUNT_LOG";

/// Environment variable selecting the log output format (`json` or `text`).
pub const LOG_FORMAT_ENV: &str = "FORKMOUNT_LOG_FORMAT";

/// Filter used when [`LOG_FILTER_ENV`] is unset. Successful runs stay quiet.
pub const DEFAULT_LOG_FILTER: &str = "warn";
