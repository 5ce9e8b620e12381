//! Diagnostic output setup.
//!
//! Everything goes to stderr; stdout stays untouched for the caller.

use forkmount_common::config::LogConfig;
use forkmount_common::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber described by `config`.
///
/// An unparsable filter falls back to the default instead of aborting the
/// operation.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
