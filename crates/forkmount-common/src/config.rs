//! Configuration models for the helper and its logging.

use std::path::PathBuf;

use crate::constants::{DEFAULT_LOG_FILTER, DEFAULT_PROC_ROOT, LOG_FILTER_ENV, LOG_FORMAT_ENV};

/// Settings consumed by the namespace entry implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Mount point of procfs, used to locate `<pid>/ns/*` and `self/ns/*`.
    pub proc_root: PathBuf,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from(DEFAULT_PROC_ROOT),
        }
    }
}

impl HelperConfig {
    /// Path of the namespace entry `name` belonging to `pid` (or `self`).
    #[must_use]
    pub fn ns_path(&self, pid: &str, name: &str) -> PathBuf {
        self.proc_root.join(pid).join("ns").join(name)
    }
}

/// Logging settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `tracing` filter directive.
    pub filter: String,
    /// Emit JSON lines instead of human-readable text.
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_owned(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Reads [`LOG_FILTER_ENV`] and [`LOG_FORMAT_ENV`] from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = lookup(LOG_FILTER_ENV)
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        let json = lookup(LOG_FORMAT_ENV).is_some_and(|f| f.eq_ignore_ascii_case("json"));
        Self { filter, json }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ns_path_is_built_under_proc_root() {
        let config = HelperConfig::default();
        assert_eq!(config.ns_path("42", "mnt"), PathBuf::from("/proc/42/ns/mnt"));
        assert_eq!(
            config.ns_path("self", "user"),
            PathBuf::from("/proc/self/ns/user")
        );
    }

    #[test]
    fn log_config_defaults_when_unset() {
        let config = LogConfig::from_lookup(|_| None);
        assert_eq!(config, LogConfig::default());
    }

    #[test]
    fn log_config_reads_filter_and_format() {
        let config = LogConfig::from_lookup(|key| match key {
            LOG_FILTER_ENV => Some("forkmount_core=debug".into()),
            LOG_FORMAT_ENV => Some("JSON".into()),
            _ => None,
        });
        assert_eq!(config.filter, "forkmount_core=debug");
        assert!(config.json);
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let config = LogConfig::from_lookup(|key| (key == LOG_FILTER_ENV).then(|| "  ".into()));
        assert_eq!(config.filter, DEFAULT_LOG_FILTER);
        assert!(!config.json);
    }
}
