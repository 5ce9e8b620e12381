//! Domain primitive types used across the forkmount workspace.

use std::fmt;
use std::fs::Metadata;
use std::str::FromStr;

use crate::error::{ForkmountError, Result};

/// Process id of the container process whose namespaces are targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetPid(i32);

impl TargetPid {
    /// Wraps a raw pid.
    ///
    /// # Errors
    ///
    /// Returns [`ForkmountError::InvalidPid`] unless `raw` is positive.
    pub fn new(raw: i32) -> Result<Self> {
        if raw <= 0 {
            return Err(ForkmountError::InvalidPid {
                value: raw.to_string(),
            });
        }
        Ok(Self(raw))
    }

    /// Returns the raw pid value.
    #[must_use]
    pub const fn as_raw(self) -> i32 {
        self.0
    }
}

impl FromStr for TargetPid {
    type Err = ForkmountError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ForkmountError::InvalidPid { value: s.to_owned() };
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        s.parse::<i32>()
            .map_err(|_| invalid())
            .and_then(|raw| Self::new(raw).map_err(|_| invalid()))
    }
}

impl fmt::Display for TargetPid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Binary classification of a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A directory.
    Directory,
    /// Anything that is not a directory.
    Other,
}

impl NodeKind {
    /// Classifies a node from its (symlink-following) metadata.
    #[must_use]
    pub fn of(metadata: &Metadata) -> Self {
        if metadata.is_dir() {
            Self::Directory
        } else {
            Self::Other
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::Other => write!(f, "file"),
        }
    }
}

/// Namespaces the helper joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    /// User namespace.
    User,
    /// Mount namespace.
    Mount,
}

impl NamespaceKind {
    /// Entry name under `/proc/<pid>/ns/`.
    #[must_use]
    pub const fn proc_name(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Mount => "mnt",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proc_name())
    }
}

/// Operand checked by an existence test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathRole {
    /// Mount source.
    Source,
    /// Mount destination.
    Destination,
    /// Path to unmount.
    Target,
}

impl fmt::Display for PathRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Destination => write!(f, "destination"),
            Self::Target => write!(f, "path"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_parses_positive_integers() {
        let pid: TargetPid = "1234".parse().expect("pid");
        assert_eq!(pid.as_raw(), 1234);
    }

    #[test]
    fn pid_rejects_zero_and_garbage() {
        for token in ["0", "", "-5", "+5", "12ab", " 7", "99999999999"] {
            assert!(
                matches!(
                    token.parse::<TargetPid>(),
                    Err(ForkmountError::InvalidPid { .. })
                ),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn node_kind_reflects_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = dir.path().join("f");
        std::fs::write(&file, b"").expect("write");

        let dir_meta = std::fs::metadata(dir.path()).expect("metadata");
        let file_meta = std::fs::metadata(&file).expect("metadata");
        assert_eq!(NodeKind::of(&dir_meta), NodeKind::Directory);
        assert_eq!(NodeKind::of(&file_meta), NodeKind::Other);
    }

    #[test]
    fn namespace_kind_maps_to_proc_entries() {
        assert_eq!(NamespaceKind::User.proc_name(), "user");
        assert_eq!(NamespaceKind::Mount.to_string(), "mnt");
    }
}
