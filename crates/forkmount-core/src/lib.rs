//! # forkmount-core
//!
//! One-shot, privileged mount operations across a container's mount
//! namespace boundary.
//!
//! - **Dispatch**: positional argument parsing and the root precondition.
//! - **Namespaces**: joining the target's user and mount namespaces.
//! - **Filesystem**: mount point materialization, recursive move mounts,
//!   and lazy unmounts.
//!
//! Kernel access sits behind small traits ([`namespace::NamespaceEntry`],
//! [`filesystem::MountTable`], [`privilege::Credentials`]) bundled as
//! [`host::Host`], so every step can be exercised without privilege.

pub mod dispatch;
pub mod filesystem;
pub mod host;
pub mod namespace;
pub mod privilege;
