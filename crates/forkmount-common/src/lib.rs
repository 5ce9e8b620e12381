//! # forkmount-common
//!
//! Shared error taxonomy, domain primitives, configuration models, and
//! constants used across the forkmount workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate and makes no system calls.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
