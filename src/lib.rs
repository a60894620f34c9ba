//! buildenv - helpers that extend a C/C++ build environment
//!
//! This crate provides the routines a build script calls while configuring:
//! registering source files, detecting the compiler, silencing warnings,
//! and generating version headers from git metadata.

pub mod core;
pub mod methods;
pub mod util;

/// Test doubles and fixtures for unit tests.
///
/// Only compiled for tests. Provides an in-memory environment and
/// temporary git checkouts.
#[cfg(test)]
pub mod test_support;

pub use self::core::{
    env::{BuildEnv, BuildObject, EnvValue, FlagStore, ObjectFactory, PathResolver},
    version::VersionInfo,
};
pub use util::config::Config;
