//! Core data structures.
//!
//! - The build environment and its capability traits
//! - Static version metadata

pub mod env;
pub mod version;

pub use env::{BuildEnv, BuildObject, EnvValue, FlagStore, ObjectFactory, PathResolver};
pub use version::VersionInfo;
