//! Build-script helpers.
//!
//! Each helper takes the narrowest environment capability it needs (see
//! [`crate::core::env`]) so it can run against a real [`BuildEnv`] or a test
//! double.
//!
//! [`BuildEnv`]: crate::core::env::BuildEnv

pub mod compiler;
pub mod git;
pub mod sources;
pub mod version_file;
pub mod warnings;

pub use compiler::{
    detect_compiler_family, get_compiler_version, using_clang, using_emcc, using_gcc,
    CompilerFamily, CompilerVersion,
};
pub use git::{get_git_folder, get_version_hash, read_first_line, resolve_version_hash, HashResolution};
pub use sources::{add_source_files, SourceFiles, SourceReport};
pub use version_file::{
    add_module_version_string, get_build_name, write_version_file, write_version_hash_file,
    VersionFileWriter,
};
pub use warnings::disable_warnings;
