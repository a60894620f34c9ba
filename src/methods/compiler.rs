//! Compiler family detection from the environment.

use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::Result;
use regex::Regex;
use serde::Serialize;

use crate::core::env::FlagStore;
use crate::util::process::ProcessBuilder;

/// The family of the active C/C++ compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerFamily {
    /// GCC (GNU Compiler Collection)
    Gcc,
    /// Clang/LLVM
    Clang,
    /// Emscripten
    Emcc,
    /// Microsoft Visual C++
    Msvc,
    /// Anything else, or no `CC` at all
    Unknown,
}

impl CompilerFamily {
    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerFamily::Gcc => "gcc",
            CompilerFamily::Clang => "clang",
            CompilerFamily::Emcc => "emcc",
            CompilerFamily::Msvc => "msvc",
            CompilerFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CompilerFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `CC` is exactly `clang`.
pub fn using_clang<E: FlagStore + ?Sized>(env: &E) -> bool {
    env.get_str("CC") == Some("clang")
}

/// `CC` is exactly `gcc`.
pub fn using_gcc<E: FlagStore + ?Sized>(env: &E) -> bool {
    env.get_str("CC") == Some("gcc")
}

/// `CC` names the Emscripten driver.
pub fn using_emcc<E: FlagStore + ?Sized>(env: &E) -> bool {
    env.get_str("CC").is_some_and(|cc| cc.contains("emcc"))
}

/// Classify the compiler. The `msvc` toggle wins over `CC`.
pub fn detect_compiler_family<E: FlagStore + ?Sized>(env: &E) -> CompilerFamily {
    if env.is_msvc() {
        CompilerFamily::Msvc
    } else if using_clang(env) {
        CompilerFamily::Clang
    } else if using_gcc(env) {
        CompilerFamily::Gcc
    } else if using_emcc(env) {
        CompilerFamily::Emcc
    } else {
        CompilerFamily::Unknown
    }
}

/// Numeric compiler version reported by `--version`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct CompilerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for CompilerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:version\s+|\)\s+|^\S+\s+)(\d+)\.(\d+)(?:\.(\d+))?").expect("valid regex")
});

/// Extract the version from the first line of `--version` output.
pub fn parse_compiler_version(output: &str) -> Option<CompilerVersion> {
    let first_line = output.lines().next()?;
    let caps = VERSION_RE.captures(first_line)?;
    let number = |i: usize| -> Option<u32> { caps.get(i).and_then(|m| m.as_str().parse().ok()) };

    Some(CompilerVersion {
        major: number(1)?,
        minor: number(2)?,
        patch: number(3).unwrap_or(0),
    })
}

/// Run `<program> --version` and parse the result.
///
/// `Ok(None)` means the program ran but printed nothing recognizable.
pub fn get_compiler_version(program: &Path) -> Result<Option<CompilerVersion>> {
    let output = ProcessBuilder::new(program).arg("--version").exec_and_check()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = parse_compiler_version(&stdout);
    tracing::debug!("{} --version -> {:?}", program.display(), version);
    Ok(version)
}
