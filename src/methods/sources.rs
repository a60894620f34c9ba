//! Registering source files with a build.

use std::path::{Path, PathBuf};

use crate::core::env::{BuildObject, ObjectFactory, PathResolver};
use crate::util::diagnostic::{suggestions, Diagnostic, SourceFileError};
use crate::util::fs::{clean_path, glob_files, has_glob_meta, relative_path};

/// Files handed to [`add_source_files`]: one path or pattern, or a list of
/// paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFiles {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for SourceFiles {
    fn from(value: &str) -> Self {
        SourceFiles::Single(value.to_string())
    }
}

impl From<String> for SourceFiles {
    fn from(value: String) -> Self {
        SourceFiles::Single(value)
    }
}

impl From<Vec<String>> for SourceFiles {
    fn from(value: Vec<String>) -> Self {
        SourceFiles::Many(value)
    }
}

impl From<Vec<&str>> for SourceFiles {
    fn from(value: Vec<&str>) -> Self {
        SourceFiles::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for SourceFiles {
    fn from(value: &[&str]) -> Self {
        SourceFiles::Many(value.iter().map(|s| s.to_string()).collect())
    }
}

/// What [`add_source_files`] did to the source list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    /// Number of objects appended
    pub added: usize,
    /// Objects skipped because an equal one was already registered
    pub duplicates: Vec<BuildObject>,
}

impl SourceReport {
    /// Duplicate warnings as diagnostics, paths shown relative to `root`.
    pub fn diagnostics(&self, root: &Path) -> Vec<Diagnostic> {
        self.duplicates
            .iter()
            .map(|obj| {
                Diagnostic::warning(duplicate_message(&relative_path(root, obj.target())))
                    .with_location(obj.source())
                    .with_suggestion(suggestions::DUPLICATE_SOURCE)
            })
            .collect()
    }
}

fn duplicate_message(object: &Path) -> String {
    format!(
        "Object \"{}\" already included in environment sources.",
        object.display()
    )
}

/// Turn `files` into absolute source paths.
fn expand<E: PathResolver>(env: &E, files: SourceFiles) -> Result<Vec<PathBuf>, SourceFileError> {
    match files {
        SourceFiles::Single(path) if path.starts_with('#') => {
            if has_glob_meta(&path) {
                return Err(SourceFileError::ProjectAbsoluteWildcard { path });
            }
            Ok(vec![env.abspath(&path)])
        }
        SourceFiles::Single(pattern) if has_glob_meta(&pattern) => {
            let matches =
                glob_files(env.build_dir(), &pattern).map_err(|e| SourceFileError::InvalidPattern {
                    pattern: pattern.clone(),
                    reason: format!("{:#}", e),
                })?;
            Ok(matches.into_iter().map(|p| clean_path(&p)).collect())
        }
        SourceFiles::Single(path) => Ok(vec![env.abspath(&path)]),
        SourceFiles::Many(paths) => Ok(paths.iter().map(|p| env.abspath(p)).collect()),
    }
}

/// Add `files` to `sources` as build objects of `env`.
///
/// Objects already present in `sources` are skipped and listed in the
/// returned report; render them with [`SourceReport::diagnostics`]. A
/// wildcard on a `#` project-absolute path is rejected before anything is
/// added.
pub fn add_source_files<E>(
    env: &E,
    sources: &mut Vec<BuildObject>,
    files: impl Into<SourceFiles>,
) -> Result<SourceReport, SourceFileError>
where
    E: PathResolver + ObjectFactory,
{
    let paths = expand(env, files.into())?;

    let mut report = SourceReport::default();
    for path in paths {
        let obj = env.object(&path);
        if sources.contains(&obj) {
            tracing::debug!("skipping duplicate object {}", obj);
            report.duplicates.push(obj);
            continue;
        }
        sources.push(obj);
        report.added += 1;
    }

    Ok(report)
}
