//! User-friendly diagnostic messages.
//!
//! Build helpers report problems advisorily: a duplicate source is a
//! warning, a bad wildcard path is an error that aborts just that call.
//! Both render through [`Diagnostic`] so scripts see one consistent format.

use std::fmt;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a wildcard is used on a project-absolute path.
    pub const PROJECT_ABSOLUTE_WILDCARD: &str =
        "help: List the files explicitly, or call from the directory and use a relative pattern";

    /// Suggestion when a source is registered twice.
    pub const DUPLICATE_SOURCE: &str =
        "help: Remove the second registration or exclude the file from the wildcard";

    /// Suggestion when no version config is found.
    pub const NO_CONFIG: &str = "help: Add a [version] table to buildenv.toml";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    fn with_severity(message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            message: message.into(),
            severity,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Warning)
    }

    /// Create a new note diagnostic.
    pub fn note(message: impl Into<String>) -> Self {
        Self::with_severity(message, Severity::Note)
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m".to_string(),
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m".to_string(),
                Severity::Note => "\x1b[1;36mnote\x1b[0m".to_string(),
            }
        } else {
            self.severity.to_string()
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        for suggestion in &self.suggestions {
            output.push_str(&format!("  {}\n", suggestion));
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Errors raised while registering source files.
#[derive(Debug, Error, MietteDiagnostic, Clone, PartialEq, Eq)]
pub enum SourceFileError {
    /// Wildcards cannot be expanded on `#`-rooted paths.
    #[error("Wildcards can't be expanded in project-absolute path: '{path}'")]
    #[diagnostic(
        code(buildenv::sources::project_absolute_wildcard),
        help("List the files explicitly, or use a pattern relative to the build directory")
    )]
    ProjectAbsoluteWildcard { path: String },

    /// A relative pattern could not be parsed by the glob engine.
    #[error("invalid source pattern '{pattern}': {reason}")]
    #[diagnostic(code(buildenv::sources::invalid_pattern))]
    InvalidPattern { pattern: String, reason: String },
}

impl SourceFileError {
    /// Render as a user-facing diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string());
        match self {
            SourceFileError::ProjectAbsoluteWildcard { .. } => {
                diag.with_suggestion(suggestions::PROJECT_ABSOLUTE_WILDCARD)
            }
            SourceFileError::InvalidPattern { .. } => diag,
        }
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
