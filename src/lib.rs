//! Templately - file content injection into text templates
//!
//! A template marks insertion points with delimited placeholders such as
//! `{{ ty.header }}`; each `name=file` binding names the file whose contents
//! replace the matching placeholder. The pipeline compiles the delimiter
//! syntax into a matcher, scans the template for placeholder names, validates
//! the bindings against them, and streams a substituted copy to the output
//! file.
//!
//! # Example
//!
//! ```rust
//! use templately::{scan, PlaceholderSyntax};
//!
//! let matcher = PlaceholderSyntax::default().compile().unwrap();
//! let names = scan("hello {{ ty.name }}, from {{ ty.sender }}\n", &matcher);
//! assert_eq!(names, vec!["name", "sender"]);
//! ```

pub mod bindings;
pub mod compose;
pub mod scan;
pub mod syntax;

pub use bindings::{validate, Binding, ValidationError, ValidationOutcome};
pub use compose::{compose, ComposeError};
pub use scan::scan;
pub use syntax::{Matcher, PlaceholderMatch, PlaceholderSyntax, SyntaxError};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during the injection pipeline
#[derive(Debug, Error)]
pub enum InjectError {
    /// The delimiter syntax could not be loaded or compiled
    #[error("invalid placeholder syntax: {0}")]
    Syntax(#[from] SyntaxError),

    /// One or more validation checks failed; no output was produced
    #[error("placeholder validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    /// Error while substituting placeholders
    #[error("failed to compose output: {0}")]
    Compose(#[from] ComposeError),

    /// Error creating or flushing the output file
    #[error("output file error: {0}")]
    Output(#[source] io::Error),
}

impl From<Vec<ValidationError>> for InjectError {
    fn from(errors: Vec<ValidationError>) -> Self {
        InjectError::Validation(errors)
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration for the complete injection pipeline
#[derive(Debug, Clone)]
pub struct InjectConfig {
    /// Delimiter syntax used to recognize placeholders
    pub syntax: PlaceholderSyntax,
    /// Suppress validation diagnostics on stderr; the returned result still
    /// carries every error
    pub quiet: bool,
    /// Debug mode: print the compiled pattern and discovered placeholders
    pub debug: bool,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            syntax: PlaceholderSyntax::default(),
            quiet: false,
            debug: false,
        }
    }
}

impl InjectConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the delimiter syntax
    pub fn with_syntax(mut self, syntax: PlaceholderSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Enable or disable quiet mode
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Enable or disable debug output
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Inject bound file contents into `template`, writing the result to `output`
///
/// Convenience wrapper over [`inject_with_config`] with the default syntax.
pub fn inject(template: &str, raw_bindings: &[String], output: &Path) -> Result<(), InjectError> {
    inject_with_config(template, raw_bindings, output, &InjectConfig::default())
}

/// Inject bound file contents into `template` with a custom configuration
///
/// Runs the full pipeline: compile the syntax, scan the template for
/// placeholder names, validate the raw bindings against them, and only then
/// open the output file and compose into it. On validation failure every
/// collected error is reported on stderr (unless quiet) and returned; the
/// output file is not created or touched, so no partial output ever exists.
pub fn inject_with_config(
    template: &str,
    raw_bindings: &[String],
    output: &Path,
    config: &InjectConfig,
) -> Result<(), InjectError> {
    let matcher = config.syntax.compile()?;
    if config.debug {
        eprintln!("compiled placeholder pattern: {}", matcher.pattern());
    }

    let names = scan(template, &matcher);
    if config.debug {
        eprintln!("template placeholders: {names:?}");
    }

    let outcome = validate(raw_bindings, &names);
    if !outcome.is_valid() {
        if !config.quiet {
            for error in &outcome.errors {
                eprintln!("{error}");
            }
        }
        return Err(outcome.errors.into());
    }

    let file = File::create(output).map_err(InjectError::Output)?;
    let mut out = BufWriter::new(file);
    compose(template, &outcome.bindings, &matcher, &mut out)?;
    out.flush().map_err(InjectError::Output)?;

    Ok(())
}
