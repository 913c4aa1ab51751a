//! Binding parsing and placeholder validation
//!
//! A binding is a raw `name=path` argument associating a template placeholder
//! with the file whose contents replace it. Validation cross-checks the parsed
//! bindings against the names scanned from the template and accumulates every
//! failure instead of stopping at the first, so a single run surfaces every
//! problem with the invocation.

use std::collections::HashSet;
use std::path::PathBuf;

use thiserror::Error;

/// Separator between the name and the path in a raw binding argument
pub const SEPARATOR: char = '=';

/// A single failed validation check
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no placeholder bindings were supplied")]
    NoBindings,

    /// The raw argument did not contain exactly one separator
    #[error("malformed binding (use one '=' per binding): '{raw}'")]
    MalformedBinding { raw: String },

    /// The bound path does not exist or is not a regular file
    #[error("file to inject does not exist: '{name}={path}'")]
    FileNotFound { name: String, path: String },

    #[error("template has no placeholders")]
    NoPlaceholders,

    #[error("binding name appears more than once: '{name}'")]
    DuplicateBinding { name: String },

    #[error("template placeholder appears more than once: '{name}'")]
    DuplicateTemplatePlaceholder { name: String },

    /// The binding name set and the template placeholder name set differ
    #[error("bindings do not match template placeholders: {}", mismatch_summary(.missing, .unexpected))]
    NameSetMismatch {
        /// Template placeholders with no binding
        missing: Vec<String>,
        /// Bindings with no template placeholder
        unexpected: Vec<String>,
    },
}

fn mismatch_summary(missing: &[String], unexpected: &[String]) -> String {
    let mut parts = Vec::new();
    if !missing.is_empty() {
        parts.push(format!("unbound placeholders [{}]", missing.join(", ")));
    }
    if !unexpected.is_empty() {
        parts.push(format!("bindings without placeholder [{}]", unexpected.join(", ")));
    }
    parts.join(", ")
}

/// A parsed placeholder binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Placeholder name this binding supplies
    pub name: String,
    /// File whose contents replace the placeholder
    pub path: PathBuf,
}

impl Binding {
    /// Parse a raw `name=path` argument
    ///
    /// Exactly one separator is required; zero or several is a malformed
    /// binding. Name and path may each be empty at this stage, in which case
    /// the file-existence check fails later.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let mut parts = raw.split(SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(path), None) => Ok(Self {
                name: name.to_string(),
                path: PathBuf::from(path),
            }),
            _ => Err(ValidationError::MalformedBinding {
                raw: raw.to_string(),
            }),
        }
    }
}

/// Result of validating raw bindings against template placeholder names
#[derive(Debug, Default)]
pub struct ValidationOutcome {
    /// Successfully parsed bindings, in argument order. Populated even when
    /// the outcome as a whole is invalid, for diagnostic comparison.
    pub bindings: Vec<Binding>,
    /// Every failed check, in detection order
    pub errors: Vec<ValidationError>,
}

impl ValidationOutcome {
    /// True when every check passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Names of the successfully parsed bindings, in argument order
    pub fn names(&self) -> Vec<&str> {
        self.bindings.iter().map(|b| b.name.as_str()).collect()
    }
}

/// Validate raw binding arguments against the template's placeholder names
///
/// Checks, each recorded independently:
/// - at least one binding was supplied
/// - every binding has exactly one separator
/// - every bound path is an existing regular file
/// - the template has at least one placeholder
/// - no name is bound twice, no placeholder occurs twice in the template
/// - the binding name set equals the template name set
pub fn validate(raw_bindings: &[String], template_names: &[String]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    if raw_bindings.is_empty() {
        outcome.errors.push(ValidationError::NoBindings);
    }

    for raw in raw_bindings {
        match Binding::parse(raw) {
            Ok(binding) => {
                if !binding.path.is_file() {
                    outcome.errors.push(ValidationError::FileNotFound {
                        name: binding.name.clone(),
                        path: binding.path.display().to_string(),
                    });
                }
                outcome.bindings.push(binding);
            }
            Err(err) => outcome.errors.push(err),
        }
    }

    if template_names.is_empty() {
        outcome.errors.push(ValidationError::NoPlaceholders);
    }

    for name in duplicate_names(outcome.bindings.iter().map(|b| b.name.as_str())) {
        outcome.errors.push(ValidationError::DuplicateBinding { name });
    }
    for name in duplicate_names(template_names.iter().map(|s| s.as_str())) {
        outcome
            .errors
            .push(ValidationError::DuplicateTemplatePlaceholder { name });
    }

    let bound: HashSet<&str> = outcome.bindings.iter().map(|b| b.name.as_str()).collect();
    let wanted: HashSet<&str> = template_names.iter().map(|s| s.as_str()).collect();
    if bound != wanted {
        let mut missing: Vec<String> = wanted.difference(&bound).map(|s| s.to_string()).collect();
        let mut unexpected: Vec<String> = bound.difference(&wanted).map(|s| s.to_string()).collect();
        missing.sort();
        unexpected.sort();
        outcome
            .errors
            .push(ValidationError::NameSetMismatch { missing, unexpected });
    }

    outcome
}

/// Names occurring more than once, reported once each, in first-seen order
fn duplicate_names<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates: Vec<String> = Vec::new();
    for name in names {
        if !seen.insert(name) && !duplicates.iter().any(|d| d.as_str() == name) {
            duplicates.push(name.to_string());
        }
    }
    duplicates
}
