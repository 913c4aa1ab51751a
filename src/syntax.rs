//! Placeholder syntax and the compiled matcher
//!
//! A placeholder is written as `opening-tag name-prefix name closing-tag`,
//! e.g. `{{ ty.header }}` with the default syntax. The delimiter triple is
//! configurable per run, either from CLI flags or from a TOML syntax file,
//! and compiles into a single [`Matcher`] used for both scanning and
//! composition.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

/// Default opening tag
pub const DEFAULT_OPENING_TAG: &str = "{{";
/// Default name prefix
pub const DEFAULT_NAME_PREFIX: &str = "ty.";
/// Default closing tag
pub const DEFAULT_CLOSING_TAG: &str = "}}";

/// Errors that can occur when loading or compiling a placeholder syntax
#[derive(Error, Debug)]
pub enum SyntaxError {
    #[error("Failed to read syntax file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse syntax TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to compile placeholder pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// The delimiter triple defining how placeholders are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSyntax {
    /// Literal text opening a placeholder
    pub opening_tag: String,
    /// Literal prefix in front of the placeholder name
    pub name_prefix: String,
    /// Literal text closing a placeholder
    pub closing_tag: String,
}

/// TOML structure for deserializing syntax files
#[derive(Deserialize)]
struct TomlSyntax {
    delimiters: Option<TomlDelimiters>,
}

#[derive(Deserialize, Default)]
struct TomlDelimiters {
    #[serde(rename = "opening-tag")]
    opening_tag: Option<String>,
    #[serde(rename = "name-prefix")]
    name_prefix: Option<String>,
    #[serde(rename = "closing-tag")]
    closing_tag: Option<String>,
}

impl Default for PlaceholderSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_OPENING_TAG, DEFAULT_NAME_PREFIX, DEFAULT_CLOSING_TAG)
    }
}

impl PlaceholderSyntax {
    /// Create a syntax from an explicit delimiter triple
    pub fn new(
        opening_tag: impl Into<String>,
        name_prefix: impl Into<String>,
        closing_tag: impl Into<String>,
    ) -> Self {
        Self {
            opening_tag: opening_tag.into(),
            name_prefix: name_prefix.into(),
            closing_tag: closing_tag.into(),
        }
    }

    /// Load a syntax from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SyntaxError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a syntax from a TOML string
    ///
    /// Fields absent from the `[delimiters]` table fall back to the defaults.
    pub fn from_str(content: &str) -> Result<Self, SyntaxError> {
        let parsed: TomlSyntax = toml::from_str(content)?;
        let delimiters = parsed.delimiters.unwrap_or_default();

        Ok(Self {
            opening_tag: delimiters
                .opening_tag
                .unwrap_or_else(|| DEFAULT_OPENING_TAG.to_string()),
            name_prefix: delimiters
                .name_prefix
                .unwrap_or_else(|| DEFAULT_NAME_PREFIX.to_string()),
            closing_tag: delimiters
                .closing_tag
                .unwrap_or_else(|| DEFAULT_CLOSING_TAG.to_string()),
        })
    }

    /// Compile the triple into a matcher
    ///
    /// All three delimiter strings are escaped so characters special to the
    /// regex language match literally. The name capture is non-greedy so a
    /// line holding several placeholders yields one match per placeholder
    /// instead of one match spanning from the first opening tag to the last
    /// closing tag.
    pub fn compile(&self) -> Result<Matcher, SyntaxError> {
        let pattern = format!(
            r"{}\s*{}(.*?)\s*{}",
            regex::escape(&self.opening_tag),
            regex::escape(&self.name_prefix),
            regex::escape(&self.closing_tag),
        );
        Ok(Matcher {
            pattern: Regex::new(&pattern)?,
        })
    }
}

/// A compiled placeholder matcher
#[derive(Debug, Clone)]
pub struct Matcher {
    pattern: Regex,
}

/// One placeholder occurrence within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch<'t> {
    /// Byte offset of the opening tag within the line
    pub start: usize,
    /// Byte offset just past the closing tag
    pub end: usize,
    /// The captured placeholder name
    pub name: &'t str,
}

impl Matcher {
    /// Iterate the non-overlapping placeholder occurrences in a line,
    /// left to right
    pub fn occurrences<'t>(&'t self, line: &'t str) -> impl Iterator<Item = PlaceholderMatch<'t>> {
        self.pattern.captures_iter(line).filter_map(|caps| {
            let span = caps.get(0)?;
            let name = caps.get(1)?;
            Some(PlaceholderMatch {
                start: span.start(),
                end: span.end(),
                name: name.as_str(),
            })
        })
    }

    /// The underlying pattern text, for debug output
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}
