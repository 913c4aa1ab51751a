//! Placeholder discovery over template text

use crate::syntax::Matcher;

/// Collect every placeholder name in the template, in document order
///
/// The template is walked line by line, applying the matcher to each line and
/// appending captured names left to right. Duplicate names are preserved here;
/// rejecting them is a validation concern, not a scanning one. An empty result
/// (a template with no placeholders) is likewise reported downstream.
pub fn scan(template: &str, matcher: &Matcher) -> Vec<String> {
    let mut names = Vec::new();
    for line in template.lines() {
        names.extend(matcher.occurrences(line).map(|m| m.name.to_string()));
    }
    names
}
