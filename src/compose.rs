//! Output composition: streaming placeholder substitution
//!
//! The composer re-walks the template after validation and writes the output
//! incrementally: text outside placeholders passes through byte-for-byte, and
//! each placeholder occurrence is replaced by the full contents of its bound
//! file, streamed straight from disk.

use std::fs::File;
use std::io::{self, Write};

use thiserror::Error;

use crate::bindings::Binding;
use crate::syntax::Matcher;

/// Errors that can occur while composing output
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("i/o error while composing output: {0}")]
    Io(#[from] io::Error),

    /// A matched placeholder had no binding. Validation rules this out;
    /// hitting it means scanning and composition disagreed on the template.
    #[error("placeholder has no binding: '{name}'")]
    UnboundPlaceholder { name: String },
}

/// Substitute every placeholder occurrence and write the result to `out`
///
/// The template is processed line by line, each line keeping its original
/// terminator. Within a line, matches are handled left to right: the text
/// before the match is emitted, the bound file's contents are streamed in
/// verbatim, and the cursor advances past the matched delimiter text. Text
/// after the last match, and lines with no match at all, are emitted
/// unchanged. Each bound file is opened, streamed, and closed per occurrence;
/// nothing is cached across occurrences.
pub fn compose<W: Write>(
    template: &str,
    bindings: &[Binding],
    matcher: &Matcher,
    out: &mut W,
) -> Result<(), ComposeError> {
    for line in template.split_inclusive('\n') {
        let mut cursor = 0;
        for m in matcher.occurrences(line) {
            out.write_all(line[cursor..m.start].as_bytes())?;
            let binding = bindings
                .iter()
                .find(|b| b.name == m.name)
                .ok_or_else(|| ComposeError::UnboundPlaceholder {
                    name: m.name.to_string(),
                })?;
            let mut source = File::open(&binding.path)?;
            io::copy(&mut source, out)?;
            cursor = m.end;
        }
        out.write_all(line[cursor..].as_bytes())?;
    }
    Ok(())
}
