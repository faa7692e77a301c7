/*!
# Line Sources

The I/O boundary of the pipeline. A [`LineSource`] is an ordered sequence of
text lines with a known line count and a known byte size, so the validator and
aggregator can run against files and in-memory text alike.
*/

use crate::errors::{RecordsError, RecordsResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One physical line of a source. `index` is 1-based and counts blank lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub index: usize,
    pub text: &'a str,
}

/// Fully loaded, immutable line-oriented source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSource {
    name: String,
    lines: Vec<String>,
    byte_len: u64,
}

impl LineSource {
    /// Build a source from in-memory text. `name` is used in error messages.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self {
            name: name.into(),
            lines: split_lines(text),
            byte_len: text.len() as u64,
        }
    }

    /// Load a UTF-8 text file.
    ///
    /// Missing files, permission problems and directories map to their own
    /// [`RecordsError`] variants; anything else is `SourceIo`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> RecordsResult<Self> {
        let path = path.as_ref();

        let metadata = fs::metadata(path).map_err(|e| RecordsError::from_source_io(path, e))?;
        if metadata.is_dir() {
            return Err(RecordsError::SourceIsNotAFile(path.display().to_string()));
        }

        let text = fs::read_to_string(path).map_err(|e| RecordsError::from_source_io(path, e))?;
        let source = Self::from_text(path.display().to_string(), &text);
        debug!(
            source = source.name(),
            lines = source.line_count(),
            bytes = source.byte_len(),
            "Source loaded"
        );

        Ok(source)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }

    /// A zero-byte source. Distinct from a source holding only blank lines.
    pub fn is_empty(&self) -> bool {
        self.byte_len == 0
    }

    pub fn lines(&self) -> impl Iterator<Item = RawLine<'_>> {
        self.lines.iter().enumerate().map(|(i, text)| RawLine {
            index: i + 1,
            text: text.as_str(),
        })
    }
}

// "a\n" is one line, "a\n\n" is two, "\n" is a single blank line.
fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
