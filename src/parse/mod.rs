//! Readers for the text formats ordinations and sample metadata usually come in.

pub mod metadata;
pub mod ordination;

use std::num::{ParseFloatError, ParseIntError};

use crate::table::TableError;

/// Result type for the readers in this module.
pub type ParseResult<T> = Result<T, ParseError>;

/// Describes what went wrong while reading a document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The document contains no data at all.
    #[error("document is empty")]
    Empty,
    /// A section header was expected but something else was found.
    #[error("line {line}: expected section `{expected}`, found `{found}`")]
    UnexpectedSection {
        line: usize,
        expected: &'static str,
        found: String,
    },
    /// The document ended in the middle of a section.
    #[error("unexpected end of document while reading `{section}`")]
    UnexpectedEof { section: &'static str },
    /// A section header does not declare the expected shape.
    #[error("line {line}: malformed header `{header}`")]
    MalformedHeader { line: usize, header: String },
    /// A shape count in a header is not an integer.
    #[error("line {line}: invalid count: {source}")]
    Count {
        line: usize,
        #[source]
        source: ParseIntError,
    },
    /// A row holds a different number of fields than declared.
    #[error("line {line}: expected {expected} values, found {found}")]
    ValueCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric field could not be converted.
    #[error("line {line}: invalid number `{value}`: {source}")]
    Number {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },
    /// The parsed rows do not form a valid table.
    #[error("invalid table: {0}")]
    Table(#[from] TableError),
}

/// Split a tab-separated line, dropping a trailing carriage return.
fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches('\r').split('\t')
}

/// Line-number aware cursor over a document. Line numbers are 1-based.
struct Cursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate(),
        }
    }

    /// Next line that is not blank.
    fn next_nonblank(&mut self) -> Option<(usize, &'a str)> {
        self.lines
            .by_ref()
            .find(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| (idx + 1, line))
    }

    /// Next line, blank or not; running out of input is an error.
    fn next_in(&mut self, section: &'static str) -> ParseResult<(usize, &'a str)> {
        self.lines
            .next()
            .map(|(idx, line)| (idx + 1, line))
            .ok_or(ParseError::UnexpectedEof { section })
    }
}

fn parse_number(line: usize, value: &str) -> ParseResult<f64> {
    let trimmed = value.trim();
    trimmed.parse::<f64>().map_err(|source| ParseError::Number {
        line,
        value: trimmed.to_owned(),
        source,
    })
}
