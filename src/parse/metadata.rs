//! Reader for tab-separated sample metadata (QIIME-style mapping files).
//!
//! The first non-blank line is the header. Its first field names the
//! identifier column and may carry a leading `#` (as in `#SampleID`). Any
//! later line starting with `#` is a comment. Every data row must have as
//! many fields as the header.

use super::{Cursor, ParseError, ParseResult, fields};
use crate::table::{MetadataFrame, MetadataTable};

const SECTION: &str = "metadata";

/// Read a metadata document into table-form metadata.
pub fn parse_str(input: &str) -> ParseResult<MetadataTable> {
    let mut cursor = Cursor::new(input);
    let (header_line, header) = cursor.next_nonblank().ok_or(ParseError::Empty)?;

    let header: Vec<&str> = fields(header).map(str::trim).collect();
    if header.len() < 2 {
        return Err(ParseError::MalformedHeader {
            line: header_line,
            header: header.join("\t"),
        });
    }
    let mut frame = MetadataFrame::new(header[1..].iter().copied())?;

    let mut skipped = 0_usize;
    while let Some((line, text)) = cursor.next_nonblank() {
        if text.starts_with('#') {
            skipped += 1;
            continue;
        }
        let raw: Vec<&str> = fields(text).map(str::trim).collect();
        if raw.len() != header.len() {
            return Err(ParseError::ValueCount {
                line,
                expected: header.len(),
                found: raw.len(),
            });
        }
        let values = raw[1..].iter().map(|value| (*value).to_owned()).collect();
        frame.insert(raw[0], values)?;
    }

    if frame.is_empty() {
        log::warn!("{SECTION} document has a header but no rows");
    }
    log::debug!(
        "read {} {SECTION} rows with {} columns ({skipped} comment lines)",
        frame.len(),
        frame.columns().len()
    );
    Ok(MetadataTable::Table(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;

    const MAPPING: &str = "#SampleID\tTreatment\tDOB\n\
                           # mice sampled at the same facility\n\
                           PC.354\tControl\t20061218\n\
                           PC.607\tFast\t20071112\n\
                           \n";

    #[test]
    fn parses_header_rows_and_comments() {
        let MetadataTable::Table(frame) = parse_str(MAPPING).unwrap() else {
            panic!("expected table-form metadata");
        };
        assert_eq!(frame.columns(), &["Treatment".to_owned(), "DOB".to_owned()]);
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.value("PC.607", "Treatment"), Ok(Some("Fast")));
        assert_eq!(frame.value("PC.354", "DOB"), Ok(Some("20061218")));
    }

    #[test]
    fn header_needs_a_column() {
        assert!(matches!(
            parse_str("#SampleID\nPC.354\n"),
            Err(ParseError::MalformedHeader { line: 1, .. })
        ));
        assert!(matches!(parse_str("\n\n"), Err(ParseError::Empty)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let input = "#SampleID\tTreatment\tDOB\nPC.354\tControl\n";
        assert!(matches!(
            parse_str(input),
            Err(ParseError::ValueCount {
                line: 2,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn duplicate_samples_are_rejected() {
        let input = "#SampleID\tTreatment\nPC.354\tControl\nPC.354\tFast\n";
        assert!(matches!(
            parse_str(input),
            Err(ParseError::Table(TableError::DuplicateIdentifier(_)))
        ));
    }
}
