//! Reader for ordination results in the scikit-bio text format.
//!
//! The document is a sequence of tab-separated sections, each introduced by
//! a header line that carries the section shape, separated by blank lines:
//!
//! ```text
//! Eigvals<TAB>n
//! Proportion explained<TAB>n
//! Species<TAB>rows<TAB>cols
//! Site<TAB>rows<TAB>cols
//! Biplot<TAB>rows<TAB>cols
//! Site constraints<TAB>rows<TAB>cols
//! ```
//!
//! Vector sections hold a single line of `n` values (absent when `n` is 0).
//! `Species`, `Site` and `Site constraints` rows start with an identifier;
//! `Biplot` rows do not.

use super::{Cursor, ParseError, ParseResult, fields, parse_number};
use crate::table::{Labeled, SampleTable};

const EIGVALS: &str = "Eigvals";
const PROPORTION_EXPLAINED: &str = "Proportion explained";
const SPECIES: &str = "Species";
const SITE: &str = "Site";
const BIPLOT: &str = "Biplot";
const SITE_CONSTRAINTS: &str = "Site constraints";

/// Contents of an ordination results document.
#[derive(Debug, Clone, PartialEq)]
pub struct OrdinationResults {
    pub eigvals: Vec<f64>,
    pub proportion_explained: Vec<f64>,
    /// Feature (species) coordinates.
    pub features: Labeled<Vec<f64>>,
    /// Sample (site) coordinates.
    pub samples: SampleTable,
    pub biplot: Vec<Vec<f64>>,
    pub sample_constraints: Labeled<Vec<f64>>,
}

/// Read an ordination results document.
pub fn parse_str(input: &str) -> ParseResult<OrdinationResults> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }
    let mut cursor = Cursor::new(input);

    log::debug!("reading ordination results");
    let eigvals = read_vector(&mut cursor, EIGVALS)?;
    let proportion_explained = read_vector(&mut cursor, PROPORTION_EXPLAINED)?;
    let features = read_labeled_matrix(&mut cursor, SPECIES)?;
    let sites = read_labeled_matrix(&mut cursor, SITE)?;
    let biplot = read_matrix(&mut cursor, BIPLOT)?;
    let sample_constraints = read_labeled_matrix(&mut cursor, SITE_CONSTRAINTS)?;

    let samples = SampleTable::from_rows(sites.iter().map(|(id, row)| (id, row.clone())))?;
    log::debug!(
        "read {} samples with {} dimensions, {} eigenvalues",
        samples.len(),
        samples.dimensions(),
        eigvals.len()
    );

    Ok(OrdinationResults {
        eigvals,
        proportion_explained,
        features,
        samples,
        biplot,
        sample_constraints,
    })
}

/// Parse the header of `section` and return its declared shape.
fn read_header<const N: usize>(
    cursor: &mut Cursor<'_>,
    section: &'static str,
) -> ParseResult<[usize; N]> {
    let (line, header) = cursor
        .next_nonblank()
        .ok_or(ParseError::UnexpectedEof { section })?;
    let mut parts = fields(header);
    let name = parts.next().unwrap_or_default().trim();
    if name != section {
        return Err(ParseError::UnexpectedSection {
            line,
            expected: section,
            found: name.to_owned(),
        });
    }

    let counts = parts
        .map(|count| {
            count
                .trim()
                .parse::<usize>()
                .map_err(|source| ParseError::Count { line, source })
        })
        .collect::<ParseResult<Vec<usize>>>()?;
    counts
        .try_into()
        .map_err(|_| ParseError::MalformedHeader {
            line,
            header: header.to_owned(),
        })
}

fn read_values(line: usize, raw: &[&str], expected: usize) -> ParseResult<Vec<f64>> {
    if raw.len() != expected {
        return Err(ParseError::ValueCount {
            line,
            expected,
            found: raw.len(),
        });
    }
    raw.iter().map(|value| parse_number(line, value)).collect()
}

fn read_vector(cursor: &mut Cursor<'_>, section: &'static str) -> ParseResult<Vec<f64>> {
    let [len] = read_header::<1>(cursor, section)?;
    if len == 0 {
        return Ok(Vec::new());
    }
    let (line, text) = cursor.next_in(section)?;
    let raw: Vec<&str> = fields(text).collect();
    read_values(line, &raw, len)
}

fn read_labeled_matrix(
    cursor: &mut Cursor<'_>,
    section: &'static str,
) -> ParseResult<Labeled<Vec<f64>>> {
    let [rows, cols] = read_header::<2>(cursor, section)?;
    let mut matrix = Labeled::new();
    for _ in 0..rows {
        let (line, text) = cursor.next_in(section)?;
        let raw: Vec<&str> = fields(text).collect();
        let Some((id, values)) = raw.split_first() else {
            return Err(ParseError::ValueCount {
                line,
                expected: cols + 1,
                found: 0,
            });
        };
        let values = read_values(line, values, cols)?;
        matrix.insert(id.trim(), values)?;
    }
    Ok(matrix)
}

fn read_matrix(cursor: &mut Cursor<'_>, section: &'static str) -> ParseResult<Vec<Vec<f64>>> {
    let [rows, cols] = read_header::<2>(cursor, section)?;
    (0..rows)
        .map(|_| {
            let (line, text) = cursor.next_in(section)?;
            let raw: Vec<&str> = fields(text).collect();
            read_values(line, &raw, cols)
        })
        .collect()
}
