//! Labeled, insertion-ordered tables keyed by sample identifier.
//!
//! These replace dataframes: the only operations needed are identifier
//! lookups, restriction to a set of identifiers and row slicing, so every
//! table is a row vector plus an identifier index.

mod labeled;
mod metadata;
mod samples;

pub use labeled::Labeled;
pub use metadata::{MetadataFrame, MetadataTable};
pub use samples::{SPATIAL_DIMENSIONS, SampleTable};

/// Errors raised while building or querying a table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("identifier `{0}` appears more than once")]
    DuplicateIdentifier(String),
    #[error("identifier `{0}` not found")]
    MissingIdentifier(String),
    #[error("coordinates need at least 3 dimensions, got {provided}")]
    TooFewDimensions { provided: usize },
    #[error("row `{id}` has {provided} values, expected {expected}")]
    RowWidthMismatch {
        id: String,
        expected: usize,
        provided: usize,
    },
    #[error("row `{id}` has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },
    #[error("column `{0}` appears more than once")]
    DuplicateColumn(String),
}
