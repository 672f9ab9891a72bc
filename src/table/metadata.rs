use super::{Labeled, TableError};

/// Categorical metadata with named columns, one row of values per sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataFrame {
    columns: Vec<String>,
    rows: Labeled<Vec<String>>,
}

impl MetadataFrame {
    pub fn new<I, S>(columns: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for column in columns {
            let column = column.into();
            if names.contains(&column) {
                return Err(TableError::DuplicateColumn(column));
            }
            names.push(column);
        }
        Ok(Self {
            columns: names,
            rows: Labeled::new(),
        })
    }

    pub fn insert(&mut self, id: impl Into<String>, values: Vec<String>) -> Result<(), TableError> {
        let id = id.into();
        if values.len() != self.columns.len() {
            return Err(TableError::RowWidthMismatch {
                id,
                expected: self.columns.len(),
                provided: values.len(),
            });
        }
        self.rows.insert(id, values)
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains(id)
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.rows.ids()
    }

    /// Value of `column` for sample `id`.
    pub fn value(&self, id: &str, column: &str) -> Result<Option<&str>, TableError> {
        let row = self.rows.lookup(id)?;
        Ok(self.column_index(column).map(|idx| row[idx].as_str()))
    }

    /// Project one column into a series. Returns `None` for an unknown column.
    #[must_use]
    pub fn column_series(&self, column: &str) -> Option<Labeled<String>> {
        let idx = self.column_index(column)?;
        Some(self.rows.map(|row| row[idx].clone()))
    }

    #[must_use]
    pub fn restrict_to<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.restrict_to(ids),
        }
    }
}

/// Sample metadata, either a single categorical series or a table of named columns.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataTable {
    Series(Labeled<String>),
    Table(MetadataFrame),
}

impl MetadataTable {
    /// Build series-form metadata from `(id, value)` pairs.
    pub fn series<I, S, V>(values: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        Labeled::<String>::from_pairs(values.into_iter().map(|(id, value)| (id, value.into())))
            .map(Self::Series)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Series(series) => series.len(),
            Self::Table(frame) => frame.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Self::Series(series) => series.contains(id),
            Self::Table(frame) => frame.contains(id),
        }
    }

    pub fn ids(&self) -> Box<dyn ExactSizeIterator<Item = &str> + '_> {
        match self {
            Self::Series(series) => Box::new(series.ids()),
            Self::Table(frame) => Box::new(frame.ids()),
        }
    }

    /// Keep only the samples listed in `ids`, in that order.
    #[must_use]
    pub fn restrict_to<'a>(&self, ids: impl IntoIterator<Item = &'a str>) -> Self {
        match self {
            Self::Series(series) => Self::Series(series.restrict_to(ids)),
            Self::Table(frame) => Self::Table(frame.restrict_to(ids)),
        }
    }
}

impl From<MetadataFrame> for MetadataTable {
    fn from(frame: MetadataFrame) -> Self {
        Self::Table(frame)
    }
}

impl From<Labeled<String>> for MetadataTable {
    fn from(series: Labeled<String>) -> Self {
        Self::Series(series)
    }
}
