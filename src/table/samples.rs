use super::{Labeled, TableError};
use crate::geom::Point3;

/// Number of leading dimensions used for all geometry.
pub const SPATIAL_DIMENSIONS: usize = 3;

/// Ordinated coordinates keyed by sample identifier.
///
/// Every row has the same width, at least [`SPATIAL_DIMENSIONS`], and only
/// finite values. Only the first three dimensions take part in the geometry;
/// the remaining ones are kept so the table round-trips, but are otherwise
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    dimensions: usize,
    rows: Labeled<Row>,
}

#[derive(Debug, Clone, PartialEq)]
struct Row {
    point: Point3,
    coords: Vec<f64>,
}

impl SampleTable {
    pub fn new(dimensions: usize) -> Result<Self, TableError> {
        if dimensions < SPATIAL_DIMENSIONS {
            return Err(TableError::TooFewDimensions {
                provided: dimensions,
            });
        }
        Ok(Self {
            dimensions,
            rows: Labeled::new(),
        })
    }

    /// Build a table from `(id, coordinates)` pairs. The width of the first
    /// row fixes the number of dimensions.
    pub fn from_rows<I, S>(rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let mut rows = rows.into_iter().peekable();
        let dimensions = rows
            .peek()
            .map_or(SPATIAL_DIMENSIONS, |(_, coords)| coords.len());
        let mut table = Self::new(dimensions)?;
        for (id, coords) in rows {
            table.insert(id, coords)?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, id: impl Into<String>, coords: Vec<f64>) -> Result<(), TableError> {
        let id = id.into();
        if coords.len() != self.dimensions {
            return Err(TableError::RowWidthMismatch {
                id,
                expected: self.dimensions,
                provided: coords.len(),
            });
        }
        if coords.iter().any(|value| !value.is_finite()) {
            return Err(TableError::NonFiniteCoordinate { id });
        }
        let Some(point) = Point3::from_leading(&coords) else {
            return Err(TableError::TooFewDimensions {
                provided: coords.len(),
            });
        };
        self.rows.insert(id, Row { point, coords })
    }

    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
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

    /// Full coordinate row of `id`.
    pub fn row(&self, id: &str) -> Result<&[f64], TableError> {
        self.rows.lookup(id).map(|row| row.coords.as_slice())
    }

    /// The spatial part of the row of `id`.
    pub fn point(&self, id: &str) -> Result<Point3, TableError> {
        self.rows.lookup(id).map(|row| row.point)
    }

    /// Spatial points of every sample, in row order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (&str, Point3)> + '_ {
        self.rows
            .iter()
            .map(|(id, row)| (id, row.point))
    }

    /// Spatial points of `ids`, in the order given. Fails on the first unknown identifier.
    pub fn select_points<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a str>,
    ) -> Result<Vec<Point3>, TableError> {
        ids.into_iter().map(|id| self.point(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SampleTable {
        SampleTable::from_rows([
            ("s1", vec![1.0, 2.0, 3.0, 4.0]),
            ("s2", vec![-1.0, -2.0, -3.0, -4.0]),
            ("s3", vec![0.5, 0.0, 0.25, 9.0]),
        ])
        .unwrap()
    }

    #[test]
    fn too_few_dimensions() {
        assert_eq!(
            SampleTable::new(2),
            Err(TableError::TooFewDimensions { provided: 2 })
        );
        assert_eq!(
            SampleTable::from_rows([("a", vec![1.0, 2.0])]),
            Err(TableError::TooFewDimensions { provided: 2 })
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = SampleTable::from_rows([("a", vec![1.0, 2.0, 3.0]), ("b", vec![1.0, 2.0, 3.0, 4.0])])
            .unwrap_err();
        assert_eq!(
            err,
            TableError::RowWidthMismatch {
                id: "b".to_owned(),
                expected: 3,
                provided: 4
            }
        );
    }

    #[test]
    fn non_finite_coordinates_are_rejected() {
        let mut table = table();
        assert_eq!(
            table.insert("z", vec![f64::NAN, 5.0, 5.0, 0.0]),
            Err(TableError::NonFiniteCoordinate { id: "z".to_owned() })
        );
        // Trailing dimensions are checked too.
        assert_eq!(
            table.insert("w", vec![1.0, 1.0, 1.0, f64::INFINITY]),
            Err(TableError::NonFiniteCoordinate { id: "w".to_owned() })
        );
        assert_eq!(table.len(), 3);
        assert!(!table.contains("z"));
    }

    #[test]
    fn points_use_first_three_dimensions() {
        let table = table();
        assert_eq!(table.dimensions(), 4);
        assert_eq!(table.point("s2"), Ok(Point3::new(-1.0, -2.0, -3.0)));
        assert_eq!(
            table.points().map(|(id, _)| id).collect::<Vec<_>>(),
            vec!["s1", "s2", "s3"]
        );
        assert_eq!(table.row("s3").unwrap(), &[0.5, 0.0, 0.25, 9.0]);
    }

    #[test]
    fn select_points_reports_missing_identifier() {
        let table = table();
        assert_eq!(
            table.select_points(["s3", "s1"]).unwrap(),
            vec![Point3::new(0.5, 0.0, 0.25), Point3::new(1.0, 2.0, 3.0)]
        );
        assert_eq!(
            table.select_points(["s1", "nope"]),
            Err(TableError::MissingIdentifier("nope".to_owned()))
        );
    }

    #[test]
    fn empty_table_defaults_to_three_dimensions() {
        let table = SampleTable::from_rows(Vec::<(String, Vec<f64>)>::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.dimensions(), SPATIAL_DIMENSIONS);
    }
}
