//! Distance of every sample in an ordination to a reference plane.
//!
//! The reference plane is fitted through the samples whose metadata matches
//! a category (the baseline group). Every sample, the reference samples
//! included, is then measured against the finite patch of that plane spanned
//! by the reference samples, see [`ReferencePlane`].

use serde::Serialize;

use crate::geom::{
    FitError, FitOptions, PlaneCoefficients, PlaneError, PlaneFit, ReferencePlane,
    fit_plane_with_options,
};
use crate::table::{Labeled, MetadataTable, SampleTable, TableError};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors raised while computing reference-plane distances.
#[derive(Debug, thiserror::Error)]
pub enum ReferencePlaneError {
    #[error("there are no overlapping samples between the metadata and the ordinated coordinates")]
    EmptyOverlap,
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    #[error("metadata has no column `{0}`")]
    UnknownColumn(String),
    #[error("cannot find reference points for category `{category}`")]
    NoReferencePoints { category: String },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("failed to fit the reference plane: {0}")]
    Fit(#[from] FitError),
    #[error(transparent)]
    Plane(#[from] PlaneError),
}

/// Options for [`distance_to_reference_plane_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReferencePlaneOptions {
    pub fit: FitOptions,
}

impl ReferencePlaneOptions {
    #[must_use]
    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }
}

/// Distances from each sample to the reference plane, in ordination row order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceResult {
    fit: PlaneFit,
    reference_ids: Vec<String>,
    distances: Labeled<f64>,
}

impl DistanceResult {
    #[must_use]
    pub fn coefficients(&self) -> PlaneCoefficients {
        self.fit.coefficients
    }

    #[must_use]
    pub fn fit(&self) -> &PlaneFit {
        &self.fit
    }

    /// Samples the plane was fitted through, in ordination row order.
    #[must_use]
    pub fn reference_ids(&self) -> &[String] {
        &self.reference_ids
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.distances.get(id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, f64)> + '_ {
        self.distances.iter().map(|(id, d)| (id, *d))
    }

    #[must_use]
    pub fn into_distances(self) -> Labeled<f64> {
        self.distances
    }
}

/// Compute the distance from every sample in `ordination` to the plane fitted
/// through the samples whose metadata equals `category`.
///
/// With table-form metadata `column` names the column holding `category`;
/// series-form metadata is matched directly and takes no column.
///
/// Every ordinated sample needs a metadata row; the first one without fails
/// with [`TableError::MissingIdentifier`]. Metadata rows for samples that were
/// not ordinated are ignored.
pub fn distance_to_reference_plane(
    ordination: &SampleTable,
    metadata: &MetadataTable,
    category: &str,
    column: Option<&str>,
) -> Result<DistanceResult, ReferencePlaneError> {
    distance_to_reference_plane_with_options(
        ordination,
        metadata,
        category,
        column,
        ReferencePlaneOptions::default(),
    )
}

pub fn distance_to_reference_plane_with_options(
    ordination: &SampleTable,
    metadata: &MetadataTable,
    category: &str,
    column: Option<&str>,
    options: ReferencePlaneOptions,
) -> Result<DistanceResult, ReferencePlaneError> {
    let overlap = metadata.restrict_to(ordination.ids());
    if overlap.is_empty() {
        return Err(ReferencePlaneError::EmptyOverlap);
    }
    if let Some(missing) = ordination.ids().find(|id| !overlap.contains(id)) {
        return Err(TableError::MissingIdentifier(missing.to_owned()).into());
    }
    let ignored = metadata.len().saturating_sub(overlap.len());
    if ignored > 0 {
        log::debug!("ignoring {ignored} metadata rows without ordinated coordinates");
    }

    let reference_ids = select_reference_ids(&overlap, category, column)?;
    if reference_ids.is_empty() {
        return Err(ReferencePlaneError::NoReferencePoints {
            category: category.to_owned(),
        });
    }
    log::debug!(
        "fitting reference plane through {} of {} samples",
        reference_ids.len(),
        ordination.len()
    );

    let reference = ordination.select_points(reference_ids.iter().map(String::as_str))?;
    let fit = fit_plane_with_options(&reference, options.fit)?;
    let plane = ReferencePlane::new(fit.coefficients, &reference)?;

    Ok(DistanceResult {
        fit,
        reference_ids,
        distances: segment_distances(ordination, &plane),
    })
}

fn select_reference_ids(
    metadata: &MetadataTable,
    category: &str,
    column: Option<&str>,
) -> Result<Vec<String>, ReferencePlaneError> {
    let matching = |series: &Labeled<String>| -> Vec<String> {
        series
            .iter()
            .filter(|(_, value)| value.as_str() == category)
            .map(|(id, _)| id.to_owned())
            .collect()
    };

    match (metadata, column) {
        (MetadataTable::Table(frame), Some(column)) => frame
            .column_series(column)
            .map(|series| matching(&series))
            .ok_or_else(|| ReferencePlaneError::UnknownColumn(column.to_owned())),
        (MetadataTable::Series(series), None) => Ok(matching(series)),
        (MetadataTable::Table(_), None) => Err(ReferencePlaneError::InvalidArgument(
            "`column` is required when the metadata has several columns",
        )),
        (MetadataTable::Series(_), Some(_)) => Err(ReferencePlaneError::InvalidArgument(
            "`column` only applies to table-form metadata",
        )),
    }
}

#[cfg(not(feature = "parallel"))]
fn segment_distances(ordination: &SampleTable, plane: &ReferencePlane) -> Labeled<f64> {
    ordination
        .points()
        .map(|(id, point)| (id, plane.segment_distance(point)))
        .collect()
}

#[cfg(feature = "parallel")]
fn segment_distances(ordination: &SampleTable, plane: &ReferencePlane) -> Labeled<f64> {
    let points: Vec<_> = ordination.points().collect();
    let distances: Vec<f64> = points
        .par_iter()
        .map(|(_, point)| plane.segment_distance(*point))
        .collect();
    points.into_iter().map(|(id, _)| id).zip(distances).collect()
}
