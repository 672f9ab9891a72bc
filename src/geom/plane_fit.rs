//! Least-squares plane fitting.
//!
//! The plane is fitted as a height field `z = a·x + b·y + d`: the design
//! matrix has the columns `(x, y, 1)` and the target vector is `z`. The
//! system is solved with a dense SVD, so rank-deficient inputs (collinear
//! points, no spread in x or y) still produce the minimum-norm solution
//! instead of NaNs.
//!
//! # Diagnostics
//! [`fit_plane_with_options`] returns a [`PlaneFit`] carrying the numerical
//! rank, the singular values of the design matrix and the residual sum of
//! squares. Rank-deficient fits are reported through `log::warn!` and can
//! be turned into an error with [`FitOptions::require_full_rank`].

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use super::core::Point3;
use super::plane::PlaneCoefficients;

/// Unknowns of the height-field fit: `a`, `b` and the intercept `d`.
const UNKNOWNS: usize = 3;

// ============================================================================
// Error Type
// ============================================================================

/// Errors that can occur while fitting a plane.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    #[error("insufficient points: {provided} provided, {required} required")]
    InsufficientPoints { provided: usize, required: usize },
    #[error("reference points must be finite")]
    NonFinitePoint,
    #[error("reference points are rank deficient (numerical rank {rank} of 3)")]
    RankDeficient { rank: usize },
    #[error("least-squares solve failed: {0}")]
    Solver(&'static str),
}

// ============================================================================
// Options
// ============================================================================

/// Options for the least-squares plane fit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitOptions {
    /// Relative cut-off for small singular values. Singular values below
    /// `rcond * σ_max` are treated as zero. Defaults to
    /// `f64::EPSILON * max(rows, 3)`.
    pub rcond: Option<f64>,

    /// Fail with [`FitError::RankDeficient`] instead of returning the
    /// minimum-norm solution.
    pub require_full_rank: bool,
}

impl FitOptions {
    #[must_use]
    pub fn with_rcond(mut self, rcond: f64) -> Self {
        self.rcond = Some(rcond.abs());
        self
    }

    #[must_use]
    pub fn strict(mut self) -> Self {
        self.require_full_rank = true;
        self
    }

    fn cutoff(self, rows: usize) -> f64 {
        self.rcond
            .unwrap_or(f64::EPSILON * rows.max(UNKNOWNS) as f64)
    }
}

// ============================================================================
// Result
// ============================================================================

/// A fitted plane together with diagnostics about the solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneFit {
    pub coefficients: PlaneCoefficients,
    /// Numerical rank of the `(x, y, 1)` design matrix.
    pub rank: usize,
    /// Singular values of the design matrix, largest first.
    pub singular_values: Vec<f64>,
    /// `Σ (a·xᵢ + b·yᵢ + d − zᵢ)²`
    pub residual_sum_of_squares: f64,
}

impl PlaneFit {
    #[must_use]
    pub fn is_full_rank(&self) -> bool {
        self.rank == UNKNOWNS
    }
}

// ============================================================================
// Fitting
// ============================================================================

/// Fit `a·x + b·y − z + d = 0` through `points` by least squares.
///
/// Returns the coefficients `(a, b, -1, d)`.
pub fn fit_plane(points: &[Point3]) -> Result<PlaneCoefficients, FitError> {
    fit_plane_with_options(points, FitOptions::default()).map(|fit| fit.coefficients)
}

pub fn fit_plane_with_options(
    points: &[Point3],
    options: FitOptions,
) -> Result<PlaneFit, FitError> {
    if points.len() < UNKNOWNS {
        return Err(FitError::InsufficientPoints {
            provided: points.len(),
            required: UNKNOWNS,
        });
    }
    if points.iter().any(|p| !p.is_finite()) {
        return Err(FitError::NonFinitePoint);
    }

    let rows = points.len();
    let design = DMatrix::from_fn(rows, UNKNOWNS, |i, j| match j {
        0 => points[i].x,
        1 => points[i].y,
        _ => 1.0,
    });
    let target = DVector::from_iterator(rows, points.iter().map(|p| p.z));

    let svd = design.clone().svd(true, true);
    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let eps = options.cutoff(rows) * sigma_max;
    let rank = svd.rank(eps);

    if rank < UNKNOWNS {
        if options.require_full_rank {
            return Err(FitError::RankDeficient { rank });
        }
        log::warn!(
            "plane fit through {rows} points is rank deficient (rank {rank} of {UNKNOWNS}); \
             using the minimum-norm least-squares solution"
        );
    }

    let solution = svd.solve(&target, eps).map_err(FitError::Solver)?;
    let residual = &design * &solution - &target;

    let coefficients = PlaneCoefficients::from_height_field(solution[0], solution[1], solution[2]);
    log::debug!(
        "fitted plane a={} b={} c={} d={} through {rows} points",
        coefficients.a,
        coefficients.b,
        coefficients.c,
        coefficients.d
    );

    Ok(PlaneFit {
        coefficients,
        rank,
        singular_values: svd.singular_values.iter().copied().collect(),
        residual_sum_of_squares: residual.norm_squared(),
    })
}
