mod core;
mod plane;
mod plane_fit;
mod segment;

pub use core::{BBox, Point3, Tolerance, Vec3};
pub use plane::{PlaneCoefficients, PlaneError, point_to_plane_distance};
pub use plane_fit::{FitError, FitOptions, PlaneFit, fit_plane, fit_plane_with_options};
pub use segment::{ReferencePlane, point_to_segment_distance};

#[cfg(test)]
mod tests;
