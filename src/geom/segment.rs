//! Distance from a point to the finite patch of a plane spanned by a set of
//! reference points.
//!
//! The patch is the part of the plane whose x/y footprint lies inside the
//! axis-aligned bounding rectangle of the reference points. The nearest
//! candidate is found by dropping the perpendicular foot onto the infinite
//! plane, clamping its x and y into the rectangle and lifting the clamped
//! position back onto the plane. This is an approximation of the nearest
//! point on the convex hull, not an exact solution.
//!
//! Limitations:
//! - Fixed to three spatial dimensions.
//! - The plane must not be vertical (`c != 0`), since z is solved from x and y.

use super::core::{BBox, Point3};
use super::plane::{PlaneCoefficients, PlaneError};

/// A plane restricted to the x/y bounding rectangle of its reference points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePlane {
    coefficients: PlaneCoefficients,
    bounds: BBox,
}

impl ReferencePlane {
    pub fn new(coefficients: PlaneCoefficients, bounds: &[Point3]) -> Result<Self, PlaneError> {
        let coefficients = coefficients.validate()?;
        if coefficients.c == 0.0 {
            return Err(PlaneError::VerticalPlane);
        }
        if bounds.iter().any(|p| !p.is_finite()) {
            return Err(PlaneError::NonFiniteBounds);
        }
        let bounds = BBox::from_points(bounds).ok_or(PlaneError::EmptyBounds)?;
        Ok(Self {
            coefficients,
            bounds,
        })
    }

    #[must_use]
    pub const fn coefficients(&self) -> PlaneCoefficients {
        self.coefficients
    }

    #[must_use]
    pub const fn bounds(&self) -> BBox {
        self.bounds
    }

    /// Nearest point on the bounded patch, as described in the module docs.
    #[must_use]
    pub fn nearest_point(&self, point: Point3) -> Point3 {
        let clamped = self.bounds.clamp_xy(self.coefficients.foot_of(point));
        Point3::new(
            clamped.x,
            clamped.y,
            self.coefficients.z_at(clamped.x, clamped.y),
        )
    }

    /// Distance from `point` to the bounded patch.
    #[must_use]
    pub fn segment_distance(&self, point: Point3) -> f64 {
        point.distance_to(self.nearest_point(point))
    }

    /// Distance from `point` to the unbounded plane.
    #[must_use]
    pub fn plane_distance(&self, point: Point3) -> f64 {
        self.coefficients.evaluate(point).abs() / self.coefficients.normal().length()
    }

    /// Whether the perpendicular foot of `point` falls inside the bounding rectangle,
    /// in which case both distances agree.
    #[must_use]
    pub fn foot_within_bounds(&self, point: Point3) -> bool {
        self.bounds.contains_xy(self.coefficients.foot_of(point))
    }
}

/// Distance from `point` to the segment of the plane spanned by `bounds`.
///
/// Preconditions: `(a, b, c) != 0`, `c != 0` and `bounds` is non-empty and finite.
pub fn point_to_segment_distance(
    coefficients: PlaneCoefficients,
    point: Point3,
    bounds: &[Point3],
) -> Result<f64, PlaneError> {
    Ok(ReferencePlane::new(coefficients, bounds)?.segment_distance(point))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn rejects_invalid_planes_and_bounds() {
        let flat = PlaneCoefficients::from_height_field(0.0, 0.0, 0.0);
        assert_eq!(
            ReferencePlane::new(PlaneCoefficients::new(0.0, 0.0, 0.0, 1.0), &unit_square()),
            Err(PlaneError::DegenerateNormal)
        );
        assert_eq!(
            ReferencePlane::new(PlaneCoefficients::new(1.0, 0.0, 0.0, 1.0), &unit_square()),
            Err(PlaneError::VerticalPlane)
        );
        assert_eq!(ReferencePlane::new(flat, &[]), Err(PlaneError::EmptyBounds));
        assert_eq!(
            ReferencePlane::new(flat, &[Point3::new(f64::NAN, 0.0, 0.0)]),
            Err(PlaneError::NonFiniteBounds)
        );
    }

    #[test]
    fn above_the_patch_is_plane_distance() {
        let plane = ReferencePlane::new(PlaneCoefficients::from_height_field(0.0, 0.0, 0.0), &unit_square())
            .unwrap();
        let p = Point3::new(0.5, 0.5, 3.0);
        assert!(plane.foot_within_bounds(p));
        assert_eq!(plane.nearest_point(p), Point3::new(0.5, 0.5, 0.0));
        assert_eq!(plane.segment_distance(p), 3.0);
        assert_eq!(plane.plane_distance(p), 3.0);
    }

    #[test]
    fn outside_the_patch_snaps_to_the_edge() {
        let plane = ReferencePlane::new(PlaneCoefficients::from_height_field(0.0, 0.0, 0.0), &unit_square())
            .unwrap();
        let p = Point3::new(4.0, 0.5, 4.0);
        assert!(!plane.foot_within_bounds(p));
        assert_eq!(plane.nearest_point(p), Point3::new(1.0, 0.5, 0.0));
        assert_eq!(plane.segment_distance(p), 5.0);
        assert_eq!(plane.plane_distance(p), 4.0);
    }

    #[test]
    fn tilted_plane_nearest_point_is_foot_inside_bounds() {
        // z = x + 1 over the unit square.
        let coefficients = PlaneCoefficients::from_height_field(1.0, 0.0, 1.0);
        let plane = ReferencePlane::new(coefficients, &unit_square()).unwrap();
        let p = Point3::new(0.25, 0.5, 2.25);
        assert!(plane.foot_within_bounds(p));

        let nearest = plane.nearest_point(p);
        let foot = coefficients.foot_of(p);
        assert!((nearest.x - foot.x).abs() < 1e-12);
        assert!((nearest.y - foot.y).abs() < 1e-12);
        assert!((nearest.z - foot.z).abs() < 1e-12);
        assert!((nearest.x - 0.75).abs() < 1e-12);
        assert!((nearest.z - 1.75).abs() < 1e-12);
        assert!((plane.segment_distance(p) - 0.5_f64.sqrt()).abs() < 1e-12);
    }
}
