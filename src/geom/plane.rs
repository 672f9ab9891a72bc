//! Plane coefficients and the distance from a point to an infinite plane.

use serde::{Deserialize, Serialize};

use super::core::{Point3, Tolerance, Vec3};

/// Errors raised when a plane cannot be used for a distance computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlaneError {
    #[error("plane normal (a, b, c) is zero; the plane is degenerate")]
    DegenerateNormal,
    #[error("plane z-coefficient is zero; z cannot be solved from x and y")]
    VerticalPlane,
    #[error("bounding points must not be empty")]
    EmptyBounds,
    #[error("bounding points must be finite")]
    NonFiniteBounds,
}

/// Coefficients `(a, b, c, d)` of the plane `a·x + b·y + c·z + d = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneCoefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl PlaneCoefficients {
    #[must_use]
    pub const fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Plane `z = a·x + b·y + d`, stored with `c = -1`.
    #[must_use]
    pub const fn from_height_field(a: f64, b: f64, d: f64) -> Self {
        Self::new(a, b, -1.0, d)
    }

    #[must_use]
    pub const fn from_array(arr: [f64; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// The (unnormalized) normal vector `(a, b, c)`.
    #[must_use]
    pub const fn normal(self) -> Vec3 {
        Vec3::new(self.a, self.b, self.c)
    }

    /// Signed plane equation `a·x + b·y + c·z + d` evaluated at `p`.
    #[must_use]
    pub const fn evaluate(self, p: Point3) -> f64 {
        self.normal().dot(p.to_vec3()) + self.d
    }

    /// Returns `Err(PlaneError::DegenerateNormal)` when `(a, b, c)` is zero.
    pub fn validate(self) -> Result<Self, PlaneError> {
        let normal = self.normal();
        if !normal.is_finite() || Tolerance::ZERO_LENGTH.is_zero_vec3(normal) {
            return Err(PlaneError::DegenerateNormal);
        }
        Ok(self)
    }

    /// Height of the plane above `(x, y)`: `z = (a·x + b·y + d) / -c`.
    ///
    /// Requires `c != 0`.
    #[must_use]
    pub fn z_at(self, x: f64, y: f64) -> f64 {
        (self.a * x + self.b * y + self.d) / -self.c
    }

    /// Perpendicular foot of `p` on the plane, i.e. `p + λ·(a, b, c)` with
    /// `λ = (-d - a·x - b·y - c·z) / (a² + b² + c²)`.
    ///
    /// Requires a normal accepted by [`PlaneCoefficients::validate`].
    #[must_use]
    pub fn foot_of(self, p: Point3) -> Point3 {
        let normal = self.normal();
        let lambda = -self.evaluate(p) / normal.length_squared();
        p.add_vec(normal * lambda)
    }
}

impl From<[f64; 4]> for PlaneCoefficients {
    fn from(arr: [f64; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<PlaneCoefficients> for [f64; 4] {
    fn from(c: PlaneCoefficients) -> Self {
        c.to_array()
    }
}

/// Euclidean distance from `point` to the infinite plane described by `coefficients`.
///
/// `|a·x + b·y + c·z + d| / ‖(a, b, c)‖`. The result is never negative.
pub fn point_to_plane_distance(
    coefficients: PlaneCoefficients,
    point: Point3,
) -> Result<f64, PlaneError> {
    let coefficients = coefficients.validate()?;
    Ok(coefficients.evaluate(point).abs() / coefficients.normal().length())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_normal_is_rejected() {
        let plane = PlaneCoefficients::new(0.0, 0.0, 0.0, 4.0);
        assert_eq!(
            point_to_plane_distance(plane, Point3::ORIGIN),
            Err(PlaneError::DegenerateNormal)
        );
    }

    #[test]
    fn z_at_solves_height_field() {
        let plane = PlaneCoefficients::from_height_field(2.0, 3.0, 1.0);
        assert_eq!(plane.z_at(1.0, 1.0), 6.0);

        let tilted = PlaneCoefficients::new(1.0, 1.0, 2.0, -4.0);
        assert_eq!(tilted.z_at(0.0, 0.0), 2.0);
        assert_eq!(tilted.evaluate(Point3::new(2.0, 2.0, tilted.z_at(2.0, 2.0))), 0.0);
    }

    #[test]
    fn foot_lies_on_plane() {
        let plane = PlaneCoefficients::new(2.0, -2.0, 5.0, 8.0);
        let foot = plane.foot_of(Point3::new(4.0, -4.0, 3.0));
        assert!(plane.evaluate(foot).abs() < 1e-12);
    }

    #[test]
    fn array_conversions() {
        let plane = PlaneCoefficients::from([1.0, -2.0, -2.0, -1.0]);
        assert_eq!(plane, PlaneCoefficients::new(1.0, -2.0, -2.0, -1.0));
        let arr: [f64; 4] = plane.into();
        assert_eq!(arr, [1.0, -2.0, -2.0, -1.0]);
    }
}
