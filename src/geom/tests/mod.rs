mod test_fit_basic;

use crate::geom::Point3;

/// Ten scattered points used as the reference set across the geometry tests.
pub(crate) fn scattered_reference_points() -> Vec<Point3> {
    [
        [54.0, -59.0, -66.0],
        [41.0, 41.0, 94.0],
        [62.0, 71.0, 49.0],
        [77.0, -5.0, -54.0],
        [-34.0, 37.0, 60.0],
        [-66.0, 31.0, 20.0],
        [-64.0, 11.0, 22.0],
        [10.0, -52.0, -34.0],
        [-93.0, -86.0, -20.0],
        [99.0, -40.0, 95.0],
    ]
    .into_iter()
    .map(Point3::from)
    .collect()
}
