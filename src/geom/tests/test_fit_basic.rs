use rand::Rng;

use super::scattered_reference_points;
use crate::geom::{FitOptions, PlaneCoefficients, Point3, fit_plane, fit_plane_with_options};

#[test]
fn fit_scattered_points_matches_reference_coefficients() {
    let coefficients = fit_plane(&scattered_reference_points()).unwrap();
    let expected = [0.056_756_5, 0.620_838_6, -1.0, 19.278_170_9];
    for (got, want) in coefficients.to_array().iter().zip(expected) {
        assert!((got - want).abs() < 1e-6, "{got} != {want}");
    }
}

#[test]
fn fit_recovers_exact_plane() {
    let truth = PlaneCoefficients::from_height_field(-1.5, 0.75, 12.0);
    let points: Vec<Point3> = [(-3.0, 1.0), (2.0, 5.0), (7.0, -4.0), (0.0, 0.0), (4.5, 2.5)]
        .into_iter()
        .map(|(x, y)| Point3::new(x, y, truth.z_at(x, y)))
        .collect();

    let fit = fit_plane_with_options(&points, FitOptions::default()).unwrap();
    assert!(fit.is_full_rank());
    assert!(fit.residual_sum_of_squares < 1e-18);
    for (got, want) in fit.coefficients.to_array().iter().zip(truth.to_array()) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn fit_recovers_random_planes() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let truth = PlaneCoefficients::from_height_field(
            rng.random_range(-5.0..5.0),
            rng.random_range(-5.0..5.0),
            rng.random_range(-50.0..50.0),
        );
        let points: Vec<Point3> = (0..12)
            .map(|_| {
                let x = rng.random_range(-100.0..100.0);
                let y = rng.random_range(-100.0..100.0);
                Point3::new(x, y, truth.z_at(x, y))
            })
            .collect();

        let fitted = fit_plane(&points).unwrap();
        for (got, want) in fitted.to_array().iter().zip(truth.to_array()) {
            assert!((got - want).abs() < 1e-6, "{got} != {want}");
        }
    }
}

#[test]
fn fit_is_idempotent() {
    let points = scattered_reference_points();
    let copy = points.clone();
    assert_eq!(fit_plane(&points).unwrap(), fit_plane(&copy).unwrap());
}

#[test]
fn fit_needs_at_least_three_points() {
    let points = scattered_reference_points();
    assert!(fit_plane(&points[..3]).is_ok());
    assert!(fit_plane(&points[..2]).is_err());
}
