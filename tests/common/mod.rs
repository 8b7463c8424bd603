#![allow(dead_code)]

use approx::assert_abs_diff_eq;
use periodic_ephem::constants::{Degree, Tau, DAYS_PER_JULIAN_MILLENNIUM, J2000_JDE};
use periodic_ephem::coordinates::{angle_diff, SphericalPosition};

/// JDE 2448976.5 (1992 December 20.0 TD), the Venus worked example.
pub const VENUS_EXAMPLE_JDE: f64 = 2_448_976.5;

/// JDE 2448908.5 (1992 October 13.0 TD), the Sun worked example.
pub const SUN_EXAMPLE_JDE: f64 = 2_448_908.5;

pub fn tau(jde: f64) -> Tau {
    (jde - J2000_JDE) / DAYS_PER_JULIAN_MILLENNIUM
}

/// Compare a longitude in degrees modulo a full turn.
pub fn assert_longitude_close(actual: Degree, expected: Degree, epsilon: Degree) {
    let diff = angle_diff(actual.to_radians(), expected.to_radians()).to_degrees();
    assert!(
        diff.abs() <= epsilon,
        "longitude {actual}° differs from {expected}° by {diff}° (> {epsilon}°)"
    );
}

/// Compare a spherical position against `(longitude°, latitude°, radius)`.
pub fn assert_position_close(
    actual: &SphericalPosition,
    expected: (Degree, Degree, f64),
    angle_epsilon: Degree,
    radius_epsilon: f64,
) {
    assert_longitude_close(actual.longitude_deg(), expected.0, angle_epsilon);
    assert_abs_diff_eq!(actual.latitude_deg(), expected.1, epsilon = angle_epsilon);
    assert_abs_diff_eq!(actual.radius, expected.2, epsilon = radius_epsilon);
}
