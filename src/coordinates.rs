//! # Spherical and rectangular coordinates
//!
//! [`SphericalPosition`] is the `(longitude, latitude, radius)` triple produced by the series
//! evaluator; the same type carries `(right ascension, declination, distance)` once a
//! position has been rotated to an equatorial frame.
//!
//! Rectangular positions are plain [`nalgebra::Vector3<f64>`] in the same frame:
//!
//! ```text
//! x = R cos B cos L
//! y = R cos B sin L
//! z = R sin B
//! ```
//!
//! Converting back is undefined for `R = 0`; [`SphericalPosition::from_rectangular`] returns
//! [`EphemError::DegenerateRadius`] in that case instead of inventing angles.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{Degree, Radian, DPI};
use crate::ephem_errors::EphemError;

/// Reduce an angle to `[0, 2π)`.
pub fn principal_angle(a: Radian) -> Radian {
    let r = a.rem_euclid(DPI);
    // rem_euclid may round up to exactly 2π for tiny negative inputs
    if r >= DPI {
        0.0
    } else {
        r
    }
}

/// Difference `a - b` reduced to `[-π, π)`.
pub fn angle_diff(a: Radian, b: Radian) -> Radian {
    principal_angle(a - b + std::f64::consts::PI) - std::f64::consts::PI
}

/// Spherical coordinates.
///
/// Units
/// -----
/// * `longitude`: radians (L, or right ascension α in equatorial frames)
/// * `latitude`: radians (B, or declination δ)
/// * `radius`: au
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalPosition {
    pub longitude: Radian,
    pub latitude: Radian,
    pub radius: f64,
}

impl SphericalPosition {
    pub fn new(longitude: Radian, latitude: Radian, radius: f64) -> Self {
        SphericalPosition {
            longitude,
            latitude,
            radius,
        }
    }

    /// Unit-distance direction, for star-like positions where only angles matter.
    pub fn direction(longitude: Radian, latitude: Radian) -> Self {
        SphericalPosition::new(longitude, latitude, 1.0)
    }

    /// Build from angles in degrees.
    pub fn from_degrees(longitude: Degree, latitude: Degree, radius: f64) -> Self {
        SphericalPosition::new(longitude.to_radians(), latitude.to_radians(), radius)
    }

    /// Same position with the longitude reduced to `[0, 2π)`.
    pub fn normalized(&self) -> Self {
        SphericalPosition::new(principal_angle(self.longitude), self.latitude, self.radius)
    }

    pub fn longitude_deg(&self) -> Degree {
        self.longitude.to_degrees()
    }

    pub fn latitude_deg(&self) -> Degree {
        self.latitude.to_degrees()
    }

    /// Rectangular coordinates of the position in the same frame.
    pub fn to_rectangular(&self) -> Vector3<f64> {
        let (sin_l, cos_l) = self.longitude.sin_cos();
        let (sin_b, cos_b) = self.latitude.sin_cos();
        Vector3::new(
            self.radius * cos_b * cos_l,
            self.radius * cos_b * sin_l,
            self.radius * sin_b,
        )
    }

    /// Spherical coordinates of a rectangular vector, longitude in `[0, 2π)`.
    ///
    /// Arguments
    /// ---------
    /// * `v`: rectangular position in any length unit.
    ///
    /// Return
    /// ------
    /// * `(L, B, R)` with `B` in `[-π/2, π/2]` and `R = ‖v‖`.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::DegenerateRadius`] if `‖v‖ = 0` (angles are undefined).
    pub fn from_rectangular(v: &Vector3<f64>) -> Result<Self, EphemError> {
        let radius = v.norm();
        if radius == 0.0 || !radius.is_finite() {
            return Err(EphemError::DegenerateRadius);
        }

        let (longitude, latitude) = direction_angles(v);
        Ok(SphericalPosition::new(longitude, latitude, radius))
    }

    /// Apply a rotation to the position, keeping its radius.
    ///
    /// The rotation acts on the unit direction, so a zero radius is carried through
    /// unchanged instead of being reported as degenerate.
    pub fn rotated(&self, rot: &Matrix3<f64>) -> Self {
        let v = rot * SphericalPosition::direction(self.longitude, self.latitude).to_rectangular();
        let (longitude, latitude) = direction_angles(&v);
        SphericalPosition::new(longitude, latitude, self.radius)
    }
}

/// Longitude in `[0, 2π)` and latitude of a non-zero vector.
fn direction_angles(v: &Vector3<f64>) -> (Radian, Radian) {
    // atan2 on the projected radius keeps full precision near the poles
    let rho = v.x.hypot(v.y);
    let latitude = v.z.atan2(rho);
    let longitude = if rho == 0.0 {
        0.0
    } else {
        principal_angle(v.y.atan2(v.x))
    };
    (longitude, latitude)
}
