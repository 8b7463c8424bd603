//! # Orbital-element position source
//!
//! Second implementation of [`PositionSource`]: the heliocentric position is computed from
//! mean orbital elements given as cubic polynomials in T (Julian centuries from J2000.0),
//! referred to the mean ecliptic and equinox of date.
//!
//! The model ignores periodic perturbations, so it only agrees with the series to a few
//! hundredths of a degree. It is useful as an independent cross-check of a series table and
//! as a cheap fallback.
//!
//! ## Algorithm
//!
//! ```text
//! M = L − ϖ,   ω = ϖ − Ω
//! E − e sin E = M                        (Newton–Raphson)
//! ν = 2 atan2(√(1+e) sin(E/2), √(1−e) cos(E/2))
//! r = a (1 − e cos E),   u = ω + ν
//! x = r (cos Ω cos u − sin Ω sin u cos i)
//! y = r (sin Ω cos u + cos Ω sin u cos i)
//! z = r sin u sin i
//! ```

use std::f64::consts::PI;

use nalgebra::Vector3;
use roots::{find_root_newton_raphson, SimpleConvergency};

use crate::bodies::Body;
use crate::constants::{AstronomicalUnit, Radian, Tau, RADEG};
use crate::coordinates::{principal_angle, SphericalPosition};
use crate::ephem_errors::EphemError;
use crate::planet::PositionSource;
use crate::time::{centuries_from_tau, check_tau};

/// Coefficients `[c₀, c₁, c₂, c₃]` of `c₀ + c₁T + c₂T² + c₃T³`.
pub type Cubic = [f64; 4];

/// Mean-element polynomials of one body. Angles in degrees, semi-major axis in au.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementPolynomials {
    pub mean_longitude: Cubic,
    pub semi_major_axis: Cubic,
    pub eccentricity: Cubic,
    pub inclination: Cubic,
    pub ascending_node: Cubic,
    pub perihelion_longitude: Cubic,
}

/// Venus, mean equinox of date.
pub const VENUS_ELEMENTS: ElementPolynomials = ElementPolynomials {
    mean_longitude: [181.979801, 58519.2130302, 0.00031014, 0.000000015],
    semi_major_axis: [0.723329820, 0.0, 0.0, 0.0],
    eccentricity: [0.00677188, -0.000047766, 0.0000000975, 0.00000000044],
    inclination: [3.394662, 0.0010037, -0.00000088, -0.000000007],
    ascending_node: [76.679920, 0.9011190, 0.00040665, -0.000000080],
    perihelion_longitude: [131.563707, 1.4022188, -0.00107337, -0.000005315],
};

/// Earth, mean equinox of date.
pub const EARTH_ELEMENTS: ElementPolynomials = ElementPolynomials {
    mean_longitude: [100.466449, 36000.7698231, 0.00030368, 0.000000021],
    semi_major_axis: [1.000001018, 0.0, 0.0, 0.0],
    eccentricity: [0.01670862, -0.000042037, -0.0000001236, 0.00000000004],
    inclination: [0.0, 0.0, 0.0, 0.0],
    ascending_node: [0.0, 0.0, 0.0, 0.0],
    perihelion_longitude: [102.937348, 1.7195269, 0.00045962, 0.000000499],
};

#[inline]
fn cubic(c: &Cubic, t: f64) -> f64 {
    ((c[3] * t + c[2]) * t + c[1]) * t + c[0]
}

/// Osculating-like elements evaluated at one date. Angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub mean_longitude: Radian,
    pub semi_major_axis: AstronomicalUnit,
    pub eccentricity: f64,
    pub inclination: Radian,
    pub ascending_node: Radian,
    pub perihelion_longitude: Radian,
}

impl OrbitalElements {
    pub fn mean_anomaly(&self) -> Radian {
        principal_angle(self.mean_longitude - self.perihelion_longitude)
    }

    pub fn argument_of_perihelion(&self) -> Radian {
        self.perihelion_longitude - self.ascending_node
    }

    /// Heliocentric rectangular position in the frame of the elements.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidEccentricity`] if `e ∉ [0, 1)`.
    /// * [`EphemError::RootFindingError`] if Kepler's equation does not converge.
    pub fn rectangular(&self) -> Result<Vector3<f64>, EphemError> {
        let e = self.eccentricity;
        let ecc_anomaly = solve_kepler(self.mean_anomaly(), e)?;

        let (sin_half, cos_half) = (ecc_anomaly / 2.0).sin_cos();
        let nu = 2.0 * ((1.0 + e).sqrt() * sin_half).atan2((1.0 - e).sqrt() * cos_half);
        let r = self.semi_major_axis * (1.0 - e * ecc_anomaly.cos());
        let u = self.argument_of_perihelion() + nu;

        let (sin_u, cos_u) = u.sin_cos();
        let (sin_node, cos_node) = self.ascending_node.sin_cos();
        let (sin_i, cos_i) = self.inclination.sin_cos();

        Ok(Vector3::new(
            r * (cos_node * cos_u - sin_node * sin_u * cos_i),
            r * (sin_node * cos_u + cos_node * sin_u * cos_i),
            r * sin_u * sin_i,
        ))
    }
}

/// Solve Kepler's equation `E − e sin E = M` for the eccentric anomaly.
///
/// Arguments
/// ---------
/// * `mean_anomaly`: M in radians.
/// * `eccentricity`: e in `[0, 1)`.
///
/// Return
/// ------
/// * E in radians, on the same turn as `M`.
///
/// Errors
/// ------
/// * [`EphemError::InvalidEccentricity`] for a non-elliptic eccentricity.
/// * [`EphemError::RootFindingError`] if Newton–Raphson fails to converge.
pub fn solve_kepler(mean_anomaly: Radian, eccentricity: f64) -> Result<Radian, EphemError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(EphemError::InvalidEccentricity(eccentricity));
    }

    let f = |ecc: f64| -> f64 { ecc - eccentricity * ecc.sin() - mean_anomaly };
    let df = |ecc: f64| -> f64 { 1.0 - eccentricity * ecc.cos() };

    // M is a good start for small eccentricities, π is safe for the others
    let x0 = if eccentricity < 0.8 { mean_anomaly } else { PI };

    let mut tol = SimpleConvergency {
        eps: f64::EPSILON * 1e2,
        max_iter: 25,
    };

    Ok(find_root_newton_raphson(x0, &f, &df, &mut tol)?)
}

/// Element-backed position source of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanOrbitalElements {
    body: Body,
    polynomials: ElementPolynomials,
}

impl MeanOrbitalElements {
    pub fn new(body: Body, polynomials: ElementPolynomials) -> Self {
        MeanOrbitalElements { body, polynomials }
    }

    pub fn venus() -> Self {
        MeanOrbitalElements::new(Body::Venus, VENUS_ELEMENTS)
    }

    pub fn earth() -> Self {
        MeanOrbitalElements::new(Body::Earth, EARTH_ELEMENTS)
    }

    /// Bundled elements of a body, `None` if the crate does not ship them.
    pub fn builtin(body: Body) -> Option<Self> {
        match body {
            Body::Venus => Some(Self::venus()),
            Body::Earth => Some(Self::earth()),
            _ => None,
        }
    }

    pub fn polynomials(&self) -> &ElementPolynomials {
        &self.polynomials
    }

    /// Mean elements at τ.
    pub fn elements_at(&self, tau: Tau) -> OrbitalElements {
        let t = centuries_from_tau(tau);
        let p = &self.polynomials;
        let angle = |c: &Cubic| -> Radian { cubic(c, t) * RADEG };

        OrbitalElements {
            mean_longitude: angle(&p.mean_longitude),
            semi_major_axis: cubic(&p.semi_major_axis, t),
            eccentricity: cubic(&p.eccentricity, t),
            inclination: angle(&p.inclination),
            ascending_node: angle(&p.ascending_node),
            perihelion_longitude: angle(&p.perihelion_longitude),
        }
    }
}

impl PositionSource for MeanOrbitalElements {
    fn body(&self) -> Body {
        self.body
    }

    fn heliocentric_position(&self, tau: Tau) -> Result<SphericalPosition, EphemError> {
        check_tau(tau)?;
        let v = self.elements_at(tau).rectangular()?;
        SphericalPosition::from_rectangular(&v)
    }
}

#[cfg(test)]
mod orbital_elements_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solve_kepler() {
        let e = solve_kepler(5.0 * RADEG, 0.1).unwrap();
        assert_relative_eq!(e.to_degrees(), 5.554589, epsilon = 1e-6);

        let e = solve_kepler(2.0, 0.0).unwrap();
        assert_relative_eq!(e, 2.0, epsilon = 1e-14);

        // highly eccentric orbit, start from π
        let m = 0.2;
        let e = solve_kepler(m, 0.95).unwrap();
        assert_relative_eq!(e - 0.95 * e.sin(), m, epsilon = 1e-12);
    }

    #[test]
    fn test_solve_kepler_rejects_open_orbits() {
        assert_eq!(
            solve_kepler(1.0, 1.0),
            Err(EphemError::InvalidEccentricity(1.0))
        );
        assert_eq!(
            solve_kepler(1.0, -0.1),
            Err(EphemError::InvalidEccentricity(-0.1))
        );
    }

    #[test]
    fn test_venus_elements() {
        let tau = (2448976.5 - 2451545.0) / 365250.0;
        let pos = MeanOrbitalElements::venus()
            .heliocentric_position(tau)
            .unwrap();
        assert_relative_eq!(pos.longitude_deg(), 26.1092848, epsilon = 1e-6);
        assert_relative_eq!(pos.latitude_deg(), -2.6208640, epsilon = 1e-6);
        assert_relative_eq!(pos.radius, 0.7246007509, epsilon = 1e-9);
    }

    #[test]
    fn test_earth_elements() {
        let tau = (2448908.5 - 2451545.0) / 365250.0;
        let earth = MeanOrbitalElements::earth();
        assert_eq!(earth.body(), Body::Earth);
        let pos = earth.heliocentric_position(tau).unwrap();
        assert_relative_eq!(pos.longitude_deg(), 19.9098676, epsilon = 1e-6);
        assert_eq!(pos.latitude, 0.0);
        assert_relative_eq!(pos.radius, 0.9976619534, epsilon = 1e-9);
    }

    #[test]
    fn test_builtin_elements() {
        assert!(MeanOrbitalElements::builtin(Body::Venus).is_some());
        assert!(MeanOrbitalElements::builtin(Body::Mars).is_none());
        assert!(MeanOrbitalElements::venus()
            .heliocentric_position(f64::NAN)
            .is_err());
    }
}
