//! # Reference systems: obliquity, precession and frame rotations
//!
//! Positions produced by the series are heliocentric ecliptic coordinates referred to the
//! mean dynamical ecliptic and equinox **of date**. This module provides the rotations needed
//! to express them in other frames:
//!
//! - ecliptic ↔ equatorial, through the obliquity ε supplied by an [`ObliquityModel`],
//! - ecliptic precession between two equinoxes (Lieske 1979 / IAU 1976 angles η, Π, p),
//! - equatorial precession between two equinoxes (IAU 1976 angles ζ, z, θ),
//! - [`rotpn`], the general rotation between two [`RefSystem`]s, assembled through the mean
//!   equator and equinox of J2000.
//!
//! All matrices act on column vectors: `x_target = M · x_source`. The elementary rotation
//! [`rotmt`] is an **active** rotation in the direct sense.

use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::constants::{
    Radian, Tau, B1950_JDE, DAYS_PER_JULIAN_CENTURY, J2000_JDE, JDE, RADEG, RADSEC,
};
use crate::coordinates::SphericalPosition;
use crate::ephem_errors::EphemError;
use crate::time::centuries_from_tau;

/// Reference equinox of a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Equinox {
    /// Mean equinox of J2000.0 (JDE 2451545.0)
    J2000,
    /// Mean equinox of B1950.0 (JDE 2433282.4235)
    B1950,
    /// Mean equinox of an arbitrary date, given as a Julian Ephemeris Day
    OfDate(JDE),
}

impl Equinox {
    /// Julian Ephemeris Day of the equinox.
    pub fn jde(&self) -> JDE {
        match *self {
            Equinox::J2000 => J2000_JDE,
            Equinox::B1950 => B1950_JDE,
            Equinox::OfDate(jde) => jde,
        }
    }

    /// Equinox date as τ (Julian millennia from J2000.0).
    pub fn tau(&self) -> Tau {
        (self.jde() - J2000_JDE) / (10.0 * DAYS_PER_JULIAN_CENTURY)
    }

    /// Julian Ephemeris Day of the equinox, checked to be finite.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::NonFiniteTime`] for an `OfDate` equinox on a NaN or infinite date.
    pub fn checked_jde(&self) -> Result<JDE, EphemError> {
        let jde = self.jde();
        if !jde.is_finite() {
            return Err(EphemError::NonFiniteTime(jde));
        }
        Ok(jde)
    }

    /// Mean equinox of the date τ.
    pub fn of_date(tau: Tau) -> Self {
        Equinox::OfDate(J2000_JDE + tau * 10.0 * DAYS_PER_JULIAN_CENTURY)
    }

    /// Two equinoxes are the same frame when they fall on the same date.
    pub fn same_as(&self, other: &Equinox) -> bool {
        self.jde() == other.jde()
    }
}

/// Principal axis of an elementary rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationAxis {
    X,
    Y,
    Z,
}

/// Elementary rotation matrix of angle `alpha` around a principal axis.
///
/// The rotation is active and direct: `rotmt(π/2, Z)` sends the X unit vector onto Y.
/// The returned matrix is orthonormal (`Rᵀ = R⁻¹`).
pub fn rotmt(alpha: Radian, axis: RotationAxis) -> Matrix3<f64> {
    let axis = match axis {
        RotationAxis::X => Vector3::x_axis(),
        RotationAxis::Y => Vector3::y_axis(),
        RotationAxis::Z => Vector3::z_axis(),
    };

    Rotation3::from_axis_angle(&axis, alpha).into()
}

/// Source of the obliquity of the ecliptic ε at a time τ.
///
/// Any closure `Fn(τ) -> ε` is an obliquity model, so a nutation-corrected (true) obliquity
/// can be plugged in without touching this crate.
pub trait ObliquityModel {
    /// Obliquity in radians at τ (Julian millennia from J2000.0).
    fn obliquity(&self, tau: Tau) -> Radian;
}

/// IAU 1976 mean obliquity of the ecliptic.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeanObliquity;

/// Constant obliquity, e.g. the J2000 value for frame-fixed conversions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedObliquity(pub Radian);

impl ObliquityModel for MeanObliquity {
    fn obliquity(&self, tau: Tau) -> Radian {
        mean_obliquity(tau)
    }
}

impl ObliquityModel for FixedObliquity {
    fn obliquity(&self, _tau: Tau) -> Radian {
        self.0
    }
}

impl<F> ObliquityModel for F
where
    F: Fn(Tau) -> Radian,
{
    fn obliquity(&self, tau: Tau) -> Radian {
        self(tau)
    }
}

/// Mean obliquity of the ecliptic (IAU 1976).
///
/// Arguments
/// ---------
/// * `tau`: Julian millennia from J2000.0.
///
/// Return
/// ------
/// * ε in radians, from the cubic polynomial in Julian centuries T
///
/// ```text
/// ε = 84381.448″ − 46.815″ T − 0.0006″ T² + 0.00181″ T³
/// ```
///
/// evaluated in Horner form.
pub fn mean_obliquity(tau: Tau) -> Radian {
    let ob0 = ((23.0 * 3600.0 + 26.0 * 60.0) + 21.448) * RADSEC;
    let ob1 = -46.815 * RADSEC;
    let ob2 = -0.0006 * RADSEC;
    let ob3 = 0.00181 * RADSEC;

    let t = centuries_from_tau(tau);

    ((ob3 * t + ob2) * t + ob1) * t + ob0
}

/// Rotation from ecliptic to equatorial coordinates of the same equinox.
pub fn ecliptic_to_equatorial_matrix(epsilon: Radian) -> Matrix3<f64> {
    rotmt(epsilon, RotationAxis::X)
}

/// Rotation from equatorial to ecliptic coordinates of the same equinox.
pub fn equatorial_to_ecliptic_matrix(epsilon: Radian) -> Matrix3<f64> {
    rotmt(-epsilon, RotationAxis::X)
}

/// (λ, β, Δ) → (α, δ, Δ) for an obliquity ε.
pub fn ecliptic_to_equatorial(pos: &SphericalPosition, epsilon: Radian) -> SphericalPosition {
    pos.rotated(&ecliptic_to_equatorial_matrix(epsilon))
}

/// (α, δ, Δ) → (λ, β, Δ) for an obliquity ε.
pub fn equatorial_to_ecliptic(pos: &SphericalPosition, epsilon: Radian) -> SphericalPosition {
    pos.rotated(&equatorial_to_ecliptic_matrix(epsilon))
}

/// Starting epoch T and elapsed time t, both in Julian centuries, of a precession from `from`
/// to `to`.
fn precession_times(from: &Equinox, to: &Equinox) -> Result<(f64, f64), EphemError> {
    let (jde_from, jde_to) = (from.checked_jde()?, to.checked_jde()?);
    let big_t = (jde_from - J2000_JDE) / DAYS_PER_JULIAN_CENTURY;
    let t = (jde_to - jde_from) / DAYS_PER_JULIAN_CENTURY;
    Ok((big_t, t))
}

/// Ecliptic precession matrix from the mean ecliptic and equinox `from` to those of `to`.
///
/// The angles are
///
/// ```text
/// η = (47.0029″ − 0.06603″T + 0.000598″T²) t + (−0.03302″ + 0.000598″T) t² + 0.000060″ t³
/// Π = 174.876384° + 3289.4789″T + 0.60622″T² − (869.8089″ + 0.50491″T) t + 0.03536″ t²
/// p = (5029.0966″ + 2.22226″T − 0.000042″T²) t + (1.11113″ − 0.000042″T) t² − 0.000006″ t³
/// ```
///
/// and the matrix is `R_z(Π + p) · R_x(−η) · R_z(−Π)`.
///
/// Errors
/// ------
/// * [`EphemError::NonFiniteTime`] if either equinox date is not finite.
pub fn ecliptic_precession_matrix(
    from: &Equinox,
    to: &Equinox,
) -> Result<Matrix3<f64>, EphemError> {
    let (big_t, t) = precession_times(from, to)?;
    let big_t2 = big_t * big_t;
    let t2 = t * t;
    let t3 = t2 * t;

    let eta = ((47.0029 - 0.06603 * big_t + 0.000598 * big_t2) * t
        + (-0.03302 + 0.000598 * big_t) * t2
        + 0.000060 * t3)
        * RADSEC;
    let pi = 174.876384 * RADEG
        + (3289.4789 * big_t + 0.60622 * big_t2 - (869.8089 + 0.50491 * big_t) * t
            + 0.03536 * t2)
            * RADSEC;
    let p = ((5029.0966 + 2.22226 * big_t - 0.000042 * big_t2) * t
        + (1.11113 - 0.000042 * big_t) * t2
        - 0.000006 * t3)
        * RADSEC;

    Ok(rotmt(pi + p, RotationAxis::Z)
        * rotmt(-eta, RotationAxis::X)
        * rotmt(-pi, RotationAxis::Z))
}

/// Equatorial precession matrix from the mean equator and equinox `from` to those of `to`.
///
/// The angles are
///
/// ```text
/// ζ = (2306.2181″ + 1.39656″T − 0.000139″T²) t + (0.30188″ − 0.000344″T) t² + 0.017998″ t³
/// z = (2306.2181″ + 1.39656″T − 0.000139″T²) t + (1.09468″ + 0.000066″T) t² + 0.018203″ t³
/// θ = (2004.3109″ − 0.85330″T − 0.000217″T²) t − (0.42665″ + 0.000217″T) t² − 0.041833″ t³
/// ```
///
/// and the matrix is `R_z(z) · R_y(−θ) · R_z(ζ)`.
pub fn equatorial_precession_matrix(
    from: &Equinox,
    to: &Equinox,
) -> Result<Matrix3<f64>, EphemError> {
    let (big_t, t) = precession_times(from, to)?;
    let big_t2 = big_t * big_t;
    let t2 = t * t;
    let t3 = t2 * t;

    let common = 2306.2181 + 1.39656 * big_t - 0.000139 * big_t2;
    let zeta = (common * t + (0.30188 - 0.000344 * big_t) * t2 + 0.017998 * t3) * RADSEC;
    let z = (common * t + (1.09468 + 0.000066 * big_t) * t2 + 0.018203 * t3) * RADSEC;
    let theta = ((2004.3109 - 0.85330 * big_t - 0.000217 * big_t2) * t
        - (0.42665 + 0.000217 * big_t) * t2
        - 0.041833 * t3)
        * RADSEC;

    Ok(rotmt(z, RotationAxis::Z)
        * rotmt(-theta, RotationAxis::Y)
        * rotmt(zeta, RotationAxis::Z))
}

/// Precess ecliptic coordinates (λ, β) from one equinox to another. The radius is kept.
pub fn precess_ecliptic(
    pos: &SphericalPosition,
    from: &Equinox,
    to: &Equinox,
) -> Result<SphericalPosition, EphemError> {
    from.checked_jde()?;
    to.checked_jde()?;
    if from.same_as(to) {
        return Ok(*pos);
    }
    Ok(pos.rotated(&ecliptic_precession_matrix(from, to)?))
}

/// Precess equatorial coordinates (α, δ) from one equinox to another. The distance is kept.
pub fn precess_equatorial(
    pos: &SphericalPosition,
    from: &Equinox,
    to: &Equinox,
) -> Result<SphericalPosition, EphemError> {
    from.checked_jde()?;
    to.checked_jde()?;
    if from.same_as(to) {
        return Ok(*pos);
    }
    Ok(pos.rotated(&equatorial_precession_matrix(from, to)?))
}

/// Celestial reference system: a fundamental plane and an equinox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefSystem {
    /// Mean ecliptic and equinox
    Eclm(Equinox),
    /// Mean equator and equinox (precession only, no nutation)
    Equm(Equinox),
}

impl RefSystem {
    pub fn equinox(&self) -> Equinox {
        match *self {
            RefSystem::Eclm(e) | RefSystem::Equm(e) => e,
        }
    }

    /// `true` if both systems share the fundamental plane, whatever their equinox.
    pub fn variant_eq(&self, other: &RefSystem) -> bool {
        matches!(
            (self, other),
            (RefSystem::Equm(_), RefSystem::Equm(_)) | (RefSystem::Eclm(_), RefSystem::Eclm(_))
        )
    }
}

/// Rotation matrix between two reference systems.
///
/// The transformation is assembled step by step:
///
/// 1. `Eclm(e₁)` → `Equm(e₁)` through the obliquity at `e₁`,
/// 2. `Equm(e₁)` → `Equm(J2000)` → `Equm(e₂)` through equatorial precession,
/// 3. `Equm(e₂)` → `Eclm(e₂)` through the obliquity at `e₂`.
///
/// Steps that do not change anything are skipped, so `rotpn(a, a, _)` is the identity and
/// a plane change at a fixed equinox involves no precession at all.
///
/// Arguments
/// ---------
/// * `from`: source system.
/// * `to`: target system.
/// * `obliquity`: obliquity model used for the ecliptic ↔ equatorial steps.
///
/// Return
/// ------
/// * `M` such that `x_to = M · x_from`.
///
/// Errors
/// ------
/// * [`EphemError::NonFiniteTime`] if an equinox date is not finite.
pub fn rotpn<O>(
    from: &RefSystem,
    to: &RefSystem,
    obliquity: &O,
) -> Result<Matrix3<f64>, EphemError>
where
    O: ObliquityModel + ?Sized,
{
    let mut rot = Matrix3::identity();
    let e1 = from.equinox();
    let e2 = to.equinox();
    e1.checked_jde()?;
    e2.checked_jde()?;

    if from.variant_eq(to) && e1.same_as(&e2) {
        return Ok(rot);
    }

    if let RefSystem::Eclm(_) = from {
        rot = ecliptic_to_equatorial_matrix(obliquity.obliquity(e1.tau())) * rot;
    }

    if !e1.same_as(&e2) {
        if !e1.same_as(&Equinox::J2000) {
            rot = equatorial_precession_matrix(&e1, &Equinox::J2000)? * rot;
        }
        if !e2.same_as(&Equinox::J2000) {
            rot = equatorial_precession_matrix(&Equinox::J2000, &e2)? * rot;
        }
    }

    if let RefSystem::Eclm(_) = to {
        rot = equatorial_to_ecliptic_matrix(obliquity.obliquity(e2.tau())) * rot;
    }

    Ok(rot)
}
