//! # Heliocentric → geocentric
//!
//! A geocentric position is the difference of two heliocentric rectangular vectors,
//! target minus Earth, both referred to the same ecliptic and equinox.
//!
//! With the light-time correction the target is taken at the retarded time
//! `τ − Δt`, where `Δt = 0.0057755183 · Δ` days and Δ is the geocentric distance; Δ and Δt
//! are refined alternately until Δ changes by less than [`LIGHT_TIME_TOLERANCE`] au.
//! The Earth itself is always taken at τ.

use nalgebra::Vector3;

use crate::constants::{
    AstronomicalUnit, Tau, DAYS_PER_JULIAN_MILLENNIUM, DPI, LIGHT_TIME_DAYS_PER_AU,
};
use crate::coordinates::{principal_angle, SphericalPosition};
use crate::ephem_errors::EphemError;
use crate::planet::PositionSource;

/// Convergence threshold of the light-time iteration, in au.
pub const LIGHT_TIME_TOLERANCE: AstronomicalUnit = 1e-10;

/// Maximum number of light-time refinements.
pub const LIGHT_TIME_MAX_ITER: usize = 10;

/// Light travel time in days over a distance in au.
#[inline]
pub fn light_time_days(distance: AstronomicalUnit) -> f64 {
    LIGHT_TIME_DAYS_PER_AU * distance
}

/// Rectangular geocentric vector of a target, given both heliocentric positions.
pub fn geocentric_rectangular(
    target: &SphericalPosition,
    earth: &SphericalPosition,
) -> Vector3<f64> {
    target.to_rectangular() - earth.to_rectangular()
}

/// Geocentric ecliptic position (λ, β, Δ) of `target` at τ.
///
/// Arguments
/// ---------
/// * `target`: heliocentric source of the observed body.
/// * `earth`: heliocentric source of the Earth, same frame as `target`.
/// * `tau`: time of observation, Julian millennia from J2000.0.
/// * `light_time`: if `true`, the target is taken at the retarded time.
///
/// Return
/// ------
/// * λ in `[0, 2π)`, β in radians, Δ in au.
///
/// Errors
/// ------
/// * [`EphemError::NonFiniteTime`] if τ is not finite.
/// * [`EphemError::DegenerateRadius`] if the target coincides with the Earth.
pub fn geocentric_position<T, E>(
    target: &T,
    earth: &E,
    tau: Tau,
    light_time: bool,
) -> Result<SphericalPosition, EphemError>
where
    T: PositionSource + ?Sized,
    E: PositionSource + ?Sized,
{
    let earth_pos = earth.heliocentric_position(tau)?;
    let mut geo = SphericalPosition::from_rectangular(&geocentric_rectangular(
        &target.heliocentric_position(tau)?,
        &earth_pos,
    ))?;

    if !light_time {
        return Ok(geo);
    }

    for iter in 0..LIGHT_TIME_MAX_ITER {
        let retarded = tau - light_time_days(geo.radius) / DAYS_PER_JULIAN_MILLENNIUM;
        let next = SphericalPosition::from_rectangular(&geocentric_rectangular(
            &target.heliocentric_position(retarded)?,
            &earth_pos,
        ))?;

        let change = (next.radius - geo.radius).abs();
        geo = next;
        if change < LIGHT_TIME_TOLERANCE {
            tracing::debug!(
                "Light-time for {} converged after {} iterations (Δ = {} au)",
                target.body(),
                iter + 1,
                geo.radius
            );
            return Ok(geo);
        }
    }

    tracing::warn!(
        "Light-time for {} did not converge in {LIGHT_TIME_MAX_ITER} iterations",
        target.body()
    );
    Ok(geo)
}

/// Geometric geocentric Sun from the heliocentric position of the Earth: `(L + π, −B, R)`.
pub fn geometric_sun(earth: &SphericalPosition) -> SphericalPosition {
    SphericalPosition::new(
        principal_angle(earth.longitude + DPI / 2.0),
        -earth.latitude,
        earth.radius,
    )
}
