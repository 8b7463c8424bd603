//! # Time arguments
//!
//! The series are expressed in **τ**, Julian millennia of Terrestrial/Dynamical Time elapsed
//! since J2000.0:
//!
//! ```text
//! τ = (JDE − 2451545.0) / 365250
//! ```
//!
//! Frame formulas (precession, FK5 correction, mean elements) use **T**, Julian centuries,
//! so that `T = 10 τ`.
//!
//! Calendar handling is delegated to [`hifitime`]: any [`Epoch`] can be turned into τ through
//! its TDB Julian day, which is the argument the VSOP87 series were fitted against.

use hifitime::Epoch;

use crate::constants::{
    ACCURACY_WINDOW_MILLENNIA, DAYS_PER_JULIAN_CENTURY, DAYS_PER_JULIAN_MILLENNIUM, J2000_JDE,
    JDE, Tau,
};
use crate::ephem_errors::EphemError;

/// Validate a time argument before evaluation.
///
/// Non-finite values are rejected. Finite values beyond the nominal accuracy window of the
/// theory are accepted and reported through `tracing::warn!`.
pub fn check_tau(tau: Tau) -> Result<Tau, EphemError> {
    if !tau.is_finite() {
        return Err(EphemError::NonFiniteTime(tau));
    }
    check_accuracy_window(tau);
    Ok(tau)
}

/// `true` if τ lies inside the nominal accuracy window of the theory.
///
/// Outside the window a `warn!` is emitted; the query itself is never refused.
pub fn check_accuracy_window(tau: Tau) -> bool {
    let inside = tau.abs() <= ACCURACY_WINDOW_MILLENNIA;
    if !inside {
        tracing::warn!(
            "τ = {tau} millennia is outside the ±{ACCURACY_WINDOW_MILLENNIA} millennia accuracy window, precision degrades"
        );
    }
    inside
}

/// Julian Ephemeris Day → τ (Julian millennia from J2000.0).
///
/// Errors
/// ------
/// * [`EphemError::NonFiniteTime`] if `jde` is NaN or infinite.
pub fn tau_from_jde(jde: JDE) -> Result<Tau, EphemError> {
    if !jde.is_finite() {
        return Err(EphemError::NonFiniteTime(jde));
    }
    Ok((jde - J2000_JDE) / DAYS_PER_JULIAN_MILLENNIUM)
}

/// τ → Julian Ephemeris Day.
pub fn jde_from_tau(tau: Tau) -> JDE {
    J2000_JDE + tau * DAYS_PER_JULIAN_MILLENNIUM
}

/// τ → T, Julian centuries from J2000.0.
#[inline]
pub fn centuries_from_tau(tau: Tau) -> f64 {
    tau * 10.0
}

/// Julian Ephemeris Day → T, Julian centuries from J2000.0.
#[inline]
pub fn centuries_from_jde(jde: JDE) -> f64 {
    (jde - J2000_JDE) / DAYS_PER_JULIAN_CENTURY
}

/// τ of a [`hifitime::Epoch`], taken on its TDB Julian day.
///
/// Arguments
/// ---------
/// * `epoch`: any hifitime epoch, whatever the time scale it was created in.
///
/// Return
/// ------
/// * τ in Julian millennia from J2000.0 TDB.
pub fn tau_from_epoch(epoch: &Epoch) -> Result<Tau, EphemError> {
    tau_from_jde(epoch.to_jde_tdb_days())
}
