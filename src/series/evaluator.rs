//! # Series evaluator
//!
//! Sums a [`Table`] at a time argument τ (Julian millennia from J2000.0):
//!
//! ```text
//! X(τ) = S₀(τ) + τ·(S₁(τ) + τ·(S₂(τ) + … + τ·Sₖ(τ)))
//! ```
//!
//! The powers are folded from the highest down (Horner form). Axes are evaluated
//! independently and only combined into a [`SphericalPosition`] at the end.
//!
//! The evaluator does not know about calendars: callers convert their date to τ beforehand
//! (see [`crate::time`]). Results are returned in the table's raw units: radians for
//! longitude and latitude (longitude is **not** reduced to `[0, 2π)`), au for the radius.

use crate::coordinates::SphericalPosition;
use crate::ephem_errors::EphemError;
use crate::series::{Axis, Table};
use crate::time::check_tau;

/// Evaluate one axis of a table at τ.
///
/// A missing axis evaluates to `0.0`, as does a missing power.
pub fn evaluate_axis(table: &Table, axis: Axis, tau: f64) -> f64 {
    table
        .series(axis)
        .iter()
        .rev()
        .fold(0.0, |acc, series| acc * tau + series.evaluate(tau))
}

/// Evaluate the three axes of a table at τ.
///
/// Arguments
/// ---------
/// * `table`: a structurally valid table.
/// * `tau`: time in Julian millennia from J2000.0 (TT/TDB).
///
/// Return
/// ------
/// * `(L, B, R)` with L and B in radians (raw, unreduced) and R in the table's unit.
///
/// Errors
/// ------
/// * [`EphemError::NonFiniteTime`] if τ is NaN or infinite.
///
/// Remarks
/// -------
/// * τ outside the fitted range of the theory is accepted: the result degrades gracefully.
///   A `warn!` is emitted through `tracing` when |τ| exceeds the nominal accuracy window.
pub fn evaluate_position(table: &Table, tau: f64) -> Result<SphericalPosition, EphemError> {
    check_tau(tau)?;

    Ok(SphericalPosition::new(
        evaluate_axis(table, Axis::Longitude, tau),
        evaluate_axis(table, Axis::Latitude, tau),
        evaluate_axis(table, Axis::Radius, tau),
    ))
}

#[cfg(test)]
mod evaluator_test {
    use super::*;
    use approx::assert_relative_eq;

    fn polynomial_table() -> Table {
        // Constant terms only: L(τ) = 1 + 2τ + 3τ², R(τ) = 5
        let l0: &[[f64; 3]] = &[[1.0, 0.0, 0.0]];
        let l1: &[[f64; 3]] = &[[2.0, 0.0, 0.0]];
        let l2: &[[f64; 3]] = &[[3.0, 0.0, 0.0]];
        let r0: &[[f64; 3]] = &[[5.0, 0.0, 0.0]];
        Table::from_raw(
            &[
                (Axis::Longitude, 0, l0),
                (Axis::Longitude, 1, l1),
                (Axis::Longitude, 2, l2),
                (Axis::Radius, 0, r0),
            ],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_horner_matches_polynomial() {
        let table = polynomial_table();
        let tau = 0.37;
        assert_relative_eq!(
            evaluate_axis(&table, Axis::Longitude, tau),
            1.0 + 2.0 * tau + 3.0 * tau * tau,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_missing_axis_is_zero() {
        let table = polynomial_table();
        let pos = evaluate_position(&table, -0.2).unwrap();
        assert_eq!(pos.latitude, 0.0);
        assert_eq!(pos.radius, 5.0);
    }

    #[test]
    fn test_empty_table() {
        let pos = evaluate_position(&Table::default(), 0.5).unwrap();
        assert_eq!(pos, SphericalPosition::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_non_finite_tau() {
        let table = polynomial_table();
        assert_eq!(
            evaluate_position(&table, f64::INFINITY),
            Err(EphemError::NonFiniteTime(f64::INFINITY))
        );
        assert!(matches!(
            evaluate_position(&table, f64::NAN),
            Err(EphemError::NonFiniteTime(_))
        ));
    }

    #[test]
    fn test_far_tau_is_not_rejected() {
        let table = polynomial_table();
        let pos = evaluate_position(&table, 12.0).unwrap();
        assert_relative_eq!(pos.longitude, 1.0 + 24.0 + 432.0);
    }

    #[test]
    fn test_bit_reproducible() {
        let table = polynomial_table();
        let a = evaluate_position(&table, 0.123456789).unwrap();
        let b = evaluate_position(&table, 0.123456789).unwrap();
        assert_eq!(a.longitude.to_bits(), b.longitude.to_bits());
        assert_eq!(a.radius.to_bits(), b.radius.to_bits());
    }
}
