//! # FK5 correction
//!
//! The VSOP87 series are referred to the dynamical ecliptic and equinox. Aligning them with
//! the FK5 catalog frame needs a small empirical correction:
//!
//! ```text
//! L′ = L − 1.397° T − 0.00031° T²
//! ΔL = −0.09033″ + 0.03916″ (cos L′ + sin L′) tan B
//! ΔB = +0.03916″ (cos L′ − sin L′)
//! ```
//!
//! with `T = 10 τ` in Julian centuries. The correction is below 0.1″ and only matters for
//! high-accuracy work; it is never applied implicitly.

use crate::constants::{Radian, Tau, RADEG, RADSEC};
use crate::coordinates::SphericalPosition;
use crate::ephem_errors::EphemError;
use crate::time::{centuries_from_tau, check_tau};

/// Corrections `(ΔL, ΔB)` in radians to add to a dynamical (L, B).
pub fn fk5_correction(
    longitude: Radian,
    latitude: Radian,
    tau: Tau,
) -> Result<(Radian, Radian), EphemError> {
    let t = centuries_from_tau(check_tau(tau)?);
    let l_prime = longitude - (1.397 * t + 0.00031 * t * t) * RADEG;
    let (sin_lp, cos_lp) = l_prime.sin_cos();

    let delta_l = (-0.09033 + 0.03916 * (cos_lp + sin_lp) * latitude.tan()) * RADSEC;
    let delta_b = 0.03916 * (cos_lp - sin_lp) * RADSEC;

    Ok((delta_l, delta_b))
}

/// Position with the FK5 correction applied to its angles. The radius is unchanged.
pub fn to_fk5(pos: &SphericalPosition, tau: Tau) -> Result<SphericalPosition, EphemError> {
    let (dl, db) = fk5_correction(pos.longitude, pos.latitude, tau)?;
    Ok(SphericalPosition::new(
        pos.longitude + dl,
        pos.latitude + db,
        pos.radius,
    ))
}

#[cfg(test)]
mod fk5_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fk5_venus() {
        let tau = (2448976.5 - 2451545.0) / 365250.0;
        let pos = SphericalPosition::from_degrees(26.11428357192017, -2.620703102703073, 0.72);
        let (dl, db) = fk5_correction(pos.longitude, pos.latitude, tau).unwrap();
        assert_relative_eq!(dl / RADSEC, -0.0927298, epsilon = 1e-6);
        assert_relative_eq!(db / RADSEC, 0.0178358, epsilon = 1e-6);

        let fk5 = to_fk5(&pos, tau).unwrap();
        assert_relative_eq!(fk5.longitude_deg(), 26.1142578136, epsilon = 1e-9);
        assert_relative_eq!(fk5.latitude_deg(), -2.6206981483, epsilon = 1e-9);
        assert_eq!(fk5.radius, 0.72);
    }

    #[test]
    fn test_fk5_sun() {
        // geometric Sun, 1992 October 13.0 TD
        let tau = (2448908.5 - 2451545.0) / 365250.0;
        let pos = SphericalPosition::new(199.9073719907252 * RADEG, 3.124357598329899e-06, 1.0);
        let fk5 = to_fk5(&pos, tau).unwrap();
        assert_relative_eq!(fk5.longitude_deg(), 199.907346899, epsilon = 1e-9);
        assert_relative_eq!(fk5.latitude / RADSEC, 0.62105, epsilon = 1e-5);
    }

    #[test]
    fn test_fk5_is_small() {
        for k in 0..36 {
            let l = k as f64 * 10.0 * RADEG;
            let (dl, db) = fk5_correction(l, 0.05, 0.1).unwrap();
            assert!(dl.abs() < 0.1 * RADSEC);
            assert!(db.abs() < 0.06 * RADSEC);
        }
    }

    #[test]
    fn test_non_finite_time() {
        let pos = SphericalPosition::new(0.45, -0.045, 0.72);
        for tau in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                fk5_correction(pos.longitude, pos.latitude, tau),
                Err(EphemError::NonFiniteTime(_))
            ));
            assert!(matches!(to_fk5(&pos, tau), Err(EphemError::NonFiniteTime(_))));
        }
    }
}
