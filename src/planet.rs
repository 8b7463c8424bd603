//! # Position sources and the planet facade
//!
//! [`PositionSource`] is the capability "produces heliocentric (L, B, R) at τ". Two independent
//! implementations exist:
//!
//! - [`Planet`], backed by a series [`Table`],
//! - [`MeanOrbitalElements`](crate::orbital_elements::MeanOrbitalElements), backed by mean
//!   orbital elements and Kepler's equation.
//!
//! Geocentric computations only depend on the capability, so both variants can be mixed
//! (e.g. a series-backed target seen from an element-backed Earth).
//!
//! [`Planet`] binds one body to one shared table and exposes the usual queries: position of
//! date, position referred to J2000, FK5 correction, rectangular and geocentric positions.
//! Nothing is cached; every call evaluates the series again.

use std::sync::Arc;

use nalgebra::Vector3;

use crate::bodies::{Body, BodyCatalog};
use crate::constants::{Radian, Tau};
use crate::coordinates::SphericalPosition;
use crate::ephem_errors::EphemError;
use crate::fk5::fk5_correction;
use crate::geocentric::geocentric_position;
use crate::ref_system::{ecliptic_to_equatorial, precess_ecliptic, Equinox, ObliquityModel};
use crate::series::evaluator::evaluate_position;
use crate::series::Table;

/// Anything able to produce a heliocentric ecliptic position at τ.
pub trait PositionSource {
    /// Body described by the source.
    fn body(&self) -> Body;

    /// Heliocentric (L, B, R) referred to the mean ecliptic and equinox of date.
    ///
    /// Arguments
    /// ---------
    /// * `tau`: Julian millennia from J2000.0 (TT/TDB).
    ///
    /// Errors
    /// ------
    /// * [`EphemError::NonFiniteTime`] if τ is NaN or infinite.
    fn heliocentric_position(&self, tau: Tau) -> Result<SphericalPosition, EphemError>;
}

/// Series-backed facade of one body.
#[derive(Debug, Clone)]
pub struct Planet {
    body: Body,
    table: Arc<Table>,
}

impl Planet {
    pub fn new(body: Body, table: Arc<Table>) -> Self {
        Planet { body, table }
    }

    /// Facade bound to the catalog table of `body`.
    pub fn from_catalog(catalog: &BodyCatalog, body: Body) -> Result<Self, EphemError> {
        Ok(Planet::new(body, catalog.table(body)?))
    }

    pub fn body(&self) -> Body {
        self.body
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Direct series evaluation: (L, B, R) referred to the dynamical equinox of date.
    ///
    /// The longitude is returned as summed, without reduction to `[0, 2π)`.
    pub fn position_at_epoch(&self, tau: Tau) -> Result<SphericalPosition, EphemError> {
        evaluate_position(&self.table, tau)
    }

    /// (L, B, R) referred to the mean ecliptic and equinox of J2000.0.
    pub fn position_at_j2000(&self, tau: Tau) -> Result<SphericalPosition, EphemError> {
        let of_date = self.position_at_epoch(tau)?;
        precess_ecliptic(&of_date.normalized(), &Equinox::of_date(tau), &Equinox::J2000)
    }

    /// FK5-corrected longitude and latitude.
    pub fn to_fk5(
        &self,
        longitude: Radian,
        latitude: Radian,
        tau: Tau,
    ) -> Result<(Radian, Radian), EphemError> {
        let (dl, db) = fk5_correction(longitude, latitude, tau)?;
        Ok((longitude + dl, latitude + db))
    }

    /// Heliocentric rectangular position, ecliptic and equinox of date, in au.
    pub fn rectangular_at_epoch(&self, tau: Tau) -> Result<Vector3<f64>, EphemError> {
        Ok(self.position_at_epoch(tau)?.to_rectangular())
    }

    /// Geocentric ecliptic position (λ, β, Δ) of date, optionally corrected for light-time.
    pub fn geocentric_position<E>(
        &self,
        earth: &E,
        tau: Tau,
        light_time: bool,
    ) -> Result<SphericalPosition, EphemError>
    where
        E: PositionSource + ?Sized,
    {
        geocentric_position(self, earth, tau, light_time)
    }

    /// Geometric geocentric equatorial position (α, δ, Δ) of date.
    ///
    /// The ecliptic position is rotated by the obliquity the model returns at τ; pass a true
    /// obliquity model to refer the result to the true equator.
    pub fn geocentric_equatorial<E, O>(
        &self,
        earth: &E,
        tau: Tau,
        obliquity: &O,
    ) -> Result<SphericalPosition, EphemError>
    where
        E: PositionSource + ?Sized,
        O: ObliquityModel + ?Sized,
    {
        let ecliptic = self.geocentric_position(earth, tau, false)?;
        Ok(ecliptic_to_equatorial(&ecliptic, obliquity.obliquity(tau)))
    }
}

impl PositionSource for Planet {
    fn body(&self) -> Body {
        self.body
    }

    fn heliocentric_position(&self, tau: Tau) -> Result<SphericalPosition, EphemError> {
        self.position_at_epoch(tau)
    }
}

#[cfg(test)]
mod planet_test {
    use super::*;
    use crate::constants::DPI;
    use approx::assert_relative_eq;

    fn venus() -> Planet {
        let catalog = BodyCatalog::with_builtin().unwrap();
        Planet::from_catalog(&catalog, Body::Venus).unwrap()
    }

    #[test]
    fn test_missing_body() {
        let catalog = BodyCatalog::new();
        assert_eq!(
            Planet::from_catalog(&catalog, Body::Saturn).unwrap_err(),
            EphemError::MissingBody(Body::Saturn)
        );
    }

    #[test]
    fn test_position_at_epoch_is_raw() {
        let tau = (2448976.5 - 2451545.0) / 365250.0;
        let pos = venus().position_at_epoch(tau).unwrap();
        assert_relative_eq!(pos.longitude, -68.65925814884598, epsilon = 1e-12);
        assert_relative_eq!(pos.latitude.to_degrees(), -2.620703102703073, epsilon = 1e-10);
        assert_relative_eq!(pos.radius, 0.7246029367165298, epsilon = 1e-12);
    }

    #[test]
    fn test_position_at_j2000() {
        let tau = (2448976.5 - 2451545.0) / 365250.0;
        let pos = venus().position_at_j2000(tau).unwrap();
        assert_relative_eq!(pos.longitude_deg(), 26.212555337, epsilon = 1e-8);
        assert_relative_eq!(pos.latitude_deg(), -2.620225823, epsilon = 1e-8);
        assert_relative_eq!(pos.radius, 0.7246029367165298, epsilon = 1e-12);

        // J2000 itself: of date and J2000 frames coincide
        let p = venus();
        let a = p.position_at_j2000(0.0).unwrap();
        let b = p.position_at_epoch(0.0).unwrap();
        assert_relative_eq!(a.longitude, b.longitude.rem_euclid(DPI), epsilon = 1e-14);
    }

    #[test]
    fn test_rectangular_matches_spherical() {
        let p = venus();
        let v = p.rectangular_at_epoch(0.05).unwrap();
        let s = p.position_at_epoch(0.05).unwrap();
        assert_relative_eq!(v.norm(), s.radius, epsilon = 1e-14);
    }

    #[test]
    fn test_to_fk5() {
        let tau = (2448976.5 - 2451545.0) / 365250.0;
        let (l, b) = venus().to_fk5(
            26.11428357192017_f64.to_radians(),
            -2.620703102703073_f64.to_radians(),
            tau,
        )
        .unwrap();
        assert_relative_eq!(l.to_degrees(), 26.1142578136, epsilon = 1e-9);
        assert_relative_eq!(b.to_degrees(), -2.6206981483, epsilon = 1e-9);
    }

    #[test]
    fn test_to_fk5_non_finite_time() {
        let p = venus();
        for tau in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                p.to_fk5(0.4, -0.04, tau),
                Err(EphemError::NonFiniteTime(_))
            ));
        }
    }
}
