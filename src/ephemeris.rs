//! # Ephemeris: catalog, configuration and planet facades
//!
//! [`Ephemeris`] is the central context of the crate. It owns:
//!
//! 1. a [`BodyCatalog`] of coefficient tables, built from the bundled VSOP87D tables and
//!    optionally truncated once at construction,
//! 2. the obliquity model used for ecliptic → equatorial conversions,
//! 3. the constant J2000 rotations between the mean ecliptic and the mean equator.
//!
//! It hands out [`Planet`] facades that share the catalog tables. No position is cached.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use periodic_ephem::bodies::Body;
//! use periodic_ephem::ephemeris::{Ephemeris, EphemerisConfig};
//! use periodic_ephem::series::truncation::TruncationSpec;
//! use periodic_ephem::time::tau_from_jde;
//!
//! let config = EphemerisConfig {
//!     truncation: Some(TruncationSpec::new(0.5, 0.5, 1e-6, 10.0).unwrap()),
//!     ..Default::default()
//! };
//! let ephem = Ephemeris::new(&config).unwrap();
//!
//! let tau = tau_from_jde(2448976.5).unwrap();
//! let venus = ephem.planet(Body::Venus).unwrap();
//! let helio = venus.position_at_epoch(tau).unwrap();
//! let (l, b) = venus.to_fk5(helio.longitude, helio.latitude, tau).unwrap();
//!
//! let radec = ephem.geocentric_equatorial(Body::Venus, tau).unwrap();
//! ```

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::bodies::{Body, BodyCatalog};
use crate::constants::{Radian, Tau};
use crate::coordinates::SphericalPosition;
use crate::ephem_errors::EphemError;
use crate::geocentric::geometric_sun;
use crate::planet::{Planet, PositionSource};
use crate::ref_system::{
    ecliptic_to_equatorial, mean_obliquity, rotpn, Equinox, ObliquityModel, RefSystem,
};
use crate::series::truncation::TruncationSpec;

/// Obliquity model selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ObliquitySetting {
    /// IAU 1976 mean obliquity of date
    #[default]
    Mean,
    /// Constant obliquity
    Fixed { radians: Radian },
}

impl ObliquityModel for ObliquitySetting {
    fn obliquity(&self, tau: Tau) -> Radian {
        match *self {
            ObliquitySetting::Mean => mean_obliquity(tau),
            ObliquitySetting::Fixed { radians } => radians,
        }
    }
}

/// Construction parameters of an [`Ephemeris`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EphemerisConfig {
    /// Truncation applied once to every table; `None` keeps the full tables.
    pub truncation: Option<TruncationSpec>,
    pub obliquity: ObliquitySetting,
}

#[derive(Debug, Clone)]
pub struct Ephemeris {
    catalog: BodyCatalog,
    obliquity: ObliquitySetting,
    rot_equmj2000_to_eclmj2000: Matrix3<f64>,
    rot_eclmj2000_to_equmj2000: Matrix3<f64>,
}

impl Ephemeris {
    /// Build the context from the bundled tables.
    ///
    /// Arguments
    /// ---------
    /// * `config`: truncation and obliquity settings.
    ///
    /// Return
    /// ------
    /// * A new [`Ephemeris`], or [`EphemError::InvalidTruncationSpec`] if the configured
    ///   truncation is out of range.
    pub fn new(config: &EphemerisConfig) -> Result<Self, EphemError> {
        Ephemeris::with_catalog(BodyCatalog::with_builtin()?, config)
    }

    /// Build the context around a caller-supplied catalog.
    pub fn with_catalog(
        catalog: BodyCatalog,
        config: &EphemerisConfig,
    ) -> Result<Self, EphemError> {
        let catalog = match &config.truncation {
            Some(spec) => catalog.truncated(spec)?,
            None => catalog,
        };

        let obliquity = config.obliquity;
        let rot1 = rotpn(
            &RefSystem::Equm(Equinox::J2000),
            &RefSystem::Eclm(Equinox::J2000),
            &obliquity,
        )?;
        let rot2 = rotpn(
            &RefSystem::Eclm(Equinox::J2000),
            &RefSystem::Equm(Equinox::J2000),
            &obliquity,
        )?;

        tracing::debug!(
            "Ephemeris ready with bodies {:?} ({} truncation, {:?} obliquity)",
            catalog.bodies(),
            if config.truncation.is_some() { "with" } else { "no" },
            obliquity
        );

        Ok(Ephemeris {
            catalog,
            obliquity,
            rot_equmj2000_to_eclmj2000: rot1,
            rot_eclmj2000_to_equmj2000: rot2,
        })
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    pub fn obliquity(&self) -> &ObliquitySetting {
        &self.obliquity
    }

    /// Rotation from the mean equator of J2000 to the mean ecliptic of J2000.
    pub fn get_rot_equmj2000_to_eclmj2000(&self) -> &Matrix3<f64> {
        &self.rot_equmj2000_to_eclmj2000
    }

    pub fn get_rot_eclmj2000_to_equmj2000(&self) -> &Matrix3<f64> {
        &self.rot_eclmj2000_to_equmj2000
    }

    /// Facade of one body, sharing the catalog table.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::MissingBody`] if the catalog has no table for `body`.
    pub fn planet(&self, body: Body) -> Result<Planet, EphemError> {
        Planet::from_catalog(&self.catalog, body)
    }

    pub fn earth(&self) -> Result<Planet, EphemError> {
        self.planet(Body::Earth)
    }

    /// Geometric geocentric Sun (λ, β, R), ecliptic and equinox of date.
    pub fn sun_position(&self, tau: Tau) -> Result<SphericalPosition, EphemError> {
        Ok(geometric_sun(&self.earth()?.heliocentric_position(tau)?))
    }

    /// Geocentric ecliptic position of a body, ecliptic and equinox of date.
    pub fn geocentric_position(
        &self,
        body: Body,
        tau: Tau,
        light_time: bool,
    ) -> Result<SphericalPosition, EphemError> {
        let earth = self.earth()?;
        self.planet(body)?.geocentric_position(&earth, tau, light_time)
    }

    /// Geocentric equatorial position (α, δ, Δ) of a body, with the configured obliquity.
    ///
    /// For the Earth itself the equatorial position of the Sun is returned.
    pub fn geocentric_equatorial(
        &self,
        body: Body,
        tau: Tau,
    ) -> Result<SphericalPosition, EphemError> {
        if body == Body::Earth {
            let sun = self.sun_position(tau)?;
            return Ok(ecliptic_to_equatorial(&sun, self.obliquity.obliquity(tau)));
        }
        let earth = self.earth()?;
        self.planet(body)?
            .geocentric_equatorial(&earth, tau, &self.obliquity)
    }
}
