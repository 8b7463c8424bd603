//! # periodic_ephem
//!
//! Planetary positions from truncated periodic series of the VSOP87 family.
//!
//! A body's heliocentric ecliptic coordinates (L, B, R) are sums of terms
//! `A · cos(B + C·τ)` multiplied by powers of τ, the time in Julian millennia from J2000.0.
//! The crate covers the whole chain:
//!
//! - [`series`]: the term / series / table model, the truncation engine, the Horner evaluator
//!   and CSV persistence of tables,
//! - [`coordinates`], [`ref_system`], [`fk5`], [`geocentric`]: the frame transform pipeline
//!   (rectangular ↔ spherical, ecliptic ↔ equatorial, precession, FK5 correction,
//!   heliocentric → geocentric with light-time),
//! - [`bodies`], [`planet`], [`orbital_elements`], [`ephemeris`]: body catalog, position
//!   sources and the planet facade,
//! - [`vsop87d`]: bundled abridged tables for the Earth and Venus,
//! - [`time`]: τ from Julian days or [`hifitime::Epoch`].
//!
//! ```rust, no_run
//! use periodic_ephem::bodies::Body;
//! use periodic_ephem::ephemeris::{Ephemeris, EphemerisConfig};
//! use periodic_ephem::time::tau_from_jde;
//!
//! let ephem = Ephemeris::new(&EphemerisConfig::default()).unwrap();
//! let tau = tau_from_jde(2448976.5).unwrap();
//! let venus = ephem.planet(Body::Venus).unwrap();
//! let pos = venus.position_at_epoch(tau).unwrap().normalized();
//! println!("L = {:.5}°, B = {:.5}°, R = {:.6} au", pos.longitude_deg(), pos.latitude_deg(), pos.radius);
//! ```

pub mod bodies;
pub mod constants;
pub mod coordinates;
pub mod ephem_errors;
pub mod ephemeris;
pub mod fk5;
pub mod geocentric;
pub mod orbital_elements;
pub mod planet;
pub mod ref_system;
pub mod series;
pub mod time;
pub mod vsop87d;
