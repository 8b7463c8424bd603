//! # Constants and type definitions for periodic_ephem
//!
//! This module centralizes the **reference epochs**, **time scales**, **conversion factors**,
//! and **type aliases** used throughout the crate.
//!
//! ## Overview
//!
//! - Reference epochs (J2000.0, B1950.0) expressed as Julian Ephemeris Days
//! - Time unit conversions (days ↔ Julian centuries ↔ Julian millennia)
//! - Angle conversions (degrees ↔ radians, arcseconds ↔ radians)
//! - Core type aliases used across the series, frame and facade modules
//!
//! All angles handled by the public API are in **radians** unless a type alias says otherwise.

// -------------------------------------------------------------------------------------------------
// Angle conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric reductions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Degrees → radians
pub const RADEG: f64 = std::f64::consts::PI / 180.0;

/// Arcseconds → radians
pub const RADSEC: f64 = std::f64::consts::PI / 648000.0;

// -------------------------------------------------------------------------------------------------
// Time scale
// -------------------------------------------------------------------------------------------------

/// Julian Ephemeris Day of J2000.0 (2000-01-01 12:00:00 TT)
pub const J2000_JDE: f64 = 2_451_545.0;

/// Julian Ephemeris Day of the Besselian epoch B1950.0
pub const B1950_JDE: f64 = 2_433_282.4235;

/// Number of days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Number of days in a Julian millennium, the native time unit of the VSOP87 series
pub const DAYS_PER_JULIAN_MILLENNIUM: f64 = 365_250.0;

/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Half width of the time window (around J2000, in Julian millennia) over which the
/// VSOP87 theory keeps its nominal accuracy. Queries outside it are logged, not rejected.
pub const ACCURACY_WINDOW_MILLENNIA: f64 = 4.0;

// -------------------------------------------------------------------------------------------------
// Series tables
// -------------------------------------------------------------------------------------------------

/// Scale factor of the raw VSOP87 coefficient dumps (amplitudes are given in 1e-8 rad or au)
pub const VSOP87_SCALE: f64 = 1e-8;

/// Highest power of τ a series may carry
pub const MAX_POWER: usize = 5;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in arcseconds
pub type ArcSec = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Julian Ephemeris Day (TT/TDB)
pub type JDE = f64;
/// Time in Julian millennia from J2000.0
pub type Tau = f64;
