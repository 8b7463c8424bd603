//! # Bundled VSOP87D tables
//!
//! Abridged VSOP87D coefficients (Bretagnon & Francou 1988, as tabulated in Meeus,
//! *Astronomical Algorithms*, Appendix III) for the bodies shipped with the crate.
//!
//! These abridged tables reproduce the full theory to about one arcsecond over a few
//! millennia around J2000. Other bodies, or the complete theory, are registered by the caller
//! from a CSV dump ([`crate::series::table_io::read_table_csv`]) or an original VSOP87 file
//! ([`crate::series::table_io::read_vsop87_file`]).

mod earth;
mod venus;

use crate::bodies::Body;
use crate::constants::VSOP87_SCALE;
use crate::ephem_errors::EphemError;
use crate::series::{Axis, Table};

type RawBlock = (Axis, usize, &'static [[f64; 3]]);

const EARTH_BLOCKS: &[RawBlock] = &[
    (Axis::Longitude, 0, earth::L0),
    (Axis::Longitude, 1, earth::L1),
    (Axis::Longitude, 2, earth::L2),
    (Axis::Longitude, 3, earth::L3),
    (Axis::Longitude, 4, earth::L4),
    (Axis::Longitude, 5, earth::L5),
    (Axis::Latitude, 0, earth::B0),
    (Axis::Latitude, 1, earth::B1),
    (Axis::Radius, 0, earth::R0),
    (Axis::Radius, 1, earth::R1),
    (Axis::Radius, 2, earth::R2),
    (Axis::Radius, 3, earth::R3),
    (Axis::Radius, 4, earth::R4),
];

const VENUS_BLOCKS: &[RawBlock] = &[
    (Axis::Longitude, 0, venus::L0),
    (Axis::Longitude, 1, venus::L1),
    (Axis::Longitude, 2, venus::L2),
    (Axis::Longitude, 3, venus::L3),
    (Axis::Longitude, 4, venus::L4),
    (Axis::Longitude, 5, venus::L5),
    (Axis::Latitude, 0, venus::B0),
    (Axis::Latitude, 1, venus::B1),
    (Axis::Latitude, 2, venus::B2),
    (Axis::Latitude, 3, venus::B3),
    (Axis::Latitude, 4, venus::B4),
    (Axis::Radius, 0, venus::R0),
    (Axis::Radius, 1, venus::R1),
    (Axis::Radius, 2, venus::R2),
    (Axis::Radius, 3, venus::R3),
    (Axis::Radius, 4, venus::R4),
];

/// Bodies with a bundled table.
pub const BUILTIN_BODIES: [Body; 2] = [Body::Earth, Body::Venus];

/// Abridged VSOP87D table of the Earth.
pub fn earth_table() -> Result<Table, EphemError> {
    Table::from_raw(EARTH_BLOCKS, VSOP87_SCALE)
}

/// Abridged VSOP87D table of Venus.
pub fn venus_table() -> Result<Table, EphemError> {
    Table::from_raw(VENUS_BLOCKS, VSOP87_SCALE)
}

/// Bundled table of a body, `None` if the crate does not ship one.
pub fn builtin_table(body: Body) -> Option<Result<Table, EphemError>> {
    match body {
        Body::Earth => Some(earth_table()),
        Body::Venus => Some(venus_table()),
        _ => None,
    }
}
