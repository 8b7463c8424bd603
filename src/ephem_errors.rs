use thiserror::Error;

use crate::{bodies::Body, series::Axis};

#[derive(Error, Debug)]
pub enum EphemError {
    #[error("Malformed series table: {0}")]
    MalformedTable(String),

    #[error("Non-finite coefficient in series {axis}{power}, term #{index}")]
    NonFiniteCoefficient {
        axis: Axis,
        power: usize,
        index: usize,
    },

    #[error("Power index {power} out of range for axis {axis} (max {max})")]
    PowerOutOfRange { axis: Axis, power: usize, max: usize },

    #[error("Series {axis}{power} appears more than once in the table")]
    DuplicatedSeries { axis: Axis, power: usize },

    #[error("Non-finite time argument: {0}")]
    NonFiniteTime(f64),

    #[error("Degenerate position: radius is zero, longitude and latitude are undefined")]
    DegenerateRadius,

    #[error("Invalid truncation spec: {0}")]
    InvalidTruncationSpec(String),

    #[error("No series table registered for body {0}")]
    MissingBody(Body),

    #[error("Eccentricity {0} outside the elliptic range [0, 1)")]
    InvalidEccentricity(f64),

    #[error("ROOTS finding error: {0}")]
    RootFindingError(#[from] roots::SearchError),

    #[error("Error while reading or writing a CSV table: {0}")]
    CsvTableError(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for EphemError {
    fn eq(&self, other: &Self) -> bool {
        use EphemError::*;
        match (self, other) {
            (MalformedTable(a), MalformedTable(b)) => a == b,
            (
                NonFiniteCoefficient {
                    axis: a1,
                    power: p1,
                    index: i1,
                },
                NonFiniteCoefficient {
                    axis: a2,
                    power: p2,
                    index: i2,
                },
            ) => a1 == a2 && p1 == p2 && i1 == i2,
            (
                PowerOutOfRange {
                    axis: a1,
                    power: p1,
                    max: m1,
                },
                PowerOutOfRange {
                    axis: a2,
                    power: p2,
                    max: m2,
                },
            ) => a1 == a2 && p1 == p2 && m1 == m2,
            (
                DuplicatedSeries {
                    axis: a1,
                    power: p1,
                },
                DuplicatedSeries {
                    axis: a2,
                    power: p2,
                },
            ) => a1 == a2 && p1 == p2,
            (NonFiniteTime(a), NonFiniteTime(b)) => a.to_bits() == b.to_bits(),
            (InvalidTruncationSpec(a), InvalidTruncationSpec(b)) => a == b,
            (MissingBody(a), MissingBody(b)) => a == b,
            (InvalidEccentricity(a), InvalidEccentricity(b)) => a == b,
            (RootFindingError(a), RootFindingError(b)) => a == b,

            // Foreign errors are not comparable: same variant means equal
            (CsvTableError(_), CsvTableError(_)) => true,
            (IoError(_), IoError(_)) => true,

            (DegenerateRadius, DegenerateRadius) => true,

            _ => false,
        }
    }
}
