//! # CSV persistence of series tables
//!
//! A table is stored as one CSV row per term:
//!
//! ```text
//! axis,power,amplitude,phase,frequency
//! L,0,1.75347046,0.0,0.0
//! L,0,0.03341656,4.6692568,6283.07585
//! ...
//! ```
//!
//! Amplitudes are written in physical units (radians or au), so a table written by
//! [`write_table_csv`] and read back by [`read_table_csv`] is identical to the original,
//! term order included. This is how a truncated table is persisted between runs.
//!
//! [`read_vsop87_file`] reads the spherical versions (B and D) of the files distributed by the
//! Bureau des longitudes, e.g. `VSOP87D.ven`, so the complete theory can replace a bundled
//! abridged table.

use std::io::{BufRead, Read, Write};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::ephem_errors::EphemError;
use crate::series::{Axis, Series, Table, Term};

/// One CSV row: a term together with the series it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub axis: Axis,
    pub power: usize,
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

/// Read a table from CSV rows.
///
/// Rows of the same `(axis, power)` do not need to be contiguous; their relative order is kept.
///
/// Errors
/// ------
/// * [`EphemError::CsvTableError`] on malformed CSV or unknown axis labels.
/// * [`EphemError::NonFiniteCoefficient`] / [`EphemError::PowerOutOfRange`] on invalid values.
pub fn read_table_csv<R: Read>(reader: R) -> Result<Table, EphemError> {
    let mut rdr = csv::Reader::from_reader(reader);

    let records = rdr
        .deserialize::<TermRecord>()
        .collect::<Result<Vec<_>, _>>()?;
    let nb_rows = records.len();

    let series = records
        .into_iter()
        .into_group_map_by(|r| (r.axis, r.power))
        .into_iter()
        .sorted_by_key(|(key, _)| *key)
        .map(|((axis, power), rows)| {
            let terms = rows
                .iter()
                .enumerate()
                .map(|(index, r)| {
                    Term::new(r.amplitude, r.phase, r.frequency).ok_or(
                        EphemError::NonFiniteCoefficient {
                            axis,
                            power,
                            index,
                        },
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            Series::new(axis, power, terms)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Read {nb_rows} CSV rows into {} series",
        series.len()
    );

    Table::new(series)
}

/// Write a table as CSV rows, axis by axis, power by power, in stored term order.
pub fn write_table_csv<W: Write>(table: &Table, writer: W) -> Result<(), EphemError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for series in table.iter_series() {
        for term in series.terms() {
            wtr.serialize(TermRecord {
                axis: series.axis(),
                power: series.power(),
                amplitude: term.amplitude(),
                phase: term.phase(),
                frequency: term.frequency(),
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Decode the fixed columns `1..5` of a VSOP87 term line: version, body, coordinate, power.
fn vsop87_line_key(line: &str, line_no: usize) -> Result<(Axis, usize), EphemError> {
    let digits = line
        .get(1..5)
        .map(|field| field.chars().map(|c| c.to_digit(10)).collect::<Option<Vec<_>>>())
        .ok_or_else(|| EphemError::MalformedTable(format!("line {line_no}: too short")))?
        .ok_or_else(|| EphemError::MalformedTable(format!("line {line_no}: bad term header")))?;

    // only the spherical versions carry (L, B, R)
    if digits[0] != 2 && digits[0] != 4 {
        return Err(EphemError::MalformedTable(format!(
            "line {line_no}: VSOP87 version {} is not spherical",
            digits[0]
        )));
    }
    let axis = match digits[2] {
        1 => Axis::Longitude,
        2 => Axis::Latitude,
        3 => Axis::Radius,
        c => {
            return Err(EphemError::MalformedTable(format!(
                "line {line_no}: unknown coordinate index {c}"
            )))
        }
    };
    Ok((axis, digits[3] as usize))
}

/// Read a table from a VSOP87 file in its native ASCII layout.
///
/// Header lines (`VSOP87 VERSION ...`) are skipped. On each term line the columns `1..5`
/// give the version, body, coordinate and power, and the last three fields are the
/// amplitude `A` (rad or au), the phase `B` (rad) and the frequency `C` (rad per millennium).
///
/// Errors
/// ------
/// * [`EphemError::MalformedTable`] on a line that cannot be decoded or a non spherical version.
/// * [`EphemError::IoError`] if the reader fails.
pub fn read_vsop87_file<R: BufRead>(reader: R) -> Result<Table, EphemError> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        if line.trim().is_empty() || line.trim_start().starts_with("VSOP87") {
            continue;
        }

        let key = vsop87_line_key(&line, line_no)?;
        let fields = line.split_whitespace().collect::<Vec<_>>();
        let abc = match fields.as_slice() {
            [.., a, b, c] => [a, b, c]
                .iter()
                .map(|f| f.parse::<f64>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| EphemError::MalformedTable(format!("line {line_no}: {e}")))?,
            _ => {
                return Err(EphemError::MalformedTable(format!(
                    "line {line_no}: expected A, B and C"
                )))
            }
        };
        rows.push((key, [abc[0], abc[1], abc[2]]));
    }

    let series = rows
        .into_iter()
        .into_group_map_by(|(key, _)| *key)
        .into_iter()
        .sorted_by_key(|(key, _)| *key)
        .map(|((axis, power), terms)| {
            let raw = terms.iter().map(|(_, abc)| *abc).collect::<Vec<_>>();
            Series::from_raw(axis, power, &raw, 1.0)
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Read {} VSOP87 terms into {} series",
        series.iter().map(Series::len).sum::<usize>(),
        series.len()
    );

    Table::new(series)
}
