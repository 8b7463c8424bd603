//! # Periodic series model
//!
//! This module defines the atomic data structures of the crate:
//!
//! - [`Term`] – one periodic summand `A · cos(B + C·τ)`,
//! - [`Series`] – an ordered list of terms attached to one coordinate [`Axis`] and one power of τ,
//! - [`Table`] – the per-body mapping `axis → [Series₀, Series₁, …, Seriesₖ]`.
//!
//! A body's coordinate on one axis is the polynomial in τ
//!
//! ```text
//! X(τ) = Σₙ τⁿ · Σ_terms Aᵢ · cos(Bᵢ + Cᵢ · τ)
//! ```
//!
//! where τ is measured in Julian millennia from J2000.0.
//!
//! ## Invariants
//!
//! - Amplitudes are stored **non-negative**; a negative source amplitude is folded into the phase.
//! - Coefficients are finite; structurally invalid tables are rejected at construction time,
//!   never at evaluation time.
//! - A [`Table`] is immutable once built. Share it through [`std::sync::Arc`] to bind it to
//!   several facades.
//! - Terms keep their source order, so that summation is bit-reproducible.
//!
//! ## Submodules
//!
//! - [`truncation`] – worst-case driven reduction of a table,
//! - [`evaluator`] – Horner evaluation of a whole table at τ,
//! - [`table_io`] – CSV persistence of (possibly truncated) tables.

pub mod evaluator;
pub mod table_io;
pub mod truncation;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::constants::MAX_POWER;
use crate::ephem_errors::EphemError;

/// Coordinate component carried by a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Axis {
    /// Heliocentric ecliptic longitude L (radians)
    #[serde(rename = "L")]
    Longitude,
    /// Heliocentric ecliptic latitude B (radians)
    #[serde(rename = "B")]
    Latitude,
    /// Radius vector R (au)
    #[serde(rename = "R")]
    Radius,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::Longitude, Axis::Latitude, Axis::Radius];

    /// `true` for the angular axes (L, B), whose amplitudes are in radians.
    pub fn is_angular(&self) -> bool {
        matches!(self, Axis::Longitude | Axis::Latitude)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Axis::Longitude => "L",
            Axis::Latitude => "B",
            Axis::Radius => "R",
        };
        write!(f, "{letter}")
    }
}

impl FromStr for Axis {
    type Err = EphemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(Axis::Longitude),
            "B" | "b" => Ok(Axis::Latitude),
            "R" | "r" => Ok(Axis::Radius),
            other => Err(EphemError::MalformedTable(format!(
                "unknown axis label '{other}'"
            ))),
        }
    }
}

/// One periodic term `amplitude · cos(phase + frequency · τ)`.
///
/// Units
/// -----
/// * `amplitude`: radians (L, B) or au (R), always `>= 0`
/// * `phase`: radians
/// * `frequency`: radians per Julian millennium
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    amplitude: f64,
    phase: f64,
    frequency: f64,
}

impl Term {
    /// Build a term, folding a negative amplitude into the phase.
    ///
    /// Returns `None` if any coefficient is not finite; callers turn this into a
    /// [`EphemError::NonFiniteCoefficient`] carrying the term location.
    pub fn new(amplitude: f64, phase: f64, frequency: f64) -> Option<Self> {
        if !(amplitude.is_finite() && phase.is_finite() && frequency.is_finite()) {
            return None;
        }

        let (amplitude, phase) = if amplitude.is_sign_negative() && amplitude != 0.0 {
            (-amplitude, phase + std::f64::consts::PI)
        } else {
            (amplitude, phase)
        };

        Some(Term {
            amplitude,
            phase,
            frequency,
        })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Value of the term at τ (Julian millennia from J2000.0).
    #[inline]
    pub fn value(&self, tau: f64) -> f64 {
        self.amplitude * (self.phase + self.frequency * tau).cos()
    }
}

/// Ordered list of terms for one axis at one power of τ.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    axis: Axis,
    power: usize,
    terms: Vec<Term>,
}

impl Series {
    /// Build a series from already validated terms.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::PowerOutOfRange`] if `power > MAX_POWER`.
    pub fn new(axis: Axis, power: usize, terms: Vec<Term>) -> Result<Self, EphemError> {
        if power > MAX_POWER {
            return Err(EphemError::PowerOutOfRange {
                axis,
                power,
                max: MAX_POWER,
            });
        }
        Ok(Series { axis, power, terms })
    }

    /// Build a series from raw `(A, B, C)` triples, multiplying every amplitude by `scale`.
    ///
    /// Raw VSOP87 dumps give amplitudes in units of 1e-8 rad (or au); pass
    /// [`VSOP87_SCALE`](crate::constants::VSOP87_SCALE) to bring them to physical units.
    pub fn from_raw(
        axis: Axis,
        power: usize,
        rows: &[[f64; 3]],
        scale: f64,
    ) -> Result<Self, EphemError> {
        let terms = rows
            .iter()
            .enumerate()
            .map(|(index, [a, b, c])| {
                Term::new(a * scale, *b, *c).ok_or(EphemError::NonFiniteCoefficient {
                    axis,
                    power,
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Series::new(axis, power, terms)
    }

    fn empty(axis: Axis, power: usize) -> Self {
        Series {
            axis,
            power,
            terms: Vec::new(),
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn power(&self) -> usize {
        self.power
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Sum of every term at τ.
    ///
    /// The summation is unconditional and follows the stored order of the terms, so that
    /// two evaluations at the same τ are bit-identical.
    pub fn evaluate(&self, tau: f64) -> f64 {
        self.terms
            .iter()
            .fold(0.0, |acc, term| acc + term.value(tau))
    }
}

/// Series of one axis indexed by power of τ (`[Series₀, …, Seriesₖ]`).
pub type AxisSeries = SmallVec<[Series; MAX_POWER + 1]>;

/// Immutable per-body coefficient table `axis → [Series₀, …, Seriesₖ]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    axes: BTreeMap<Axis, AxisSeries>,
}

impl Table {
    /// Assemble a table from a flat list of series.
    ///
    /// Series may come in any order; they are slotted by `(axis, power)`. Powers missing
    /// between 0 and the highest power of an axis are filled with empty series.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::DuplicatedSeries`] if two series share the same axis and power.
    pub fn new(series: Vec<Series>) -> Result<Self, EphemError> {
        let mut slots: BTreeMap<Axis, Vec<Option<Series>>> = BTreeMap::new();

        for s in series {
            let slot = slots.entry(s.axis).or_default();
            if slot.len() <= s.power {
                slot.resize(s.power + 1, None);
            }
            if slot[s.power].is_some() {
                return Err(EphemError::DuplicatedSeries {
                    axis: s.axis,
                    power: s.power,
                });
            }
            let power = s.power;
            slot[power] = Some(s);
        }

        let axes = slots
            .into_iter()
            .map(|(axis, slot)| {
                let filled = slot
                    .into_iter()
                    .enumerate()
                    .map(|(power, s)| s.unwrap_or_else(|| Series::empty(axis, power)))
                    .collect::<AxisSeries>();
                (axis, filled)
            })
            .collect::<BTreeMap<_, _>>();

        let table = Table { axes };
        tracing::debug!(
            "Built series table with {} axes and {} terms",
            table.axes.len(),
            table.term_count()
        );
        Ok(table)
    }

    /// Build a table from raw coefficient blocks `(axis, power, rows)`.
    ///
    /// Arguments
    /// ---------
    /// * `blocks`: one entry per series, rows given as `[A, B, C]`.
    /// * `scale`: factor applied to every amplitude (e.g. `1e-8` for VSOP87 dumps).
    ///
    /// Return
    /// ------
    /// * The assembled table, or the first structural error found.
    pub fn from_raw(blocks: &[(Axis, usize, &[[f64; 3]])], scale: f64) -> Result<Self, EphemError> {
        let series = blocks
            .iter()
            .map(|(axis, power, rows)| Series::from_raw(*axis, *power, rows, scale))
            .collect::<Result<Vec<_>, _>>()?;
        Table::new(series)
    }

    /// Axes present in the table, in `L, B, R` order.
    pub fn axes(&self) -> impl Iterator<Item = Axis> + '_ {
        self.axes.keys().copied()
    }

    /// All series of an axis indexed by power; empty slice if the axis is absent.
    pub fn series(&self, axis: Axis) -> &[Series] {
        self.axes.get(&axis).map(|s| s.as_slice()).unwrap_or(&[])
    }

    /// The series of `axis` at `power`, if present.
    pub fn get(&self, axis: Axis, power: usize) -> Option<&Series> {
        self.series(axis).get(power)
    }

    /// Highest power stored for an axis.
    pub fn max_power(&self, axis: Axis) -> Option<usize> {
        self.series(axis).len().checked_sub(1)
    }

    /// Number of terms stored for one axis, all powers included.
    pub fn axis_term_count(&self, axis: Axis) -> usize {
        self.series(axis).iter().map(Series::len).sum()
    }

    /// Total number of terms in the table.
    pub fn term_count(&self) -> usize {
        Axis::ALL.iter().map(|a| self.axis_term_count(*a)).sum()
    }

    /// Every series of the table, axis by axis and power by power.
    pub fn iter_series(&self) -> impl Iterator<Item = &Series> + '_ {
        self.axes.values().flat_map(|s| s.iter())
    }
}

#[cfg(test)]
mod series_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_term_folds_negative_amplitude() {
        let term = Term::new(-2.0, 0.5, 10.0).unwrap();
        assert_eq!(term.amplitude(), 2.0);
        assert_relative_eq!(term.phase(), 0.5 + std::f64::consts::PI);

        let reference = -2.0 * (0.5_f64 + 10.0 * 0.3).cos();
        assert_relative_eq!(term.value(0.3), reference, epsilon = 1e-15);
    }

    #[test]
    fn test_term_rejects_non_finite() {
        assert!(Term::new(f64::NAN, 0.0, 0.0).is_none());
        assert!(Term::new(1.0, f64::INFINITY, 0.0).is_none());
        assert!(Term::new(1.0, 0.0, f64::NEG_INFINITY).is_none());
    }

    #[test]
    fn test_series_from_raw_reports_bad_term() {
        let rows = [[1.0, 0.0, 0.0], [2.0, f64::NAN, 1.0]];
        let err = Series::from_raw(Axis::Radius, 1, &rows, 1.0).unwrap_err();
        assert_eq!(
            err,
            EphemError::NonFiniteCoefficient {
                axis: Axis::Radius,
                power: 1,
                index: 1
            }
        );
    }

    #[test]
    fn test_series_power_out_of_range() {
        let err = Series::new(Axis::Longitude, 6, vec![]).unwrap_err();
        assert_eq!(
            err,
            EphemError::PowerOutOfRange {
                axis: Axis::Longitude,
                power: 6,
                max: MAX_POWER
            }
        );
    }

    #[test]
    fn test_series_evaluate() {
        let rows = [[3.0, 0.0, 0.0], [1.0, 1.0, 2.0]];
        let series = Series::from_raw(Axis::Longitude, 0, &rows, 1.0).unwrap();
        let tau = 0.25;
        assert_relative_eq!(
            series.evaluate(tau),
            3.0 + (1.0_f64 + 2.0 * tau).cos(),
            epsilon = 1e-15
        );
        assert_eq!(series.evaluate(tau).to_bits(), series.evaluate(tau).to_bits());
    }

    #[test]
    fn test_table_fills_missing_powers() {
        let l0: &[[f64; 3]] = &[[1.0, 0.0, 0.0]];
        let l2: &[[f64; 3]] = &[[1.0, 0.0, 0.0]];
        let table = Table::from_raw(&[(Axis::Longitude, 2, l2), (Axis::Longitude, 0, l0)], 1.0)
            .unwrap();

        assert_eq!(table.max_power(Axis::Longitude), Some(2));
        assert!(table.get(Axis::Longitude, 1).unwrap().is_empty());
        assert_eq!(table.get(Axis::Longitude, 2).unwrap().power(), 2);
        assert_eq!(table.term_count(), 2);
        assert_eq!(table.max_power(Axis::Latitude), None);
        assert!(table.series(Axis::Radius).is_empty());
        assert_eq!(table.axes().collect::<Vec<_>>(), vec![Axis::Longitude]);
    }

    #[test]
    fn test_table_rejects_duplicated_series() {
        let rows: &[[f64; 3]] = &[[1.0, 0.0, 0.0]];
        let err = Table::from_raw(&[(Axis::Radius, 0, rows), (Axis::Radius, 0, rows)], 1.0)
            .unwrap_err();
        assert_eq!(
            err,
            EphemError::DuplicatedSeries {
                axis: Axis::Radius,
                power: 0
            }
        );
    }

    #[test]
    fn test_axis_parsing() {
        assert_eq!("L".parse::<Axis>().unwrap(), Axis::Longitude);
        assert_eq!(" b ".parse::<Axis>().unwrap(), Axis::Latitude);
        assert_eq!("R".parse::<Axis>().unwrap(), Axis::Radius);
        assert!("X".parse::<Axis>().is_err());
        assert_eq!(Axis::Latitude.to_string(), "B");
    }
}
