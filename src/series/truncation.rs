//! # Truncation engine
//!
//! Reduces a full [`Table`] to the terms whose **worst-case contribution** over a time horizon
//! reaches a per-axis threshold.
//!
//! ## Criterion
//!
//! For a term of amplitude `A` in the series of power `n`, the worst-case magnitude over the
//! declared horizon `T` is bounded by
//!
//! ```text
//! |A| · Tⁿ
//! ```
//!
//! and the term is retained iff this bound is `>= threshold(axis)`. Each term is judged on its
//! own: there is no cumulative error budget across a series. Power-0 terms are therefore kept
//! whenever `|A| >= threshold`, whatever the horizon.
//!
//! `T` is the horizon expressed in Julian centuries. Because τ is measured in millennia, the
//! actual supremum of `|τ|ⁿ` over the horizon is `(T/10)ⁿ`. Since `Tⁿ >= (T/10)ⁿ` for every
//! `T > 0` and `n >= 0`, `Tⁿ` is never the looser bound, and every discarded term satisfies
//! `|A| · Tⁿ < threshold`.
//!
//! ## Properties
//!
//! - Pure: the input table is never mutated, a new table is returned.
//! - Idempotent: truncating an already truncated table with the same (or a looser) spec
//!   returns the same retained terms.
//! - Term order inside each series is preserved.

use serde::{Deserialize, Serialize};

use crate::constants::{ArcSec, RADSEC};
use crate::ephem_errors::EphemError;
use crate::series::{Axis, Series, Table, Term};

/// Per-axis thresholds and projection horizon for [`truncate`].
///
/// Units
/// -----
/// * `longitude`, `latitude`: arcseconds
/// * `radius`: table distance unit (au for VSOP87)
/// * `horizon`: Julian centuries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncationSpec {
    pub longitude: ArcSec,
    pub latitude: ArcSec,
    pub radius: f64,
    pub horizon: f64,
}

impl TruncationSpec {
    /// Build and validate a truncation spec.
    ///
    /// Errors
    /// ------
    /// * [`EphemError::InvalidTruncationSpec`] if a value is non-finite, a threshold is not
    ///   strictly positive, or the horizon is not strictly positive.
    pub fn new(
        longitude: ArcSec,
        latitude: ArcSec,
        radius: f64,
        horizon: f64,
    ) -> Result<Self, EphemError> {
        let spec = TruncationSpec {
            longitude,
            latitude,
            radius,
            horizon,
        };
        spec.validate()?;
        Ok(spec)
    }

    /// Check a spec that was built field by field (e.g. deserialized from configuration).
    pub fn validate(&self) -> Result<(), EphemError> {
        for (name, value) in [
            ("longitude threshold", self.longitude),
            ("latitude threshold", self.latitude),
            ("radius threshold", self.radius),
            ("horizon", self.horizon),
        ] {
            if !value.is_finite() {
                return Err(EphemError::InvalidTruncationSpec(format!(
                    "{name} must be finite, got {value}"
                )));
            }
            if value <= 0.0 {
                return Err(EphemError::InvalidTruncationSpec(format!(
                    "{name} must be strictly positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Threshold of an axis expressed in the table's native unit (radians for L/B, au for R).
    pub fn threshold(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Longitude => self.longitude * RADSEC,
            Axis::Latitude => self.latitude * RADSEC,
            Axis::Radius => self.radius,
        }
    }
}

/// Worst-case magnitude `|A| · horizonⁿ` of a term of the series of power `power`.
#[inline]
pub fn worst_case_contribution(term: &Term, power: usize, horizon: f64) -> f64 {
    term.amplitude().abs() * horizon.powi(power as i32)
}

/// Kept / discarded term counts of one truncation pass, per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisReport {
    pub kept: usize,
    pub discarded: usize,
}

/// Summary of a truncation pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TruncationReport {
    pub longitude: AxisReport,
    pub latitude: AxisReport,
    pub radius: AxisReport,
}

impl TruncationReport {
    pub fn axis(&self, axis: Axis) -> &AxisReport {
        match axis {
            Axis::Longitude => &self.longitude,
            Axis::Latitude => &self.latitude,
            Axis::Radius => &self.radius,
        }
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut AxisReport {
        match axis {
            Axis::Longitude => &mut self.longitude,
            Axis::Latitude => &mut self.latitude,
            Axis::Radius => &mut self.radius,
        }
    }

    pub fn kept(&self) -> usize {
        self.longitude.kept + self.latitude.kept + self.radius.kept
    }

    pub fn discarded(&self) -> usize {
        self.longitude.discarded + self.latitude.discarded + self.radius.discarded
    }
}

/// Truncate a table, keeping only terms whose worst-case contribution reaches the threshold.
///
/// See [`truncate_with_report`] for the counts of kept and discarded terms.
pub fn truncate(table: &Table, spec: &TruncationSpec) -> Result<Table, EphemError> {
    truncate_with_report(table, spec).map(|(t, _)| t)
}

/// Truncate a table and report how many terms were kept and discarded on each axis.
///
/// Arguments
/// ---------
/// * `table`: the source table, left untouched.
/// * `spec`: thresholds and horizon, validated before any work is done.
///
/// Return
/// ------
/// * The reduced table and its [`TruncationReport`].
///
/// Errors
/// ------
/// * [`EphemError::InvalidTruncationSpec`] if `spec` is out of range.
pub fn truncate_with_report(
    table: &Table,
    spec: &TruncationSpec,
) -> Result<(Table, TruncationReport), EphemError> {
    spec.validate()?;

    let mut report = TruncationReport::default();
    let mut reduced = Vec::new();

    for series in table.iter_series() {
        let threshold = spec.threshold(series.axis());
        let kept = series
            .terms()
            .iter()
            .filter(|term| worst_case_contribution(term, series.power(), spec.horizon) >= threshold)
            .copied()
            .collect::<Vec<_>>();

        let counts = report.axis_mut(series.axis());
        counts.kept += kept.len();
        counts.discarded += series.len() - kept.len();

        if !kept.is_empty() {
            reduced.push(Series::new(series.axis(), series.power(), kept)?);
        }
    }

    let truncated = Table::new(reduced)?;

    tracing::debug!(
        "Truncation (L {}\", B {}\", R {}, T {} cy): kept {} of {} terms (L {}/{}, B {}/{}, R {}/{})",
        spec.longitude,
        spec.latitude,
        spec.radius,
        spec.horizon,
        report.kept(),
        report.kept() + report.discarded(),
        report.longitude.kept,
        report.longitude.kept + report.longitude.discarded,
        report.latitude.kept,
        report.latitude.kept + report.latitude.discarded,
        report.radius.kept,
        report.radius.kept + report.radius.discarded,
    );

    Ok((truncated, report))
}

#[cfg(test)]
mod truncation_test {
    use super::*;

    fn sample_table() -> Table {
        let l0: &[[f64; 3]] = &[[1.0, 0.0, 0.0], [1e-6, 1.0, 10.0], [1e-9, 2.0, 20.0]];
        let l1: &[[f64; 3]] = &[[1e-8, 0.0, 5.0], [1e-12, 0.0, 3.0]];
        let r0: &[[f64; 3]] = &[[1.0, 0.0, 0.0], [0.002, 0.0, 7.0]];
        Table::from_raw(
            &[
                (Axis::Longitude, 0, l0),
                (Axis::Longitude, 1, l1),
                (Axis::Radius, 0, r0),
            ],
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn test_spec_validation() {
        assert!(TruncationSpec::new(0.001, 0.001, 0.01, 30.0).is_ok());
        assert!(matches!(
            TruncationSpec::new(0.0, 0.001, 0.01, 30.0),
            Err(EphemError::InvalidTruncationSpec(_))
        ));
        assert!(matches!(
            TruncationSpec::new(0.001, 0.001, 0.01, -1.0),
            Err(EphemError::InvalidTruncationSpec(_))
        ));
        assert!(matches!(
            TruncationSpec::new(0.001, f64::NAN, 0.01, 30.0),
            Err(EphemError::InvalidTruncationSpec(_))
        ));
    }

    #[test]
    fn test_threshold_units() {
        let spec = TruncationSpec::new(1.0, 2.0, 0.5, 10.0).unwrap();
        assert_eq!(spec.threshold(Axis::Longitude), RADSEC);
        assert_eq!(spec.threshold(Axis::Latitude), 2.0 * RADSEC);
        assert_eq!(spec.threshold(Axis::Radius), 0.5);
    }

    #[test]
    fn test_worst_case_power_zero_ignores_horizon() {
        let term = Term::new(3.0, 0.0, 0.0).unwrap();
        assert_eq!(worst_case_contribution(&term, 0, 1e6), 3.0);
        assert_eq!(worst_case_contribution(&term, 2, 10.0), 300.0);
    }

    #[test]
    fn test_truncate_keeps_large_terms() {
        let table = sample_table();
        // 0.001" ≈ 4.85e-9 rad
        let spec = TruncationSpec::new(0.001, 0.001, 0.01, 30.0).unwrap();
        let (truncated, report) = truncate_with_report(&table, &spec).unwrap();

        // L0: 1e-9 is dropped; L1: 1e-8·30 kept, 1e-12·30 dropped; R0: 0.002 dropped
        assert_eq!(truncated.get(Axis::Longitude, 0).unwrap().len(), 2);
        assert_eq!(truncated.get(Axis::Longitude, 1).unwrap().len(), 1);
        assert_eq!(truncated.get(Axis::Radius, 0).unwrap().len(), 1);
        assert_eq!(report.longitude, AxisReport { kept: 3, discarded: 2 });
        assert_eq!(report.radius, AxisReport { kept: 1, discarded: 1 });
        assert_eq!(report.latitude, AxisReport::default());
        assert_eq!(truncated.term_count(), 4);
        assert_eq!(table.term_count(), 7);
    }

    #[test]
    fn test_truncate_is_idempotent() {
        let table = sample_table();
        let spec = TruncationSpec::new(0.001, 0.001, 0.01, 30.0).unwrap();
        let once = truncate(&table, &spec).unwrap();
        let twice = truncate(&once, &spec).unwrap();
        assert_eq!(once, twice);

        let looser = TruncationSpec::new(0.0005, 0.0005, 0.001, 30.0).unwrap();
        let loose = truncate(&once, &looser).unwrap();
        assert_eq!(once, loose);
    }

    #[test]
    fn test_discarded_terms_respect_bound() {
        let table = sample_table();
        let spec = TruncationSpec::new(0.001, 0.001, 0.01, 30.0).unwrap();
        let truncated = truncate(&table, &spec).unwrap();

        for series in table.iter_series() {
            let kept = truncated
                .get(series.axis(), series.power())
                .map(|s| s.terms().to_vec())
                .unwrap_or_default();
            for term in series.terms().iter().filter(|t| !kept.contains(t)) {
                assert!(
                    worst_case_contribution(term, series.power(), spec.horizon)
                        < spec.threshold(series.axis())
                );
            }
        }
    }
}
