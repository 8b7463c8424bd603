mod common;

use approx::assert_abs_diff_eq;
use periodic_ephem::bodies::{Body, BodyCatalog};
use periodic_ephem::ephemeris::{Ephemeris, EphemerisConfig};
use periodic_ephem::series::evaluator::{evaluate_axis, evaluate_position};
use periodic_ephem::series::table_io::{read_table_csv, write_table_csv};
use periodic_ephem::series::truncation::{truncate, truncate_with_report, TruncationSpec};
use periodic_ephem::series::{Axis, Table};
use periodic_ephem::vsop87d::{earth_table, venus_table};

use crate::common::{tau, VENUS_EXAMPLE_JDE};

fn scenario_spec() -> TruncationSpec {
    TruncationSpec::new(0.001, 0.001, 0.01, 30.0).unwrap()
}

/// τ from 0 to 3 millennia by steps of 0.01, the whole 30-century horizon.
fn scenario_horizon() -> impl Iterator<Item = f64> {
    (0..=300).map(|k| k as f64 / 100.0)
}

fn assert_radius_within(reduced: &Table, full: &Table, bound: f64) {
    for tau in scenario_horizon() {
        assert_eq!(
            evaluate_axis(reduced, Axis::Longitude, tau),
            evaluate_axis(full, Axis::Longitude, tau)
        );
        assert_eq!(
            evaluate_axis(reduced, Axis::Latitude, tau),
            evaluate_axis(full, Axis::Latitude, tau)
        );
        let dr = evaluate_axis(reduced, Axis::Radius, tau) - evaluate_axis(full, Axis::Radius, tau);
        assert!(dr.abs() < bound, "ΔR = {dr} au at τ = {tau}");
    }
}

#[test]
fn test_venus_scenario_only_drops_radius_terms() {
    let full = venus_table().unwrap();
    let (reduced, report) = truncate_with_report(&full, &scenario_spec()).unwrap();

    assert!(reduced.term_count() < full.term_count());
    assert_eq!(report.longitude.kept, 51);
    assert_eq!(report.longitude.discarded, 0);
    assert_eq!(report.latitude.kept, 22);
    assert_eq!(report.latitude.discarded, 0);
    assert_eq!(report.radius.kept, 4);
    assert_eq!(report.radius.discarded, 16);
    assert_eq!(report.kept(), reduced.term_count());

    assert_eq!(reduced.series(Axis::Longitude), full.series(Axis::Longitude));
    assert_eq!(reduced.series(Axis::Latitude), full.series(Axis::Latitude));

    assert_radius_within(&reduced, &full, 0.01);
}

#[test]
fn test_earth_scenario() {
    let full = earth_table().unwrap();
    let (reduced, report) = truncate_with_report(&full, &scenario_spec()).unwrap();
    assert_eq!(report.longitude.discarded, 0);
    assert_eq!(report.latitude.discarded, 0);
    assert_eq!(report.radius.kept, 6);
    assert_eq!(reduced.term_count(), 129 + 7 + 6);

    assert_radius_within(&reduced, &full, 0.01);
}

#[test]
fn test_truncation_is_idempotent() {
    let spec = scenario_spec();
    let once = truncate(&venus_table().unwrap(), &spec).unwrap();
    let twice = truncate(&once, &spec).unwrap();
    assert_eq!(once, twice);

    let coarse = TruncationSpec::new(1.0, 1.0, 1e-5, 10.0).unwrap();
    let once = truncate(&earth_table().unwrap(), &coarse).unwrap();
    assert_eq!(truncate(&once, &coarse).unwrap(), once);
}

#[test]
fn test_fully_discarded_axis_evaluates_to_zero() {
    // every Earth latitude term is below 1″ over 10 centuries
    let coarse = TruncationSpec::new(1.0, 1.0, 1e-5, 10.0).unwrap();
    let (reduced, report) = truncate_with_report(&earth_table().unwrap(), &coarse).unwrap();
    assert_eq!(report.latitude.kept, 0);
    assert_eq!(reduced.axis_term_count(Axis::Latitude), 0);

    let pos = evaluate_position(&reduced, 0.1).unwrap();
    assert_eq!(pos.latitude, 0.0);
    assert!(pos.radius > 0.98 && pos.radius < 1.02);
}

#[test]
fn test_truncated_table_csv_round_trip() {
    let reduced = truncate(&venus_table().unwrap(), &scenario_spec()).unwrap();

    let mut buffer = Vec::new();
    write_table_csv(&reduced, &mut buffer).unwrap();
    let text = String::from_utf8(buffer.clone()).unwrap();
    assert!(text.starts_with("axis,power,amplitude,phase,frequency"));
    assert_eq!(text.lines().count(), reduced.term_count() + 1);

    let reloaded = read_table_csv(buffer.as_slice()).unwrap();
    assert_eq!(reloaded, reduced);

    // a reloaded table plugs into a catalog like a bundled one
    let mut catalog = BodyCatalog::with_builtin().unwrap();
    catalog.insert(Body::Venus, reloaded);
    let ephem = Ephemeris::with_catalog(catalog, &EphemerisConfig::default()).unwrap();
    let tau = tau(VENUS_EXAMPLE_JDE);
    let pos = ephem
        .planet(Body::Venus)
        .unwrap()
        .position_at_epoch(tau)
        .unwrap();
    let expected = evaluate_position(&reduced, tau).unwrap();
    assert_eq!(pos, expected);
}

#[test]
fn test_truncated_ephemeris_stays_close() {
    let tau = tau(VENUS_EXAMPLE_JDE);
    let full = Ephemeris::new(&EphemerisConfig::default()).unwrap();
    let small = Ephemeris::new(&EphemerisConfig {
        truncation: Some(TruncationSpec::new(1.0, 1.0, 1e-5, 10.0).unwrap()),
        ..Default::default()
    })
    .unwrap();

    let a = full.geocentric_position(Body::Venus, tau, true).unwrap();
    let b = small.geocentric_position(Body::Venus, tau, true).unwrap();
    // a few arcseconds at most near J2000
    assert_abs_diff_eq!(a.longitude_deg(), b.longitude_deg(), epsilon = 1e-3);
    assert_abs_diff_eq!(a.latitude_deg(), b.latitude_deg(), epsilon = 1e-3);
    assert_abs_diff_eq!(a.radius, b.radius, epsilon = 1e-4);
}
