use criterion::{black_box, criterion_group, criterion_main, Criterion};

use periodic_ephem::bodies::Body;
use periodic_ephem::ephemeris::{Ephemeris, EphemerisConfig};
use periodic_ephem::orbital_elements::MeanOrbitalElements;
use periodic_ephem::planet::PositionSource;
use periodic_ephem::series::evaluator::evaluate_position;
use periodic_ephem::series::truncation::{truncate, TruncationSpec};
use periodic_ephem::vsop87d::{earth_table, venus_table};

/// 1992 December 20.0 TD
const TAU: f64 = -0.007032169746748802;

/// Full bundled tables against a coarse truncation (1″ on angles, 1e-5 au, 10 centuries).
fn bench_truncation_levels(c: &mut Criterion) {
    let spec = TruncationSpec::new(1.0, 1.0, 1e-5, 10.0).unwrap();
    let mut group = c.benchmark_group("evaluate_position");

    for (name, table) in [
        ("venus", venus_table().unwrap()),
        ("earth", earth_table().unwrap()),
    ] {
        let reduced = truncate(&table, &spec).unwrap();
        group.bench_function(format!("{name}/full"), |b| {
            b.iter(|| evaluate_position(black_box(&table), black_box(TAU)).unwrap())
        });
        group.bench_function(format!("{name}/truncated"), |b| {
            b.iter(|| evaluate_position(black_box(&reduced), black_box(TAU)).unwrap())
        });
    }
    group.finish();
}

fn bench_geocentric(c: &mut Criterion) {
    let ephem = Ephemeris::new(&EphemerisConfig::default()).unwrap();

    c.bench_function("geocentric/venus_light_time", |b| {
        b.iter(|| {
            ephem
                .geocentric_position(Body::Venus, black_box(TAU), true)
                .unwrap()
        })
    });
    c.bench_function("geocentric/venus_equatorial", |b| {
        b.iter(|| ephem.geocentric_equatorial(Body::Venus, black_box(TAU)).unwrap())
    });
}

fn bench_mean_elements(c: &mut Criterion) {
    let venus = MeanOrbitalElements::venus();
    c.bench_function("mean_elements/venus", |b| {
        b.iter(|| venus.heliocentric_position(black_box(TAU)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_truncation_levels,
    bench_geocentric,
    bench_mean_elements
);
criterion_main!(benches);
