use criterion::{black_box, criterion_group, criterion_main, Criterion};
use geocoord::{detect_format, BatchPipeline, Converter, Coordinate, Operation};

const DMS_INPUT: &str = "N45°30'15\" W122°40'30\"";

/// Mixed batch lines: DMS, decimal, UTM and garbage.
fn batch_lines(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("N{:02}°{:02}'15\" W122°40'30\"", i % 90, i % 60),
            1 => format!("{:.4}, {:.4}", (i % 180) as f64 / 2.0 - 45.0, -74.006),
            2 => "18T 583959 4507351".to_string(),
            _ => "not a coordinate".to_string(),
        })
        .collect()
}

fn bench_detect(c: &mut Criterion) {
    c.bench_function("detect_dms", |b| {
        b.iter(|| black_box(detect_format(black_box(DMS_INPUT))));
    });
}

fn bench_dms_to_decimal(c: &mut Criterion) {
    let converter = Converter::default();

    c.bench_function("dms_to_decimal", |b| {
        b.iter(|| black_box(converter.to_decimal(black_box(DMS_INPUT)).unwrap()));
    });
}

fn bench_utm(c: &mut Criterion) {
    let nyc = Coordinate::new(40.7128, -74.0060).unwrap();

    c.bench_function("utm_projection", |b| {
        b.iter(|| black_box(geocoord::utm::to_utm(black_box(&nyc))));
    });
}

fn bench_distance(c: &mut Criterion) {
    let nyc = Coordinate::new(40.7128, -74.0060).unwrap();
    let la = Coordinate::new(34.0522, -118.2437).unwrap();

    c.bench_function("haversine_distance", |b| {
        b.iter(|| black_box(geocoord::geodesic::calculate(black_box(&nyc), black_box(&la))));
    });
}

fn bench_batch(c: &mut Criterion) {
    let lines = batch_lines(1000);
    let pipeline = BatchPipeline::new(Operation::ToUtm, Default::default());

    c.bench_function("batch_1000_mixed", |b| {
        b.iter(|| black_box(pipeline.run(black_box(&lines))));
    });
}

criterion_group!(
    benches,
    bench_detect,
    bench_dms_to_decimal,
    bench_utm,
    bench_distance,
    bench_batch,
);
criterion_main!(benches);
