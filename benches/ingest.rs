use std::fmt::Write;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

use meteo_csv_ingest::app::models::DateRange;
use meteo_csv_ingest::app::services::layout_resolver::{FileOptions, resolve_layout};
use meteo_csv_ingest::app::services::row_pipeline::{ErrorPolicy, read_file};
use meteo_csv_ingest::{Location, PositionIndex};

const ROWS: i64 = 100_000;
const WINDOW_START: i64 = 90_000;
const WINDOW_HOURS: i64 = 240;

fn bench_ingest(c: &mut Criterion) {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("station.csv");
    let origin = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();

    let mut content = String::from("TIMESTAMP,TA,RH,VW\n");
    for row in 0..ROWS {
        let timestamp = origin + Duration::hours(row);
        writeln!(
            content,
            "{},{:.2},{},{:.1}",
            timestamp.format("%Y-%m-%dT%H:%M:%S"),
            (row % 40) as f64 - 10.5,
            if row % 97 == 0 { "-999".to_string() } else { (row % 100).to_string() },
            (row % 13) as f64 * 0.7
        )
        .expect("format");
    }
    std::fs::write(&path, content).expect("write");

    let mut options = FileOptions::new(&path);
    options.metadata.location = Location::from_lat_lon(46.83, 9.81, Some(2540.0));
    options.metadata.nodata = vec!["-999".to_string()];
    let layout = resolve_layout(&options).expect("layout");

    let window = DateRange::new(
        origin + Duration::hours(WINDOW_START),
        origin + Duration::hours(WINDOW_START + WINDOW_HOURS),
    )
    .expect("range");

    let mut group = c.benchmark_group("ingest");
    group.sample_size(20);

    group.bench_function("full_file", |b| {
        b.iter(|| {
            let index = PositionIndex::new();
            let result =
                read_file(&layout, &index, DateRange::all(), ErrorPolicy::default()).expect("read");
            black_box(result.records.len());
        });
    });

    group.bench_function("window_cold_index", |b| {
        b.iter_batched(
            PositionIndex::new,
            |index| {
                let result = read_file(&layout, &index, window, ErrorPolicy::default()).expect("read");
                black_box(result.records.len());
            },
            BatchSize::SmallInput,
        );
    });

    let warm = Arc::new(PositionIndex::new());
    read_file(&layout, &warm, window, ErrorPolicy::default()).expect("warm up");
    group.bench_function("window_warm_index", |b| {
        b.iter(|| {
            let result = read_file(&layout, &warm, window, ErrorPolicy::default()).expect("read");
            black_box(result.records.len());
        });
    });

    group.bench_function("resolve_layout", |b| {
        b.iter(|| black_box(resolve_layout(&options).expect("layout").column_count()));
    });

    group.finish();
}

criterion_group!(benches, bench_ingest);
criterion_main!(benches);
