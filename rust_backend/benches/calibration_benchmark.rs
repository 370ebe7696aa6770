use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edt_rust::core::geometry::{Area, Axis, AxisRange, Point};
use edt_rust::core::regions::RegionCollection;
use edt_rust::time::calibration::{bind_hours, build_time_axis, detect_ticks};

/// Brightness profile of a ruler with a tick every `spacing` columns.
fn ruler_profile(width: usize, spacing: usize) -> Vec<u8> {
    (0..width)
        .map(|x| if x % spacing == 0 { 20 } else { 250 })
        .collect()
}

fn hour_labels(hours: u32, spacing: i32) -> RegionCollection {
    (0..hours)
        .map(|i| {
            let x = 100 + i as i32 * spacing;
            Area::with_text(Point::new(x + 5, 5), Point::new(x + 35, 30), format!("{}h", 8 + i))
        })
        .collect()
}

fn bench_detect_ticks(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_detection");

    for width in [500usize, 2000, 8000] {
        let profile = ruler_profile(width, 25);
        group.bench_with_input(BenchmarkId::new("detect_ticks", width), &profile, |b, input| {
            b.iter(|| detect_ticks(black_box(input), 150, 200));
        });
    }

    group.finish();
}

fn bench_time_axis(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_axis");

    let margin = AxisRange::new(0, 2000, Axis::Horizontal);
    let labels = hour_labels(11, 160);
    let ticks: Vec<i32> = (0..45).map(|i| 100 + i * 40).collect();

    group.bench_function("bind_hours", |b| {
        b.iter(|| {
            let mut ticks = ticks.clone();
            black_box(bind_hours(black_box(&labels), &mut ticks, margin))
        });
    });

    let mut bound_ticks = ticks.clone();
    let hours = bind_hours(&labels, &mut bound_ticks, margin);
    group.bench_function("build_time_axis", |b| {
        b.iter(|| build_time_axis(black_box(&bound_ticks), black_box(&hours)));
    });

    group.finish();
}

criterion_group!(benches, bench_detect_ticks, bench_time_axis);
criterion_main!(benches);
