use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use timeline_rs::api::{GanttChart, GanttChartConfig};
use timeline_rs::core::{LinearScale, TimelineEntry, TimelineScales, Viewport, intersected_indices};
use timeline_rs::render::NullRenderer;

fn generated_entries(count: usize) -> Vec<TimelineEntry> {
    (0..count)
        .map(|i| {
            let start = (i * 7 % 1_000) as f64;
            TimelineEntry::new(format!("lane-{}", i % 24), start, 5.0 + (i % 40) as f64)
                .with_subcategory(format!("job-{}", i % 3))
        })
        .collect()
}

fn bench_linear_scale_round_trip(c: &mut Criterion) {
    let scale = LinearScale::new((0.0, 10_000.0), (0.0, 1920.0)).expect("valid scale");

    c.bench_function("linear_scale_round_trip", |b| {
        b.iter(|| {
            let px = scale.map(black_box(4_321.123));
            let _ = scale.invert(px);
        })
    });
}

fn bench_scale_build_10k(c: &mut Criterion) {
    let entries = generated_entries(10_000);

    c.bench_function("timeline_scales_build_10k", |b| {
        b.iter(|| {
            let _ = TimelineScales::from_entries(black_box(&entries), 1_800.0, 900.0)
                .expect("scales");
        })
    });
}

fn bench_intersection_10k(c: &mut Criterion) {
    let entries = generated_entries(10_000);
    let scales = TimelineScales::from_entries(&entries, 1_800.0, 900.0).expect("scales");

    c.bench_function("scrubber_intersection_10k", |b| {
        b.iter(|| {
            let _ = intersected_indices(scales.x, black_box(&entries), black_box(900.0));
        })
    });
}

fn bench_scrubber_drag_2k(c: &mut Criterion) {
    let mut chart =
        GanttChart::new(NullRenderer::default(), Viewport::new(1600, 900)).expect("chart init");
    chart
        .render(generated_entries(2_000), GanttChartConfig::default())
        .expect("render");
    let mut position = 0.0;

    c.bench_function("scrubber_drag_step_2k", |b| {
        b.iter(|| {
            position = (position + 13.0) % 1_500.0;
            chart
                .set_scrubber_position_px(black_box(position))
                .expect("move");
        })
    });
}

criterion_group!(
    benches,
    bench_linear_scale_round_trip,
    bench_scale_build_10k,
    bench_intersection_10k,
    bench_scrubber_drag_2k
);
criterion_main!(benches);
