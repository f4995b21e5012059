use criterion::{Criterion, criterion_group, criterion_main};
use live_price_chart::api::{ChartEngine, ChartEngineConfig};
use live_price_chart::core::{
    FixedClock, Instrument, PlotMargins, Sample, Viewport, compute_scales, project_curve,
};
use live_price_chart::interaction::nearest_sample_index;
use live_price_chart::render::NullRenderer;
use std::hint::black_box;
use std::time::{Duration, Instant};

const NOW: f64 = 1_700_000_000.0;

/// One sample per minute over a week, the densest series retention keeps
/// for a minutely feed.
fn week_of_minutes() -> Vec<Sample> {
    (0..10_080)
        .map(|i| {
            let t = NOW - f64::from(10_080 - i) * 60.0;
            let price = 37_000.0 + (f64::from(i) * 0.01).sin() * 250.0;
            Sample::new(t, price)
        })
        .collect()
}

fn bench_compute_scales_10k(c: &mut Criterion) {
    let samples = week_of_minutes();
    let viewport = Viewport::new(1600, 300);

    c.bench_function("compute_scales_10k", |b| {
        b.iter(|| {
            let _ = compute_scales(
                black_box(&samples),
                None,
                black_box(viewport),
                PlotMargins::default(),
                5,
            )
            .expect("scales");
        })
    });
}

fn bench_curve_projection_10k(c: &mut Criterion) {
    let samples = week_of_minutes();
    let scales = compute_scales(&samples, None, Viewport::new(1600, 300), PlotMargins::default(), 5)
        .expect("scales");

    c.bench_function("curve_projection_10k", |b| {
        b.iter(|| {
            let _ = project_curve(black_box(&samples), black_box(&scales));
        })
    });
}

fn bench_nearest_sample_10k(c: &mut Criterion) {
    let samples = week_of_minutes();
    let scales = compute_scales(&samples, None, Viewport::new(1600, 300), PlotMargins::default(), 5)
        .expect("scales");

    c.bench_function("nearest_sample_10k", |b| {
        b.iter(|| {
            let _ = nearest_sample_index(black_box(&samples), scales.time, black_box(812.5));
        })
    });
}

fn bench_engine_live_append_frame(c: &mut Criterion) {
    let clock = FixedClock::new(NOW);
    let mut engine = ChartEngine::with_clock(
        NullRenderer::default(),
        ChartEngineConfig::default().with_initial_width_px(Some(1600)),
        Box::new(clock.clone()),
    )
    .expect("engine init");
    let ticket = engine.select_instrument(Instrument::new("bitcoin"));
    engine.load_history(&ticket, week_of_minutes());

    let start = Instant::now();
    let mut step = 0u32;
    c.bench_function("engine_live_append_frame_10k", |b| {
        b.iter(|| {
            step += 1;
            clock.advance(1.0);
            engine.append_live(&ticket, Sample::new(NOW + f64::from(step), 37_000.0));
            let _ = engine
                .build_render_frame_at(start + Duration::from_millis(u64::from(step)))
                .expect("frame");
        })
    });
}

criterion_group!(
    benches,
    bench_compute_scales_10k,
    bench_curve_projection_10k,
    bench_nearest_sample_10k,
    bench_engine_live_append_frame
);
criterion_main!(benches);
