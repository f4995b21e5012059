use live_price_chart::ChartError;
use live_price_chart::core::{
    MIN_TIME_SPAN_SECS, PlotMargins, PlotRect, Sample, Viewport, VisibleDomain, compute_scales,
};

const T0: f64 = 1_700_000_000.0;

fn scenario() -> Vec<Sample> {
    vec![
        Sample::new(T0, 100.0),
        Sample::new(T0 + 3_600.0, 110.0),
        Sample::new(T0 + 7_200.0, 90.0),
    ]
}

#[test]
fn scenario_price_domain_is_niced_around_extremes() {
    let scales = compute_scales(
        &scenario(),
        None,
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");

    let (low, high) = scales.price.domain();
    assert!(low <= 90.0 && high >= 110.0);
    assert_eq!((low, high), (90.0, 110.0));
    assert_eq!(scales.price.ticks(), vec![90.0, 95.0, 100.0, 105.0, 110.0]);
}

#[test]
fn scales_map_onto_margined_plot_with_inverted_y() {
    let scales = compute_scales(
        &scenario(),
        None,
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");

    assert_eq!(
        scales.plot,
        PlotRect {
            left: 50.0,
            top: 20.0,
            right: 570.0,
            bottom: 270.0,
        }
    );
    let left = scales.time.time_to_pixel(T0).expect("left");
    let right = scales.time.time_to_pixel(T0 + 7_200.0).expect("right");
    assert!((left - 50.0).abs() <= 1e-9);
    assert!((right - 570.0).abs() <= 1e-9);

    let low = scales.price.price_to_pixel(90.0).expect("low price");
    let high = scales.price.price_to_pixel(110.0).expect("high price");
    assert!((low - 270.0).abs() <= 1e-9);
    assert!((high - 20.0).abs() <= 1e-9);
    assert!(high < low);
}

#[test]
fn single_sample_gets_minimum_time_span_and_padded_price() {
    let scales = compute_scales(
        &[Sample::new(T0, 100.0)],
        None,
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");

    let (start, end) = scales.time.visible_range();
    assert!((end - start - MIN_TIME_SPAN_SECS).abs() <= 1e-9);
    assert!(start < T0 && end > T0);

    let (low, high) = scales.price.domain();
    assert!(low < 100.0 && high > 100.0);
    let y = scales.price.price_to_pixel(100.0).expect("y");
    assert!(y.is_finite());
}

#[test]
fn identical_timestamps_do_not_divide_by_zero() {
    let samples = vec![Sample::new(T0, 1.0), Sample::new(T0, 2.0), Sample::new(T0, 3.0)];
    let scales = compute_scales(
        &samples,
        None,
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");
    let x = scales.time.time_to_pixel(T0).expect("x");
    assert!((x - 310.0).abs() <= 1e-9);
}

#[test]
fn flat_zero_series_is_padded_by_half_unit() {
    let scales = compute_scales(
        &[Sample::new(T0, 0.0), Sample::new(T0 + 10.0, 0.0)],
        None,
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");
    let (low, high) = scales.price.domain();
    assert!(low <= -0.5 && high >= 0.5);
}

#[test]
fn brushed_domain_overrides_series_extent() {
    let samples: Vec<Sample> = (0..10)
        .map(|i| Sample::new(T0 + f64::from(i) * 60.0, 100.0 + f64::from(i)))
        .collect();
    let domain = VisibleDomain::new(T0 + 120.0, T0 + 300.0).expect("domain");
    let scales = compute_scales(
        &samples,
        Some(domain),
        Viewport::new(600, 300),
        PlotMargins::default(),
        5,
    )
    .expect("scales");

    assert_eq!(scales.time.visible_range(), (T0 + 120.0, T0 + 300.0));
    assert_eq!(scales.time.full_range(), (T0, T0 + 540.0));
    let (low, high) = scales.price.data_extent();
    assert_eq!((low, high), (102.0, 105.0));
}

#[test]
fn too_small_viewport_is_rejected() {
    let err = compute_scales(
        &scenario(),
        None,
        Viewport::new(60, 300),
        PlotMargins::default(),
        5,
    )
    .expect_err("no drawable width");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}
