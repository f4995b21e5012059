use live_price_chart::core::{
    CurvePoint, PathCommand, PlotMargins, Sample, Viewport, compute_scales, monotone_curve,
    project_curve,
};
use proptest::prelude::*;

fn point(x: f64, y: f64) -> CurvePoint {
    CurvePoint { time: x, x, y }
}

#[test]
fn empty_input_produces_no_commands() {
    assert!(monotone_curve(&[]).is_empty());
}

#[test]
fn single_point_draws_zero_length_segment() {
    let path = monotone_curve(&[point(10.0, 20.0)]);
    assert_eq!(
        path.commands,
        vec![
            PathCommand::MoveTo { x: 10.0, y: 20.0 },
            PathCommand::LineTo { x: 10.0, y: 20.0 },
        ]
    );
}

#[test]
fn two_points_draw_straight_segment() {
    let path = monotone_curve(&[point(0.0, 0.0), point(10.0, 5.0)]);
    assert_eq!(
        path.commands,
        vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 5.0 },
        ]
    );
}

#[test]
fn curve_passes_through_every_point() {
    let points = [point(0.0, 3.0), point(2.0, 1.0), point(5.0, 4.0), point(6.0, 4.5)];
    let path = monotone_curve(&points);
    assert_eq!(path.commands.len(), points.len());
    assert_eq!(path.commands[0], PathCommand::MoveTo { x: 0.0, y: 3.0 });
    for (command, expected) in path.commands[1..].iter().zip(&points[1..]) {
        let PathCommand::CubicTo { x, y, .. } = *command else {
            panic!("expected cubic segment");
        };
        assert_eq!((x, y), (expected.x, expected.y));
    }
}

#[test]
fn flat_run_stays_flat() {
    let path = monotone_curve(&[point(0.0, 5.0), point(1.0, 5.0), point(2.0, 5.0)]);
    for command in &path.commands[1..] {
        let PathCommand::CubicTo { y1, y2, y, .. } = *command else {
            panic!("expected cubic segment");
        };
        assert_eq!((y1, y2, y), (5.0, 5.0, 5.0));
    }
}

#[test]
fn projected_series_starts_at_plot_left() {
    let t0 = 1_700_000_000.0;
    let samples = vec![
        Sample::new(t0, 100.0),
        Sample::new(t0 + 3_600.0, 110.0),
        Sample::new(t0 + 7_200.0, 90.0),
    ];
    let scales = compute_scales(&samples, None, Viewport::new(600, 300), PlotMargins::default(), 5)
        .expect("scales");
    let path = project_curve(&samples, &scales);
    let PathCommand::MoveTo { x, y } = path.commands[0] else {
        panic!("expected move");
    };
    assert!((x - 50.0).abs() <= 1e-9);
    assert!((y - 145.0).abs() <= 1e-9);
}

proptest! {
    #[test]
    fn control_points_never_overshoot(
        steps in prop::collection::vec((0.5f64..50.0, -500.0f64..500.0), 3..80)
    ) {
        let mut x = 0.0;
        let points: Vec<CurvePoint> = steps
            .iter()
            .map(|&(gap, y)| {
                x += gap;
                point(x, y)
            })
            .collect();

        let path = monotone_curve(&points);
        prop_assert_eq!(path.commands.len(), points.len());
        for (command, pair) in path.commands[1..].iter().zip(points.windows(2)) {
            let PathCommand::CubicTo { x1, y1, x2, y2, .. } = *command else {
                return Err(TestCaseError::fail("expected cubic segment"));
            };
            let (low, high) = (pair[0].y.min(pair[1].y), pair[0].y.max(pair[1].y));
            prop_assert!(y1 >= low - 1e-6 && y1 <= high + 1e-6);
            prop_assert!(y2 >= low - 1e-6 && y2 <= high + 1e-6);
            prop_assert!(x1 >= pair[0].x && x2 <= pair[1].x);
        }
    }
}
