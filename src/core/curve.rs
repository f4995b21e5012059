use serde::{Deserialize, Serialize};

use crate::core::{Sample, ScalePair};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

#[cfg(feature = "parallel-projection")]
const PARALLEL_PROJECTION_MIN_SAMPLES: usize = 4_096;

/// One projected sample, keyed by its time for transition matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub time: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
}

/// Smooth path through projected samples in canvas pixels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurvePath {
    pub commands: Vec<PathCommand>,
}

impl CurvePath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Projects samples through the scale pair.
#[must_use]
pub fn project_curve_points(samples: &[Sample], scales: &ScalePair) -> Vec<CurvePoint> {
    let project = |sample: &Sample| {
        let (x, y) = scales.project(*sample);
        CurvePoint {
            time: sample.time,
            x,
            y,
        }
    };

    #[cfg(feature = "parallel-projection")]
    if samples.len() >= PARALLEL_PROJECTION_MIN_SAMPLES {
        return samples.par_iter().map(project).collect();
    }

    samples.iter().map(project).collect()
}

/// Builds a monotone cubic path through `points` (ordered by x).
///
/// Tangents follow the Steffen limiter, so the curve never overshoots
/// between neighbouring points and never invents local extrema. One
/// point yields a zero-length segment so round line caps still draw a dot.
#[must_use]
pub fn monotone_curve(points: &[CurvePoint]) -> CurvePath {
    let mut commands = Vec::with_capacity(points.len() + 1);
    match points {
        [] => {}
        [only] => {
            commands.push(PathCommand::MoveTo {
                x: only.x,
                y: only.y,
            });
            commands.push(PathCommand::LineTo {
                x: only.x,
                y: only.y,
            });
        }
        [first, second] => {
            commands.push(PathCommand::MoveTo {
                x: first.x,
                y: first.y,
            });
            commands.push(PathCommand::LineTo {
                x: second.x,
                y: second.y,
            });
        }
        _ => {
            let tangents = monotone_tangents(points);
            commands.push(PathCommand::MoveTo {
                x: points[0].x,
                y: points[0].y,
            });
            for (index, pair) in points.windows(2).enumerate() {
                let (p0, p1) = (pair[0], pair[1]);
                let dx = (p1.x - p0.x) / 3.0;
                commands.push(PathCommand::CubicTo {
                    x1: p0.x + dx,
                    y1: p0.y + dx * tangents[index],
                    x2: p1.x - dx,
                    y2: p1.y - dx * tangents[index + 1],
                    x: p1.x,
                    y: p1.y,
                });
            }
        }
    }
    CurvePath { commands }
}

/// Convenience: project and build the curve in one step.
#[must_use]
pub fn project_curve(samples: &[Sample], scales: &ScalePair) -> CurvePath {
    monotone_curve(&project_curve_points(samples, scales))
}

fn monotone_tangents(points: &[CurvePoint]) -> Vec<f64> {
    let n = points.len();
    let mut tangents = vec![0.0; n];
    for i in 1..n - 1 {
        tangents[i] = interior_tangent(points[i - 1], points[i], points[i + 1]);
    }
    tangents[0] = endpoint_tangent(points[0], points[1], tangents[1]);
    tangents[n - 1] = endpoint_tangent(points[n - 2], points[n - 1], tangents[n - 2]);
    tangents
}

fn interior_tangent(p0: CurvePoint, p1: CurvePoint, p2: CurvePoint) -> f64 {
    let h0 = p1.x - p0.x;
    let h1 = p2.x - p1.x;
    let s0 = (p1.y - p0.y) / h0;
    let s1 = (p2.y - p1.y) / h1;
    let p = (s0 * h1 + s1 * h0) / (h0 + h1);
    let tangent = (sign(s0) + sign(s1)) * s0.abs().min(s1.abs()).min(0.5 * p.abs());
    if tangent.is_finite() { tangent } else { 0.0 }
}

/// One-sided tangent for the first/last point given its neighbour's tangent.
fn endpoint_tangent(p0: CurvePoint, p1: CurvePoint, neighbor_tangent: f64) -> f64 {
    let h = p1.x - p0.x;
    if h == 0.0 {
        return neighbor_tangent;
    }
    let tangent = (3.0 * (p1.y - p0.y) / h - neighbor_tangent) / 2.0;
    if tangent.is_finite() { tangent } else { 0.0 }
}

fn sign(value: f64) -> f64 {
    if value < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::{CurvePoint, PathCommand, monotone_curve};

    fn point(x: f64, y: f64) -> CurvePoint {
        CurvePoint { time: x, x, y }
    }

    #[test]
    fn tangent_is_flat_at_local_extremum() {
        let path = monotone_curve(&[point(0.0, 0.0), point(1.0, 10.0), point(2.0, 0.0)]);
        let PathCommand::CubicTo { y2, y, .. } = path.commands[1] else {
            panic!("expected cubic segment");
        };
        assert_eq!(y2, y);
    }

    #[test]
    fn control_points_stay_within_segment_bounds() {
        let points = [
            point(0.0, 0.0),
            point(1.0, 1.0),
            point(2.0, 1.1),
            point(3.0, 5.0),
            point(4.0, 5.0),
        ];
        let path = monotone_curve(&points);
        for (segment, pair) in path.commands[1..].iter().zip(points.windows(2)) {
            let PathCommand::CubicTo { y1, y2, .. } = *segment else {
                panic!("expected cubic segment");
            };
            let (low, high) = (pair[0].y.min(pair[1].y), pair[0].y.max(pair[1].y));
            assert!(y1 >= low - 1e-9 && y1 <= high + 1e-9);
            assert!(y2 >= low - 1e-9 && y2 <= high + 1e-9);
        }
    }

    #[test]
    fn duplicate_x_does_not_produce_nan() {
        let path = monotone_curve(&[point(0.0, 0.0), point(0.0, 5.0), point(1.0, 2.0)]);
        for command in path.commands {
            if let PathCommand::CubicTo { x1, y1, x2, y2, .. } = command {
                assert!(x1.is_finite() && y1.is_finite() && x2.is_finite() && y2.is_finite());
            }
        }
    }
}
