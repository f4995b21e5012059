use std::time::{Duration, Instant};

use crate::core::CurvePoint;

/// How the next geometry change should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TransitionKind {
    /// Interpolate positions from the current drawing to the new one.
    Morph,
    /// Jump straight to the new geometry (resize).
    Immediate,
    /// Draw the new geometry directly while fading the curve in.
    FadeIn,
}

/// Interpolated curve geometry at a given instant.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionFrame {
    pub points: Vec<CurvePoint>,
    pub opacity: f64,
}

/// Keeps the last drawn curve points and animates toward new targets.
///
/// A new target is diffed against what is currently on screen: points with
/// a matching sample time travel from their old position, new points start
/// at the on-screen point nearest in time, and points no longer present are
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct CurveTransition {
    from: Vec<CurvePoint>,
    to: Vec<CurvePoint>,
    started_at: Option<Instant>,
    duration: Duration,
    kind: Option<TransitionKind>,
}

impl CurveTransition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Target geometry of the current (or last) transition.
    #[must_use]
    pub fn target(&self) -> &[CurvePoint] {
        &self.to
    }

    #[must_use]
    pub fn has_geometry(&self) -> bool {
        !self.to.is_empty()
    }

    /// Forgets all drawn geometry, e.g. when the instrument changes.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Starts a transition toward `target`. Returns `false` when the target
    /// equals the current one, in which case nothing restarts.
    pub fn retarget(
        &mut self,
        target: Vec<CurvePoint>,
        now: Instant,
        kind: TransitionKind,
        duration: Duration,
    ) -> bool {
        if self.kind.is_some() && target == self.to {
            return false;
        }
        // A running fade-in keeps its clock; only the faded geometry moves.
        if self.kind == Some(TransitionKind::FadeIn)
            && matches!(kind, TransitionKind::Morph | TransitionKind::Immediate)
            && self.is_running(now)
        {
            self.from = target.clone();
            self.to = target;
            return true;
        }

        let on_screen = self.sample(now).points;
        self.from = match kind {
            TransitionKind::Morph => entering_positions(&on_screen, &target),
            TransitionKind::Immediate | TransitionKind::FadeIn => target.clone(),
        };
        self.to = target;
        self.started_at = Some(now);
        self.duration = match kind {
            TransitionKind::Immediate => Duration::ZERO,
            TransitionKind::Morph | TransitionKind::FadeIn => duration,
        };
        self.kind = Some(kind);
        true
    }

    #[must_use]
    pub fn is_running(&self, now: Instant) -> bool {
        self.progress(now) < 1.0
    }

    /// Geometry and opacity to draw at `now`.
    #[must_use]
    pub fn sample(&self, now: Instant) -> TransitionFrame {
        let eased = ease_cubic_in_out(self.progress(now));
        match self.kind {
            None => TransitionFrame {
                points: Vec::new(),
                opacity: 1.0,
            },
            Some(TransitionKind::FadeIn) => TransitionFrame {
                points: self.to.clone(),
                opacity: eased,
            },
            Some(TransitionKind::Morph | TransitionKind::Immediate) => {
                if eased >= 1.0 {
                    return TransitionFrame {
                        points: self.to.clone(),
                        opacity: 1.0,
                    };
                }
                let points = self
                    .from
                    .iter()
                    .zip(&self.to)
                    .map(|(from, to)| CurvePoint {
                        time: to.time,
                        x: lerp(from.x, to.x, eased),
                        y: lerp(from.y, to.y, eased),
                    })
                    .collect();
                TransitionFrame {
                    points,
                    opacity: 1.0,
                }
            }
        }
    }

    fn progress(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}

/// Start position for every target point, taken from the on-screen curve.
fn entering_positions(on_screen: &[CurvePoint], target: &[CurvePoint]) -> Vec<CurvePoint> {
    if on_screen.is_empty() {
        return target.to_vec();
    }

    target
        .iter()
        .map(|point| {
            let index = on_screen.partition_point(|old| old.time < point.time);
            let source = match (index.checked_sub(1), on_screen.get(index)) {
                (_, Some(right)) if right.time == point.time => *right,
                (Some(left), Some(right)) => {
                    let left = on_screen[left];
                    if point.time - left.time <= right.time - point.time {
                        left
                    } else {
                        *right
                    }
                }
                (Some(left), None) => on_screen[left],
                (None, Some(right)) => *right,
                (None, None) => *point,
            };
            CurvePoint {
                time: point.time,
                x: source.x,
                y: source.y,
            }
        })
        .collect()
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}
