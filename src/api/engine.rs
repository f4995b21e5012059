use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::project_curve_points;
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer, TransitionKind};

use super::{ChartEngineConfig, InvalidationLevel, engine_core::EngineCore};

#[cfg(feature = "cairo-backend")]
use crate::render::CairoContextRenderer;

/// What a render call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderOutcome {
    /// A frame was handed to the renderer.
    Drawn,
    /// Nothing changed since the last settled frame.
    Unchanged,
    /// No data or no drawable size yet; whatever is on screen stays.
    Skipped,
}

enum PreparedFrame {
    Ready(RenderFrame),
    Unchanged,
    Skipped,
}

/// Main orchestration facade consumed by host applications.
///
/// `ChartEngine` owns the windowed series, derived scales, interaction
/// state and curve transition, and hands materialized frames to `R`.
pub struct ChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn config(&self) -> &ChartEngineConfig {
        &self.core.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn render(&mut self) -> ChartResult<RenderOutcome> {
        self.render_at(Instant::now())
    }

    /// Renders the chart as it should look at `now`.
    ///
    /// Hosts drive animations by calling this again while
    /// `needs_animation_frame()` reports `true`.
    pub fn render_at(&mut self, now: Instant) -> ChartResult<RenderOutcome> {
        let frame = match self.prepare_frame(now) {
            PreparedFrame::Ready(frame) => frame,
            PreparedFrame::Unchanged => return Ok(RenderOutcome::Unchanged),
            PreparedFrame::Skipped => return Ok(RenderOutcome::Skipped),
        };
        self.renderer.render(&frame)?;
        self.finish_frame(now);
        Ok(RenderOutcome::Drawn)
    }

    /// Builds the frame for `now` without drawing or consuming pending
    /// invalidation beyond the curve retarget.
    pub fn build_render_frame_at(&mut self, now: Instant) -> Option<RenderFrame> {
        let scales = self.refresh_scales()?;
        self.retarget_curve(now);
        let curve = self.core.transition.sample(now);
        Some(self.build_frame(&scales, &curve))
    }

    /// Renders the frame into an external cairo context.
    ///
    /// This path is used by toolkit draw callbacks while keeping the renderer
    /// implementation decoupled from toolkit-specific APIs.
    #[cfg(feature = "cairo-backend")]
    pub fn render_on_cairo_context(
        &mut self,
        context: &cairo::Context,
        now: Instant,
    ) -> ChartResult<RenderOutcome>
    where
        R: CairoContextRenderer,
    {
        let frame = match self.prepare_frame(now) {
            PreparedFrame::Ready(frame) => frame,
            PreparedFrame::Unchanged => return Ok(RenderOutcome::Unchanged),
            PreparedFrame::Skipped => return Ok(RenderOutcome::Skipped),
        };
        self.renderer.render_on_cairo_context(context, &frame)?;
        self.finish_frame(now);
        Ok(RenderOutcome::Drawn)
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn prepare_frame(&mut self, now: Instant) -> PreparedFrame {
        let Some(scales) = self.refresh_scales() else {
            trace!("render skipped: nothing drawable");
            // Geometry stays dirty; the next data or resize re-arms the level.
            self.core.runtime.finish_frame(false);
            return PreparedFrame::Skipped;
        };
        self.retarget_curve(now);
        if self.core.runtime.level == InvalidationLevel::None && !self.core.runtime.animating {
            return PreparedFrame::Unchanged;
        }
        let curve = self.core.transition.sample(now);
        PreparedFrame::Ready(self.build_frame(&scales, &curve))
    }

    fn finish_frame(&mut self, now: Instant) {
        let animating = self.core.transition.is_running(now);
        self.core.runtime.finish_frame(animating);
    }

    /// Points the curve transition at the geometry of the current scales.
    fn retarget_curve(&mut self, now: Instant) {
        if !self.core.runtime.geometry_dirty {
            return;
        }
        let Some(scales) = self.core.scales else {
            return;
        };
        self.core.runtime.geometry_dirty = false;

        let target = project_curve_points(self.visible_samples(&scales), &scales);
        let kind = self.core.runtime.take_transition_kind(!target.is_empty());
        let duration = match kind {
            TransitionKind::Morph => Duration::from_millis(self.core.config.update_transition_ms),
            TransitionKind::FadeIn => Duration::from_millis(self.core.config.fade_in_ms),
            TransitionKind::Immediate => Duration::ZERO,
        };
        // The first geometry after a reset has nothing to morph from.
        let kind = if kind == TransitionKind::Morph && !self.core.transition.has_geometry() {
            TransitionKind::Immediate
        } else {
            kind
        };
        let restarted = self.core.transition.retarget(target, now, kind, duration);
        trace!(?kind, restarted, "retarget curve");
    }
}
