use tracing::{debug, trace, warn};

use crate::core::{ScalePair, VisibleDomain};
use crate::error::ChartResult;
use crate::interaction::{BrushSelection, InteractionMode, TooltipState};
use crate::render::{Renderer, TransitionKind};

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn brush(&self) -> Option<BrushSelection> {
        self.core.interaction.brush()
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.core.interaction.tooltip()
    }

    /// Brushed domain, `None` when showing the full series extent.
    #[must_use]
    pub fn visible_domain(&self) -> Option<VisibleDomain> {
        self.core.interaction.visible_domain()
    }

    /// Whether the reset-zoom affordance should be shown.
    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.core.interaction.is_zoomed()
    }

    /// Starts a brush when the press lands inside the plot.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        let Some(scales) = self.refresh_scales() else {
            return;
        };
        if scales.plot.contains(x, y) {
            trace!(x, "brush start");
            self.core.interaction.on_brush_start(x);
        }
        self.hover(x, y);
    }

    /// Updates the hover tooltip and, while brushing, the selection visual.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let scales = self.refresh_scales();
        if let (InteractionMode::Brushing, Some(scales)) = (self.core.interaction.mode(), scales) {
            self.core.interaction.on_brush_move(scales.plot.clamp_x(x));
        }
        self.hover(x, y);
    }

    /// Ends a brush. A non-degenerate selection narrows the visible domain;
    /// returns `true` when it did.
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        if self.core.interaction.mode() != InteractionMode::Brushing {
            return false;
        }
        let Some(scales) = self.refresh_scales() else {
            self.cancel_brush();
            return false;
        };

        let selection = self.core.interaction.on_brush_end(scales.plot.clamp_x(x));
        self.invalidate_cursor();
        self.hover(x, y);
        let Some(selection) = selection else {
            trace!(x, "brush ended without a selection");
            return false;
        };

        match brush_to_domain(selection, &scales) {
            Ok(domain) => {
                debug!(
                    start = domain.start(),
                    end = domain.end(),
                    "zoom to brushed domain"
                );
                self.core.interaction.set_visible_domain(domain);
                self.invalidate_geometry(TransitionKind::Morph);
                true
            }
            Err(err) => {
                warn!(error = %err, "ignoring brush selection");
                false
            }
        }
    }

    /// Clears the tooltip and hover indicator.
    pub fn pointer_leave(&mut self) {
        trace!("pointer leave");
        self.core.interaction.on_pointer_leave();
        self.invalidate_cursor();
    }

    /// Aborts an in-progress brush without touching the visible domain.
    pub fn cancel_brush(&mut self) {
        if self.core.interaction.mode() == InteractionMode::Brushing {
            self.core.interaction.cancel_brush();
            self.invalidate_cursor();
        }
    }

    /// Restores the full series extent. Returns `false` when not zoomed.
    pub fn reset_zoom(&mut self) -> bool {
        if !self.core.interaction.is_zoomed() {
            return false;
        }
        debug!("reset zoom");
        self.core.interaction.reset_visible_domain();
        self.invalidate_geometry(TransitionKind::Morph);
        true
    }

    fn hover(&mut self, x: f64, y: f64) {
        self.core.interaction.on_pointer_move(x, y);
        self.refresh_tooltip();
        self.invalidate_cursor();
    }
}

/// Inverts both brush edges through the active time scale.
fn brush_to_domain(selection: BrushSelection, scales: &ScalePair) -> ChartResult<VisibleDomain> {
    let (left, right) = selection.span();
    let start = scales.time.pixel_to_time(left)?;
    let end = scales.time.pixel_to_time(right)?;
    VisibleDomain::new(start, end)
}
