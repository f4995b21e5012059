mod nearest;

pub use nearest::{nearest_sample_index, nearest_sample_index_bruteforce};

use serde::{Deserialize, Serialize};

use crate::core::VisibleDomain;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Brushing,
}

/// Pixel span of an in-progress brush gesture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSelection {
    pub start_x: f64,
    pub current_x: f64,
}

impl BrushSelection {
    /// Returns `(left, right)` regardless of drag direction.
    #[must_use]
    pub fn span(self) -> (f64, f64) {
        (
            self.start_x.min(self.current_x),
            self.start_x.max(self.current_x),
        )
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start_x == self.current_x
    }
}

/// Hover readout published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub screen_x: f64,
    pub screen_y: f64,
    pub time: f64,
    pub price: f64,
    pub formatted_date: String,
}

/// All pointer-driven view state, mutated only by the engine's pointer
/// handlers and read by scale and frame building.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    mode: InteractionMode,
    brush: Option<BrushSelection>,
    visible_domain: Option<VisibleDomain>,
    cursor: Option<(f64, f64)>,
    tooltip: Option<TooltipState>,
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    #[must_use]
    pub fn brush(&self) -> Option<BrushSelection> {
        self.brush
    }

    #[must_use]
    pub fn visible_domain(&self) -> Option<VisibleDomain> {
        self.visible_domain
    }

    #[must_use]
    pub fn is_zoomed(&self) -> bool {
        self.visible_domain.is_some()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<(f64, f64)> {
        self.cursor
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<&TooltipState> {
        self.tooltip.as_ref()
    }

    pub fn on_brush_start(&mut self, x: f64) {
        self.mode = InteractionMode::Brushing;
        self.brush = Some(BrushSelection {
            start_x: x,
            current_x: x,
        });
    }

    /// Updates the selection visual. Ignored while idle.
    pub fn on_brush_move(&mut self, x: f64) {
        if let Some(brush) = self.brush.as_mut() {
            brush.current_x = x;
        }
    }

    /// Ends the gesture and returns the final selection, if any.
    ///
    /// A zero-width selection returns `None` and leaves the domain untouched.
    pub fn on_brush_end(&mut self, x: f64) -> Option<BrushSelection> {
        self.mode = InteractionMode::Idle;
        let mut brush = self.brush.take()?;
        brush.current_x = x;
        (!brush.is_degenerate()).then_some(brush)
    }

    pub fn cancel_brush(&mut self) {
        self.mode = InteractionMode::Idle;
        self.brush = None;
    }

    pub fn set_visible_domain(&mut self, domain: VisibleDomain) {
        self.visible_domain = Some(domain);
    }

    pub fn reset_visible_domain(&mut self) {
        self.visible_domain = None;
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.cursor = Some((x, y));
    }

    pub fn on_pointer_leave(&mut self) {
        self.cursor = None;
        self.tooltip = None;
    }

    pub fn set_tooltip(&mut self, tooltip: Option<TooltipState>) {
        self.tooltip = tooltip;
    }

    /// Returns to the state of a freshly selected instrument.
    pub fn reset_for_new_context(&mut self) {
        self.cancel_brush();
        self.visible_domain = None;
        self.tooltip = None;
    }
}
