use tracing::trace;

use crate::core::Viewport;
use crate::render::{Renderer, TransitionKind};

use super::ChartEngine;

/// Tracks the host container width; height stays at its configured value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportTracker {
    current: Viewport,
}

impl ViewportTracker {
    #[must_use]
    pub fn new(initial: Viewport) -> Self {
        Self { current: initial }
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.current
    }

    /// Records a measured width and returns the new viewport when it
    /// changed. A zero width is kept, leaving the viewport undrawable until
    /// a positive width arrives.
    pub fn observe_width(&mut self, width: u32) -> Option<Viewport> {
        if width == self.current.width {
            return None;
        }
        self.current = Viewport::new(width, self.current.height);
        Some(self.current)
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.viewport.viewport()
    }

    /// Feeds a host width measurement (mount or resize notification).
    ///
    /// Returns `true` when the engine re-laid out. Geometry jumps to the new
    /// size without animating.
    pub fn observe_width(&mut self, width: u32) -> bool {
        let Some(viewport) = self.core.viewport.observe_width(width) else {
            trace!(width, "ignore width observation");
            return false;
        };
        trace!(width = viewport.width, height = viewport.height, "viewport resized");
        self.core.interaction.cancel_brush();
        self.invalidate_geometry(TransitionKind::Immediate);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::ViewportTracker;
    use crate::core::Viewport;

    #[test]
    fn repeated_widths_are_ignored_and_zero_is_kept() {
        let mut tracker = ViewportTracker::new(Viewport::new(600, 300));
        assert_eq!(tracker.observe_width(600), None);
        assert_eq!(tracker.observe_width(0), Some(Viewport::new(0, 300)));
        assert!(!tracker.viewport().is_valid());
        assert_eq!(tracker.observe_width(0), None);
        assert_eq!(tracker.observe_width(800), Some(Viewport::new(800, 300)));
        assert_eq!(tracker.viewport(), Viewport::new(800, 300));
    }
}
