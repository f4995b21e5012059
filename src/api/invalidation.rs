use serde::{Deserialize, Serialize};

use crate::render::{Renderer, TransitionKind};

use super::ChartEngine;

/// Ordered repaint classes. `Cursor` only touches hover/brush overlays,
/// `Full` recomputes scales and curve geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum InvalidationLevel {
    #[default]
    None,
    Cursor,
    Full,
}

impl InvalidationLevel {
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self as u8 >= other as u8 {
            self
        } else {
            other
        }
    }
}

/// Pending redraw work, coalesced between render calls.
///
/// Data, domain and viewport changes all funnel into the dirty flags; the
/// strongest requested transition kind wins when several land before the
/// next render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct RenderRuntime {
    pub(super) level: InvalidationLevel,
    /// Scales must be refitted before the next hit test or draw.
    pub(super) scales_dirty: bool,
    /// Curve target must be re-projected on the next draw.
    pub(super) geometry_dirty: bool,
    pending_transition: Option<TransitionKind>,
    /// Set on instrument change, consumed by the first non-empty geometry.
    pub(super) fade_in_armed: bool,
    /// Last drawn frame was mid-transition.
    pub(super) animating: bool,
}

impl RenderRuntime {
    pub(super) fn with_full_invalidation() -> Self {
        Self {
            level: InvalidationLevel::Full,
            scales_dirty: true,
            geometry_dirty: true,
            pending_transition: Some(TransitionKind::Immediate),
            fade_in_armed: false,
            animating: false,
        }
    }

    pub(super) fn request_geometry(&mut self, kind: TransitionKind) {
        self.level = self.level.max(InvalidationLevel::Full);
        self.scales_dirty = true;
        self.geometry_dirty = true;
        self.pending_transition = Some(match self.pending_transition {
            Some(pending) => pending.max(kind),
            None => kind,
        });
    }

    pub(super) fn request_cursor(&mut self) {
        self.level = self.level.max(InvalidationLevel::Cursor);
    }

    /// Transition to use for the pending geometry. An armed fade-in is
    /// consumed only when there is something to fade in.
    pub(super) fn take_transition_kind(&mut self, has_geometry: bool) -> TransitionKind {
        let pending = self.pending_transition.take().unwrap_or(TransitionKind::Morph);
        if self.fade_in_armed && has_geometry {
            self.fade_in_armed = false;
            return TransitionKind::FadeIn;
        }
        pending
    }

    pub(super) fn finish_frame(&mut self, animating: bool) {
        self.level = InvalidationLevel::None;
        self.animating = animating;
    }
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.core.runtime.level
    }

    /// Whether the host should schedule another render: there is pending
    /// invalidation, or the last frame was drawn mid-transition.
    #[must_use]
    pub fn needs_animation_frame(&self) -> bool {
        self.core.runtime.level != InvalidationLevel::None || self.core.runtime.animating
    }

    pub fn invalidate_full(&mut self) {
        self.invalidate_geometry(TransitionKind::Immediate);
    }

    pub(super) fn invalidate_geometry(&mut self, kind: TransitionKind) {
        self.core.runtime.request_geometry(kind);
    }

    pub(super) fn invalidate_cursor(&mut self) {
        self.core.runtime.request_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::{InvalidationLevel, RenderRuntime};
    use crate::render::TransitionKind;

    #[test]
    fn strongest_transition_wins() {
        let mut runtime = RenderRuntime::default();
        runtime.request_geometry(TransitionKind::Morph);
        runtime.request_geometry(TransitionKind::Immediate);
        runtime.request_geometry(TransitionKind::Morph);
        assert_eq!(runtime.level, InvalidationLevel::Full);
        assert_eq!(runtime.take_transition_kind(true), TransitionKind::Immediate);
        assert_eq!(runtime.take_transition_kind(true), TransitionKind::Morph);
    }

    #[test]
    fn armed_fade_in_waits_for_geometry() {
        let mut runtime = RenderRuntime {
            fade_in_armed: true,
            ..RenderRuntime::default()
        };
        runtime.request_geometry(TransitionKind::Morph);
        assert_eq!(runtime.take_transition_kind(false), TransitionKind::Morph);
        runtime.request_geometry(TransitionKind::Morph);
        assert_eq!(runtime.take_transition_kind(true), TransitionKind::FadeIn);
        assert!(!runtime.fade_in_armed);
    }

    #[test]
    fn cursor_does_not_downgrade_full() {
        let mut runtime = RenderRuntime::with_full_invalidation();
        runtime.request_cursor();
        assert_eq!(runtime.level, InvalidationLevel::Full);
    }
}
