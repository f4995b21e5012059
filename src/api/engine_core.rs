use crate::core::{ScalePair, SeriesStore};
use crate::interaction::InteractionState;
use crate::render::CurveTransition;

use super::{ChartEngineConfig, ViewportTracker, invalidation::RenderRuntime};

/// Internal engine core state used by the public facade (`ChartEngine`).
pub(super) struct EngineCore {
    pub(super) config: ChartEngineConfig,
    pub(super) store: SeriesStore,
    pub(super) interaction: InteractionState,
    pub(super) viewport: ViewportTracker,
    /// Scales fitted to the current series, domain and viewport. `None`
    /// while there is nothing drawable.
    pub(super) scales: Option<ScalePair>,
    pub(super) transition: CurveTransition,
    pub(super) runtime: RenderRuntime,
}
