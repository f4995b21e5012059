use tracing::debug;

use crate::core::{Clock, SeriesStore, SystemClock};
use crate::error::ChartResult;
use crate::interaction::InteractionState;
use crate::render::{CurveTransition, Renderer};

use super::{
    ChartEngine, ChartEngineConfig, ViewportTracker, engine_core::EngineCore,
    invalidation::RenderRuntime,
};

impl<R: Renderer> ChartEngine<R> {
    /// Creates an engine reading wall-clock time from the system clock.
    pub fn new(renderer: R, config: ChartEngineConfig) -> ChartResult<Self> {
        Self::with_clock(renderer, config, Box::new(SystemClock))
    }

    /// Creates an engine with an explicit clock used for retention eviction.
    pub fn with_clock(
        renderer: R,
        config: ChartEngineConfig,
        clock: Box<dyn Clock>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let store = SeriesStore::new(config.retention_window_secs, clock)?;
        let viewport = ViewportTracker::new(config.initial_viewport());
        debug!(
            width = viewport.viewport().width,
            height = viewport.viewport().height,
            retention_window_secs = config.retention_window_secs,
            "create chart engine"
        );

        Ok(Self {
            renderer,
            core: EngineCore {
                config,
                store,
                interaction: InteractionState::default(),
                viewport,
                scales: None,
                transition: CurveTransition::new(),
                runtime: RenderRuntime::with_full_invalidation(),
            },
        })
    }
}
