use std::ops::Range;

use tracing::{trace, warn};

use crate::core::{
    Sample, ScalePair, VisibleDomain, compute_scales, samples_in_time_window_with_neighbors,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartEngine;

impl<R: Renderer> ChartEngine<R> {
    /// Returns scales fitted to the current state, refitting only when
    /// data, domain or viewport changed since the last fit.
    pub(super) fn refresh_scales(&mut self) -> Option<ScalePair> {
        if !self.core.runtime.scales_dirty {
            return self.core.scales;
        }
        self.core.runtime.scales_dirty = false;
        self.core.scales = self.fit_scales();
        if self.core.interaction.cursor().is_some() {
            self.refresh_tooltip();
        }
        self.core.scales
    }

    fn fit_scales(&self) -> Option<ScalePair> {
        let samples = self.core.store.series().as_slice();
        if samples.is_empty() {
            return None;
        }
        let viewport = self.viewport();
        if !viewport.is_valid() {
            trace!(
                width = viewport.width,
                height = viewport.height,
                "skip scale fit until a drawable size is known"
            );
            return None;
        }

        match compute_scales(
            samples,
            self.core.interaction.visible_domain(),
            viewport,
            self.core.config.margins,
            self.core.config.price_tick_count,
        ) {
            Ok(scales) => Some(scales),
            Err(err) => {
                warn!(error = %err, "skipping scale fit");
                None
            }
        }
    }

    /// Index range of samples the curve passes through: the visible window
    /// plus one neighbour per side.
    pub(super) fn visible_sample_range(&self, scales: &ScalePair) -> Range<usize> {
        let samples = self.core.store.series().as_slice();
        let (start, end) = scales.time.visible_range();
        match VisibleDomain::new(start, end) {
            Ok(domain) => samples_in_time_window_with_neighbors(samples, domain),
            Err(_) => 0..samples.len(),
        }
    }

    pub(super) fn visible_samples(&self, scales: &ScalePair) -> &[Sample] {
        let range = self.visible_sample_range(scales);
        &self.core.store.series().as_slice()[range]
    }

    /// Scales fitted to the current series, domain and viewport. `None`
    /// while the series is empty or no width has been measured.
    pub fn scales(&mut self) -> Option<ScalePair> {
        self.refresh_scales()
    }

    /// Time range currently shown: the brushed domain, or the full series
    /// extent when not zoomed.
    pub fn visible_time_range(&mut self) -> Option<(f64, f64)> {
        self.refresh_scales().map(|scales| scales.time.visible_range())
    }

    pub fn map_time_to_pixel(&mut self, time: f64) -> ChartResult<f64> {
        self.fitted_scales()?.time.time_to_pixel(time)
    }

    pub fn map_pixel_to_time(&mut self, pixel: f64) -> ChartResult<f64> {
        self.fitted_scales()?.time.pixel_to_time(pixel)
    }

    pub fn map_price_to_pixel(&mut self, price: f64) -> ChartResult<f64> {
        self.fitted_scales()?.price.price_to_pixel(price)
    }

    fn fitted_scales(&mut self) -> ChartResult<ScalePair> {
        self.refresh_scales().ok_or_else(|| {
            ChartError::InvalidData("no scales: series is empty or viewport is unmeasured".to_owned())
        })
    }
}
