use crate::interaction::{TooltipState, nearest_sample_index};
use crate::render::Renderer;

use super::ChartEngine;
use super::axis_label_format::format_tooltip_date;

impl<R: Renderer> ChartEngine<R> {
    /// Tooltip for the sample nearest to `pointer_x` across the whole series.
    pub(super) fn tooltip_at_x(&self, pointer_x: f64) -> Option<TooltipState> {
        let scales = self.core.scales?;
        let samples = self.core.store.series().as_slice();
        let index = nearest_sample_index(samples, scales.time, pointer_x)?;
        let sample = samples[index];
        let (screen_x, screen_y) = scales.project(sample);
        let formatted_date = format_tooltip_date(sample.time, &self.core.config.tooltip_date_format)?;
        Some(TooltipState {
            screen_x,
            screen_y,
            time: sample.time,
            price: sample.price,
            formatted_date,
        })
    }

    /// Recomputes the tooltip for the current cursor, clearing it when the
    /// cursor is outside the plot.
    pub(super) fn refresh_tooltip(&mut self) {
        let tooltip = match (self.core.interaction.cursor(), self.core.scales) {
            (Some((x, y)), Some(scales)) if scales.plot.contains(x, y) => self.tooltip_at_x(x),
            _ => None,
        };
        self.core.interaction.set_tooltip(tooltip);
    }
}
