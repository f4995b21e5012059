use crate::core::{ScalePair, monotone_curve};
use crate::render::{
    CanvasLayerKind, LinePrimitive, PathPrimitive, RectPrimitive, RenderFrame, Renderer,
    StrokePaint, TextHAlign, TextPrimitive, TransitionFrame,
};

use super::ChartEngine;
use super::axis_label_format::{format_price_axis_label, format_time_axis_label};

const TICK_SIZE_PX: f64 = 6.0;
const TICK_LABEL_PADDING_PX: f64 = 3.0;

impl<R: Renderer> ChartEngine<R> {
    /// Materializes the full frame for already fitted scales and curve state.
    pub(super) fn build_frame(&self, scales: &ScalePair, curve: &TransitionFrame) -> RenderFrame {
        let mut frame = RenderFrame::new(scales.viewport);
        self.push_background(&mut frame, scales);
        self.push_price_grid(&mut frame, scales);
        self.push_series_path(&mut frame, scales, curve);
        self.push_brush(&mut frame, scales);
        self.push_hover(&mut frame, scales);
        self.push_axes(&mut frame, scales);
        frame
    }

    fn push_background(&self, frame: &mut RenderFrame, scales: &ScalePair) {
        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                0.0,
                0.0,
                f64::from(scales.viewport.width),
                f64::from(scales.viewport.height),
                self.core.config.style.background_color,
            ),
        );
    }

    fn push_price_grid(&self, frame: &mut RenderFrame, scales: &ScalePair) {
        let style = self.core.config.style;
        for price in scales.price.ticks() {
            let y = scales.price.project(price);
            frame.push_line(
                CanvasLayerKind::Grid,
                LinePrimitive::new(
                    scales.plot.left,
                    y,
                    scales.plot.right,
                    y,
                    style.grid_line_width,
                    style.grid_line_color,
                ),
            );
        }
    }

    fn push_series_path(&self, frame: &mut RenderFrame, scales: &ScalePair, curve: &TransitionFrame) {
        let path = monotone_curve(&curve.points);
        if path.is_empty() {
            return;
        }
        let style = self.core.config.style;
        let paint = if style.line_color_start == style.line_color_end {
            StrokePaint::Solid(style.line_color_start)
        } else {
            StrokePaint::HorizontalGradient {
                from: style.line_color_start,
                to: style.line_color_end,
                x_start: scales.plot.left,
                x_end: scales.plot.right,
            }
        };
        frame.push_path(
            CanvasLayerKind::Series,
            PathPrimitive {
                commands: path.commands,
                stroke_width: style.line_stroke_width,
                paint,
                opacity: curve.opacity.clamp(0.0, 1.0),
                clip: Some(scales.plot),
            },
        );
    }

    fn push_brush(&self, frame: &mut RenderFrame, scales: &ScalePair) {
        let Some(brush) = self.core.interaction.brush() else {
            return;
        };
        let (left, right) = brush.span();
        let style = self.core.config.style;
        frame.push_rect(
            CanvasLayerKind::Overlay,
            RectPrimitive::new(
                left,
                scales.plot.top,
                right - left,
                scales.plot.height(),
                style.brush_fill_color,
            )
            .with_border(1.0, style.brush_border_color),
        );
    }

    fn push_hover(&self, frame: &mut RenderFrame, scales: &ScalePair) {
        let Some(tooltip) = self.core.interaction.tooltip() else {
            return;
        };
        let style = self.core.config.style;
        frame.push_line(
            CanvasLayerKind::Crosshair,
            LinePrimitive::new(
                tooltip.screen_x,
                scales.plot.top,
                tooltip.screen_x,
                scales.plot.bottom,
                style.guide_line_width,
                style.guide_line_color,
            ),
        );

        let radius = style.marker_radius_px;
        frame.push_rect(
            CanvasLayerKind::Crosshair,
            RectPrimitive::new(
                tooltip.screen_x - radius,
                tooltip.screen_y - radius,
                radius * 2.0,
                radius * 2.0,
                style.marker_color,
            )
            .with_corner_radius(radius),
        );
    }

    fn push_axes(&self, frame: &mut RenderFrame, scales: &ScalePair) {
        let style = self.core.config.style;
        let plot = scales.plot;
        let font_size = style.axis_label_font_size_px;

        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.left, plot.bottom, plot.right, plot.bottom, 1.0, style.axis_line_color),
        );
        frame.push_line(
            CanvasLayerKind::Axis,
            LinePrimitive::new(plot.left, plot.top, plot.left, plot.bottom, 1.0, style.axis_line_color),
        );

        let (visible_start, visible_end) = scales.time.visible_range();
        let visible_span = visible_end - visible_start;
        for time in scales.time.ticks(self.core.config.time_tick_count) {
            let x = scales.time.project(time);
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(x, plot.bottom, x, plot.bottom + TICK_SIZE_PX, 1.0, style.axis_line_color),
            );
            frame.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    format_time_axis_label(time, visible_span),
                    x,
                    plot.bottom + TICK_SIZE_PX + TICK_LABEL_PADDING_PX,
                    font_size,
                    style.axis_label_color,
                    TextHAlign::Center,
                ),
            );
        }

        let price_ticks = scales.price.ticks();
        let step = match price_ticks.as_slice() {
            [first, second, ..] => second - first,
            _ => {
                let (min, max) = scales.price.domain();
                max - min
            }
        };
        for price in price_ticks {
            let y = scales.price.project(price);
            frame.push_line(
                CanvasLayerKind::Axis,
                LinePrimitive::new(plot.left - TICK_SIZE_PX, y, plot.left, y, 1.0, style.axis_line_color),
            );
            frame.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    format_price_axis_label(price, step),
                    plot.left - TICK_SIZE_PX - TICK_LABEL_PADDING_PX,
                    y - font_size / 2.0,
                    font_size,
                    style.axis_label_color,
                    TextHAlign::Right,
                ),
            );
        }
    }
}
