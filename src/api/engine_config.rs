use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_PRICE_TICK_COUNT, DEFAULT_RETENTION_WINDOW_SECS, PlotMargins, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and stroke metrics used by frame building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub background_color: Color,
    /// Line gradient color at the left edge of the plot.
    pub line_color_start: Color,
    /// Line gradient color at the right edge of the plot.
    pub line_color_end: Color,
    pub line_stroke_width: f64,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_line_color: Color,
    pub axis_label_color: Color,
    pub axis_label_font_size_px: f64,
    pub brush_fill_color: Color,
    pub brush_border_color: Color,
    pub guide_line_color: Color,
    pub guide_line_width: f64,
    pub marker_color: Color,
    pub marker_radius_px: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(249.0 / 255.0, 249.0 / 255.0, 249.0 / 255.0),
            line_color_start: Color::rgb(0.0, 0.0, 1.0),
            line_color_end: Color::rgb(128.0 / 255.0, 0.0, 128.0 / 255.0),
            line_stroke_width: 2.0,
            grid_line_color: Color::rgba(0.0, 0.0, 0.0, 0.08),
            grid_line_width: 1.0,
            axis_line_color: Color::rgb(0.2, 0.2, 0.2),
            axis_label_color: Color::rgb(0.2, 0.2, 0.2),
            axis_label_font_size_px: 10.0,
            brush_fill_color: Color::rgba(0.47, 0.47, 0.47, 0.3),
            brush_border_color: Color::rgb(1.0, 1.0, 1.0),
            guide_line_color: Color::rgba(0.4, 0.4, 0.4, 0.8),
            guide_line_width: 1.0,
            marker_color: Color::rgb(128.0 / 255.0, 0.0, 128.0 / 255.0),
            marker_radius_px: 4.0,
        }
    }
}

impl ChartStyle {
    pub fn validate(self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.line_color_start,
            self.line_color_end,
            self.grid_line_color,
            self.axis_line_color,
            self.axis_label_color,
            self.brush_fill_color,
            self.brush_border_color,
            self.guide_line_color,
            self.marker_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("line_stroke_width", self.line_stroke_width),
            ("grid_line_width", self.grid_line_width),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("guide_line_width", self.guide_line_width),
            ("marker_radius_px", self.marker_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load chart setup
/// without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartEngineConfig {
    /// Canvas height; fixed for the engine lifetime.
    pub height_px: u32,
    /// Width used until the host reports a measured width.
    pub initial_width_px: Option<u32>,
    pub margins: PlotMargins,
    pub price_tick_count: usize,
    pub time_tick_count: usize,
    pub update_transition_ms: u64,
    pub fade_in_ms: u64,
    pub retention_window_secs: f64,
    /// chrono strftime pattern for the tooltip date.
    pub tooltip_date_format: String,
    pub style: ChartStyle,
}

impl Default for ChartEngineConfig {
    fn default() -> Self {
        Self {
            height_px: 300,
            initial_width_px: Some(600),
            margins: PlotMargins::default(),
            price_tick_count: DEFAULT_PRICE_TICK_COUNT,
            time_tick_count: 6,
            update_transition_ms: 200,
            fade_in_ms: 500,
            retention_window_secs: DEFAULT_RETENTION_WINDOW_SECS,
            tooltip_date_format: "%b %d, %Y %H:%M:%S".to_owned(),
            style: ChartStyle::default(),
        }
    }
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_height_px(mut self, height_px: u32) -> Self {
        self.height_px = height_px;
        self
    }

    #[must_use]
    pub fn with_initial_width_px(mut self, width_px: Option<u32>) -> Self {
        self.initial_width_px = width_px;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: PlotMargins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_price_tick_count(mut self, count: usize) -> Self {
        self.price_tick_count = count;
        self
    }

    #[must_use]
    pub fn with_time_tick_count(mut self, count: usize) -> Self {
        self.time_tick_count = count;
        self
    }

    /// Sets update/fade-in durations in milliseconds. Zero disables the
    /// corresponding animation.
    #[must_use]
    pub fn with_transition_ms(mut self, update_transition_ms: u64, fade_in_ms: u64) -> Self {
        self.update_transition_ms = update_transition_ms;
        self.fade_in_ms = fade_in_ms;
        self
    }

    #[must_use]
    pub fn with_retention_window_secs(mut self, seconds: f64) -> Self {
        self.retention_window_secs = seconds;
        self
    }

    #[must_use]
    pub fn with_tooltip_date_format(mut self, format: impl Into<String>) -> Self {
        self.tooltip_date_format = format.into();
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Viewport the engine starts with. Width is zero until measured when
    /// no initial width is configured.
    #[must_use]
    pub fn initial_viewport(&self) -> Viewport {
        Viewport::new(self.initial_width_px.unwrap_or(0), self.height_px)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.height_px == 0 {
            return Err(ChartError::InvalidViewport {
                width: self.initial_width_px.unwrap_or(0),
                height: self.height_px,
            });
        }
        self.margins.validate()?;
        if self.price_tick_count == 0 || self.time_tick_count == 0 {
            return Err(ChartError::InvalidData(
                "tick counts must be > 0".to_owned(),
            ));
        }
        if !self.retention_window_secs.is_finite() || self.retention_window_secs <= 0.0 {
            return Err(ChartError::InvalidData(
                "retention window must be finite and > 0".to_owned(),
            ));
        }
        if self.tooltip_date_format.is_empty()
            || StrftimeItems::new(&self.tooltip_date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ChartError::InvalidData(format!(
                "invalid tooltip date format `{}`",
                self.tooltip_date_format
            )));
        }
        self.style.validate()
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
