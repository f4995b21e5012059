use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PlotRect, Sample};
use crate::error::{ChartError, ChartResult};

/// Smallest time span (seconds) any fitted or brushed domain may have.
pub const MIN_TIME_SPAN_SECS: f64 = 1.0;

/// A `(start, end)` time range with `end - start >= MIN_TIME_SPAN_SECS`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleDomain {
    start: f64,
    end: f64,
}

impl VisibleDomain {
    /// Orders the endpoints and widens spans below one second around their center.
    pub fn new(start: f64, end: f64) -> ChartResult<Self> {
        let (start, end) = normalize_range(start, end, MIN_TIME_SPAN_SECS)?;
        Ok(Self { start, end })
    }

    #[must_use]
    pub fn start(self) -> f64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> f64 {
        self.end
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, time: f64) -> bool {
        time >= self.start && time <= self.end
    }
}

/// Time axis model with separate full and visible ranges.
///
/// `full_*` tracks the fitted series extent.
/// `visible_*` is either the full extent or a brushed sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
    linear: LinearScale,
}

impl TimeScale {
    /// Creates a scale whose full and visible ranges match.
    pub fn new(time_start: f64, time_end: f64, plot: PlotRect) -> ChartResult<Self> {
        let domain = VisibleDomain::new(time_start, time_end)?;
        Self::with_ranges(domain, domain, plot)
    }

    /// Fits the full range to the series extent and maps `visible` (or the
    /// full extent when `None`) onto the plot's horizontal span.
    pub fn from_samples(
        samples: &[Sample],
        visible: Option<VisibleDomain>,
        plot: PlotRect,
    ) -> ChartResult<Self> {
        let full = series_time_extent(samples)?;
        Self::with_ranges(full, visible.unwrap_or(full), plot)
    }

    fn with_ranges(full: VisibleDomain, visible: VisibleDomain, plot: PlotRect) -> ChartResult<Self> {
        let linear = LinearScale::new(visible.start, visible.end, plot.left, plot.right)?;
        Ok(Self {
            full_start: full.start,
            full_end: full.end,
            visible_start: visible.start,
            visible_end: visible.end,
            linear,
        })
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn time_to_pixel(self, time: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(time)
    }

    pub fn pixel_to_time(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }

    #[must_use]
    pub(crate) fn project(self, time: f64) -> f64 {
        self.linear.apply(time)
    }

    /// Evenly spaced tick times across the visible range, endpoints included.
    #[must_use]
    pub fn ticks(self, tick_count: usize) -> Vec<f64> {
        match tick_count {
            0 => Vec::new(),
            1 => vec![self.visible_start],
            _ => {
                let span = self.visible_end - self.visible_start;
                let denominator = (tick_count - 1) as f64;
                (0..tick_count)
                    .map(|index| self.visible_start + span * (index as f64) / denominator)
                    .collect()
            }
        }
    }
}

/// `[min(time), max(time)]` of a series, widened to the minimum span.
pub fn series_time_extent(samples: &[Sample]) -> ChartResult<VisibleDomain> {
    if samples.is_empty() {
        return Err(ChartError::InvalidData(
            "time scale cannot be built from empty data".to_owned(),
        ));
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for sample in samples {
        if !sample.time.is_finite() {
            return Err(ChartError::InvalidData(
                "time values must be finite".to_owned(),
            ));
        }
        min = min.min(sample.time);
        max = max.max(sample.time);
    }

    VisibleDomain::new(min, max)
}

fn normalize_range(start: f64, end: f64, min_span: f64) -> ChartResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ChartError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    let (low, high) = (start.min(end), start.max(end));
    if high - low < min_span {
        let center = low + (high - low) / 2.0;
        let half = min_span / 2.0;
        return Ok((center - half, center + half));
    }

    Ok((low, high))
}

#[cfg(test)]
mod tests {
    use super::{MIN_TIME_SPAN_SECS, VisibleDomain};

    #[test]
    fn reversed_endpoints_are_ordered() {
        let domain = VisibleDomain::new(20.0, 10.0).expect("domain");
        assert_eq!((domain.start(), domain.end()), (10.0, 20.0));
    }

    #[test]
    fn sub_second_span_is_widened_around_center() {
        let domain = VisibleDomain::new(100.2, 100.4).expect("domain");
        assert!((domain.span() - MIN_TIME_SPAN_SECS).abs() <= 1e-12);
        assert!((domain.start() - 99.8).abs() <= 1e-9);
    }

    #[test]
    fn non_finite_endpoint_is_rejected() {
        assert!(VisibleDomain::new(f64::NAN, 1.0).is_err());
    }
}
