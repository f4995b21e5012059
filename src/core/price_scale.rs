use serde::{Deserialize, Serialize};

use crate::core::{LinearScale, PlotRect, Sample};
use crate::error::{ChartError, ChartResult};

pub const DEFAULT_PRICE_TICK_COUNT: usize = 5;

/// Relative padding applied to a flat price series before nicing.
const FLAT_SERIES_PADDING_RATIO: f64 = 0.01;
const FLAT_SERIES_PADDING_AT_ZERO: f64 = 0.5;
const MAX_NICE_ITERATIONS: usize = 10;

/// Price axis model mapped onto an inverted Y pixel axis.
///
/// The domain is niced outward so streaming prices do not make the axis
/// labels jitter with every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceScale {
    linear: LinearScale,
    data_min: f64,
    data_max: f64,
    tick_count: usize,
}

impl PriceScale {
    /// Builds a scale over an explicit `[price_min, price_max]`, niced for
    /// `tick_count` ticks. A flat domain is padded first.
    pub fn new(
        price_min: f64,
        price_max: f64,
        tick_count: usize,
        plot: PlotRect,
    ) -> ChartResult<Self> {
        if !price_min.is_finite() || !price_max.is_finite() {
            return Err(ChartError::InvalidData(
                "price domain must be finite".to_owned(),
            ));
        }
        if tick_count == 0 {
            return Err(ChartError::InvalidData(
                "price tick count must be > 0".to_owned(),
            ));
        }

        let (low, high) = (price_min.min(price_max), price_min.max(price_max));
        let (padded_low, padded_high) = pad_flat_domain(low, high);
        let (nice_low, nice_high) = nice_domain(padded_low, padded_high, tick_count);
        let linear = LinearScale::new(nice_low, nice_high, plot.bottom, plot.top)?;

        Ok(Self {
            linear,
            data_min: low,
            data_max: high,
            tick_count,
        })
    }

    /// Fits the scale to the price extent of `samples`.
    pub fn from_samples(samples: &[Sample], tick_count: usize, plot: PlotRect) -> ChartResult<Self> {
        if samples.is_empty() {
            return Err(ChartError::InvalidData(
                "price scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for sample in samples {
            if !sample.price.is_finite() {
                return Err(ChartError::InvalidData(
                    "price values must be finite".to_owned(),
                ));
            }
            min = min.min(sample.price);
            max = max.max(sample.price);
        }

        Self::new(min, max, tick_count, plot)
    }

    /// Returns the niced domain used for pixel mapping.
    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.linear.domain()
    }

    /// Returns the raw `[min, max]` the scale was fitted to.
    #[must_use]
    pub fn data_extent(self) -> (f64, f64) {
        (self.data_min, self.data_max)
    }

    #[must_use]
    pub fn pixel_range(self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn price_to_pixel(self, price: f64) -> ChartResult<f64> {
        self.linear.domain_to_pixel(price)
    }

    pub fn pixel_to_price(self, pixel: f64) -> ChartResult<f64> {
        self.linear.pixel_to_domain(pixel)
    }

    #[must_use]
    pub(crate) fn project(self, price: f64) -> f64 {
        self.linear.apply(price)
    }

    /// Round-valued ticks inside the niced domain.
    #[must_use]
    pub fn ticks(self) -> Vec<f64> {
        let (start, end) = self.domain();
        let step = tick_increment(start, end, self.tick_count);
        if !step.is_finite() || step <= 0.0 {
            return vec![start];
        }

        let first = (start / step).ceil() as i64;
        let last = (end / step).floor() as i64;
        (first..=last).map(|index| index as f64 * step).collect()
    }
}

fn pad_flat_domain(low: f64, high: f64) -> (f64, f64) {
    if high > low {
        return (low, high);
    }
    let pad = if low == 0.0 {
        FLAT_SERIES_PADDING_AT_ZERO
    } else {
        low.abs() * FLAT_SERIES_PADDING_RATIO
    };
    (low - pad, high + pad)
}

/// Extends `[start, end]` outward to multiples of a 1/2/5 step, repeating
/// until the step stops changing.
#[must_use]
pub fn nice_domain(start: f64, end: f64, tick_count: usize) -> (f64, f64) {
    let mut start = start;
    let mut end = end;
    let mut previous_step = None;

    for _ in 0..MAX_NICE_ITERATIONS {
        let step = tick_increment(start, end, tick_count);
        if previous_step == Some(step) || !step.is_finite() || step <= 0.0 {
            break;
        }
        start = (start / step).floor() * step;
        end = (end / step).ceil() * step;
        previous_step = Some(step);
    }

    (start, end)
}

/// Picks a 1/2/5 x 10^k step that splits `[start, end]` into about `count` parts.
#[must_use]
pub fn tick_increment(start: f64, end: f64, count: usize) -> f64 {
    let raw = (end - start) / count.max(1) as f64;
    if !raw.is_finite() || raw <= 0.0 {
        return 0.0;
    }
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}
