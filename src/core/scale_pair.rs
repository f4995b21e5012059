use serde::{Deserialize, Serialize};

use crate::core::{
    PlotMargins, PlotRect, PriceScale, Sample, TimeScale, Viewport, VisibleDomain,
    samples_in_time_window, samples_in_time_window_with_neighbors, series_time_extent,
};
use crate::error::ChartResult;

/// Time and price scales fitted to one `(series, domain, canvas)` input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePair {
    pub time: TimeScale,
    pub price: PriceScale,
    pub plot: PlotRect,
    pub viewport: Viewport,
}

impl ScalePair {
    /// Projects a sample into canvas pixels.
    #[must_use]
    pub fn project(&self, sample: Sample) -> (f64, f64) {
        (self.time.project(sample.time), self.price.project(sample.price))
    }
}

/// Fits both scales for the visible part of `samples`.
///
/// The time domain is `visible` when set, otherwise the series extent. The
/// price domain covers samples inside the time domain, or the two samples
/// bracketing it when none fall inside. Pure and deterministic.
pub fn compute_scales(
    samples: &[Sample],
    visible: Option<VisibleDomain>,
    viewport: Viewport,
    margins: PlotMargins,
    price_tick_count: usize,
) -> ChartResult<ScalePair> {
    let plot = PlotRect::from_viewport(viewport, margins)?;
    let time = TimeScale::from_samples(samples, visible, plot)?;

    let domain = match visible {
        Some(domain) => domain,
        None => series_time_extent(samples)?,
    };
    let mut window = samples_in_time_window(samples, domain);
    if window.is_empty() {
        window = samples_in_time_window_with_neighbors(samples, domain);
    }
    let price_samples = if window.is_empty() {
        samples
    } else {
        &samples[window]
    };
    let price = PriceScale::from_samples(price_samples, price_tick_count, plot)?;

    Ok(ScalePair {
        time,
        price,
        plot,
        viewport,
    })
}

#[cfg(test)]
mod tests {
    use super::compute_scales;
    use crate::core::{PlotMargins, Sample, Viewport, VisibleDomain};

    #[test]
    fn empty_series_has_no_scales() {
        let result = compute_scales(&[], None, Viewport::new(600, 300), PlotMargins::default(), 5);
        assert!(result.is_err());
    }

    #[test]
    fn zoomed_price_domain_ignores_samples_outside_window() {
        let samples = vec![
            Sample::new(0.0, 1000.0),
            Sample::new(10.0, 100.0),
            Sample::new(20.0, 104.0),
            Sample::new(30.0, 2000.0),
        ];
        let domain = VisibleDomain::new(5.0, 25.0).expect("domain");
        let scales = compute_scales(
            &samples,
            Some(domain),
            Viewport::new(600, 300),
            PlotMargins::default(),
            5,
        )
        .expect("scales");
        let (low, high) = scales.price.domain();
        assert!(low <= 100.0 && high >= 104.0);
        assert!(high < 1000.0);
    }
}
