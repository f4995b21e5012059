use std::ops::Range;

use crate::core::{Sample, VisibleDomain};

/// Index range of samples inside an inclusive time window.
///
/// `samples` must be ordered by time; the lookup is two binary searches.
#[must_use]
pub fn samples_in_time_window(samples: &[Sample], domain: VisibleDomain) -> Range<usize> {
    let start = samples.partition_point(|sample| sample.time < domain.start());
    let end = samples.partition_point(|sample| sample.time <= domain.end());
    start..end.max(start)
}

/// Like [`samples_in_time_window`], extended by one neighbour on each side
/// so a curve through the slice reaches both plot edges.
#[must_use]
pub fn samples_in_time_window_with_neighbors(
    samples: &[Sample],
    domain: VisibleDomain,
) -> Range<usize> {
    let inner = samples_in_time_window(samples, domain);
    let start = inner.start.saturating_sub(1);
    let end = (inner.end + 1).min(samples.len());
    start..end
}

#[cfg(test)]
mod tests {
    use super::{samples_in_time_window, samples_in_time_window_with_neighbors};
    use crate::core::{Sample, VisibleDomain};

    fn series() -> Vec<Sample> {
        (0..10).map(|i| Sample::new(f64::from(i) * 10.0, 1.0)).collect()
    }

    #[test]
    fn window_is_inclusive_on_both_ends() {
        let samples = series();
        let domain = VisibleDomain::new(20.0, 50.0).expect("domain");
        assert_eq!(samples_in_time_window(&samples, domain), 2..6);
    }

    #[test]
    fn neighbours_are_clamped_to_series_bounds() {
        let samples = series();
        let domain = VisibleDomain::new(0.0, 15.0).expect("domain");
        assert_eq!(samples_in_time_window_with_neighbors(&samples, domain), 0..3);
    }

    #[test]
    fn window_between_samples_yields_both_neighbours() {
        let samples = series();
        let domain = VisibleDomain::new(31.0, 38.0).expect("domain");
        assert!(samples_in_time_window(&samples, domain).is_empty());
        assert_eq!(samples_in_time_window_with_neighbors(&samples, domain), 3..5);
    }
}
