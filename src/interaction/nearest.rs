use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{Sample, TimeScale};

/// Index of the sample whose projected x is closest to `pointer_x`.
///
/// `samples` must be ordered by time. The pointer is inverted to a time and
/// only the two bracketing samples are compared, which matches a full scan
/// because the time projection is monotone. Ties resolve to the earlier
/// sample.
#[must_use]
pub fn nearest_sample_index(samples: &[Sample], time_scale: TimeScale, pointer_x: f64) -> Option<usize> {
    if samples.is_empty() {
        return None;
    }
    let pointer_time = time_scale.pixel_to_time(pointer_x).ok()?;

    let right = samples.partition_point(|sample| sample.time < pointer_time);
    let mut candidates: SmallVec<[usize; 2]> = SmallVec::new();
    if right > 0 {
        // First sample of a run of equal timestamps.
        let left_time = samples[right - 1].time;
        candidates.push(samples.partition_point(|sample| sample.time < left_time));
    }
    if right < samples.len() {
        candidates.push(right);
    }

    candidates.into_iter().min_by_key(|&index| {
        let distance = (time_scale.project(samples[index].time) - pointer_x).abs();
        (OrderedFloat(distance), index)
    })
}

/// Reference linear scan over every sample.
#[must_use]
pub fn nearest_sample_index_bruteforce(
    samples: &[Sample],
    time_scale: TimeScale,
    pointer_x: f64,
) -> Option<usize> {
    if !pointer_x.is_finite() {
        return None;
    }
    let mut best: Option<(OrderedFloat<f64>, usize)> = None;
    for (index, sample) in samples.iter().enumerate() {
        let distance = OrderedFloat((time_scale.project(sample.time) - pointer_x).abs());
        match best {
            Some((current, _)) if current <= distance => {}
            _ => best = Some((distance, index)),
        }
    }
    best.map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::{nearest_sample_index, nearest_sample_index_bruteforce};
    use crate::core::{PlotMargins, PlotRect, Sample, TimeScale, Viewport};

    fn scale() -> TimeScale {
        // 512px plot over 512s keeps every projection exact.
        let plot = PlotRect::from_viewport(Viewport::new(592, 300), PlotMargins::default())
            .expect("plot");
        TimeScale::new(0.0, 512.0, plot).expect("time scale")
    }

    #[test]
    fn midpoint_tie_prefers_earlier_sample() {
        let samples = [Sample::new(0.0, 1.0), Sample::new(10.0, 2.0)];
        let x = scale().time_to_pixel(5.0).expect("px");
        assert_eq!(nearest_sample_index(&samples, scale(), x), Some(0));
        assert_eq!(nearest_sample_index_bruteforce(&samples, scale(), x), Some(0));
    }

    #[test]
    fn duplicate_timestamps_resolve_to_first_of_run() {
        let samples = [
            Sample::new(0.0, 1.0),
            Sample::new(50.0, 2.0),
            Sample::new(50.0, 3.0),
            Sample::new(100.0, 4.0),
        ];
        let x = scale().time_to_pixel(60.0).expect("px");
        assert_eq!(nearest_sample_index(&samples, scale(), x), Some(1));
        assert_eq!(nearest_sample_index_bruteforce(&samples, scale(), x), Some(1));
    }

    #[test]
    fn pointer_outside_range_clamps_to_edge_samples() {
        let samples = [Sample::new(10.0, 1.0), Sample::new(90.0, 2.0)];
        assert_eq!(nearest_sample_index(&samples, scale(), -500.0), Some(0));
        assert_eq!(nearest_sample_index(&samples, scale(), 5_000.0), Some(1));
    }
}
