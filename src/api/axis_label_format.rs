use std::fmt::Write as _;

use crate::core::primitives::unix_seconds_to_datetime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TimeLabelPattern {
    TimeSecond,
    TimeMinute,
    DateMinute,
    Date,
}

impl TimeLabelPattern {
    const fn strftime(self) -> &'static str {
        match self {
            Self::TimeSecond => "%H:%M:%S",
            Self::TimeMinute => "%H:%M",
            Self::DateMinute => "%b %d %H:%M",
            Self::Date => "%b %d",
        }
    }
}

pub(super) fn resolve_time_label_pattern(visible_span_secs: f64) -> TimeLabelPattern {
    if visible_span_secs <= 600.0 {
        TimeLabelPattern::TimeSecond
    } else if visible_span_secs <= 86_400.0 {
        TimeLabelPattern::TimeMinute
    } else if visible_span_secs <= 259_200.0 {
        TimeLabelPattern::DateMinute
    } else {
        TimeLabelPattern::Date
    }
}

/// Formats a tick time in UTC using a pattern chosen from the visible span.
pub(super) fn format_time_axis_label(time: f64, visible_span_secs: f64) -> String {
    let Some(datetime) = unix_seconds_to_datetime(time) else {
        return format!("{time:.0}");
    };
    datetime
        .format(resolve_time_label_pattern(visible_span_secs).strftime())
        .to_string()
}

/// Decimal places that keep every multiple of `step` distinct.
pub(super) fn price_label_precision(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    let exponent = step.abs().log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        // Bounded: f64 carries no meaningful digits past this.
        ((-exponent) as usize).min(12)
    }
}

pub(super) fn format_price_axis_label(price: f64, step: f64) -> String {
    let precision = price_label_precision(step);
    // -0.0 would otherwise print a sign.
    let price = if price == 0.0 { 0.0 } else { price };
    format!("{price:.precision$}")
}

/// Formats the tooltip date with a pre-validated chrono pattern.
///
/// Returns `None` when the time is outside chrono's range or the pattern
/// fails to render.
pub(super) fn format_tooltip_date(time: f64, pattern: &str) -> Option<String> {
    let datetime = unix_seconds_to_datetime(time)?;
    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::{
        TimeLabelPattern, format_price_axis_label, format_time_axis_label, format_tooltip_date,
        price_label_precision, resolve_time_label_pattern,
    };

    #[test]
    fn price_precision_follows_step() {
        assert_eq!(price_label_precision(5.0), 0);
        assert_eq!(price_label_precision(0.5), 1);
        assert_eq!(price_label_precision(0.02), 2);
        assert_eq!(format_price_axis_label(92.5, 0.5), "92.5");
        assert_eq!(format_price_axis_label(30_000.0, 1_000.0), "30000");
        assert_eq!(format_price_axis_label(-0.0, 0.1), "0.0");
    }

    #[test]
    fn time_pattern_adapts_to_span() {
        assert_eq!(resolve_time_label_pattern(120.0), TimeLabelPattern::TimeSecond);
        assert_eq!(resolve_time_label_pattern(7_200.0), TimeLabelPattern::TimeMinute);
        assert_eq!(resolve_time_label_pattern(604_800.0), TimeLabelPattern::Date);
        // 2023-11-14T22:13:20Z
        assert_eq!(format_time_axis_label(1_700_000_000.0, 604_800.0), "Nov 14");
        assert_eq!(format_time_axis_label(1_700_000_000.0, 60.0), "22:13:20");
    }

    #[test]
    fn tooltip_date_uses_pattern() {
        assert_eq!(
            format_tooltip_date(1_700_000_000.0, "%b %d, %Y %H:%M:%S").as_deref(),
            Some("Nov 14, 2023 22:13:20")
        );
        assert!(format_tooltip_date(f64::NAN, "%Y").is_none());
    }
}
