pub mod curve;
pub mod feed;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod scale_pair;
pub mod series;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use curve::{
    CurvePath, CurvePoint, PathCommand, monotone_curve, project_curve, project_curve_points,
};
pub use feed::{parse_market_chart, parse_trade_event};
pub use price_scale::{DEFAULT_PRICE_TICK_COUNT, PriceScale, nice_domain, tick_increment};
pub use scale::LinearScale;
pub use scale_pair::{ScalePair, compute_scales};
pub use series::{
    DEFAULT_RETENTION_WINDOW_SECS, Instrument, SelectionTicket, Series, SeriesStore,
};
pub use time_scale::{MIN_TIME_SPAN_SECS, TimeScale, VisibleDomain, series_time_extent};
pub use types::{Clock, FixedClock, PlotMargins, PlotRect, Sample, SystemClock, Viewport};
pub use windowing::{samples_in_time_window, samples_in_time_window_with_neighbors};
