use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::primitives::SECONDS_PER_DAY;
use crate::core::{Clock, Sample};
use crate::error::{ChartError, ChartResult};

/// Fixed rolling retention span for live data.
pub const DEFAULT_RETENTION_WINDOW_SECS: f64 = 7.0 * SECONDS_PER_DAY;

/// Evicted prefix length that triggers compaction of the backing buffer.
const COMPACTION_MIN_HEAD: usize = 256;

/// Ordered, time-windowed samples for one instrument.
///
/// Backed by a `Vec` plus a head offset so eviction from the front is a
/// cursor bump and reads stay a contiguous slice.
#[derive(Debug, Clone, Default)]
pub struct Series {
    samples: Vec<Sample>,
    head: usize,
}

impl Series {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples, head: 0 }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples[self.head..]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len() - self.head
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn first(&self) -> Option<Sample> {
        self.as_slice().first().copied()
    }

    #[must_use]
    pub fn last(&self) -> Option<Sample> {
        self.as_slice().last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.as_slice().iter()
    }

    fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    /// Drops every leading sample older than `cutoff`; returns how many.
    fn evict_before(&mut self, cutoff: f64) -> usize {
        let before = self.head;
        while self.head < self.samples.len() && self.samples[self.head].time < cutoff {
            self.head += 1;
        }
        let evicted = self.head - before;
        if self.head >= COMPACTION_MIN_HEAD && self.head * 2 >= self.samples.len() {
            self.samples.drain(..self.head);
            self.head = 0;
        }
        evicted
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Coin identity as used by the history source (`bitcoin`, `ethereum`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instrument(String);

impl Instrument {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }

    /// Trade-stream symbol for the live feed, USDT-quoted.
    ///
    /// Unknown coins fall back to the bitcoin stream.
    #[must_use]
    pub fn trade_stream_symbol(&self) -> String {
        let base = match self.0.as_str() {
            "bitcoin" => "btc",
            "ethereum" => "eth",
            _ => "btc",
        };
        format!("{base}usdt")
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Proof of which selection a history fetch or feed subscription belongs to.
///
/// Every mutation presents its ticket; a ticket from an earlier selection
/// (even of the same instrument) no longer matches and is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionTicket {
    pub instrument: Instrument,
    pub generation: u64,
}

/// Holds the live series and enforces retention plus the stale-response guard.
pub struct SeriesStore {
    series: Series,
    selection: Option<SelectionTicket>,
    next_generation: u64,
    retention_window_secs: f64,
    clock: Box<dyn Clock>,
}

impl std::fmt::Debug for SeriesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesStore")
            .field("len", &self.series.len())
            .field("selection", &self.selection)
            .field("retention_window_secs", &self.retention_window_secs)
            .finish_non_exhaustive()
    }
}

impl SeriesStore {
    pub fn new(retention_window_secs: f64, clock: Box<dyn Clock>) -> ChartResult<Self> {
        if !retention_window_secs.is_finite() || retention_window_secs <= 0.0 {
            return Err(ChartError::InvalidData(
                "retention window must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self {
            series: Series::new(),
            selection: None,
            next_generation: 1,
            retention_window_secs,
            clock,
        })
    }

    #[must_use]
    pub fn series(&self) -> &Series {
        &self.series
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionTicket> {
        self.selection.as_ref()
    }

    #[must_use]
    pub fn retention_window_secs(&self) -> f64 {
        self.retention_window_secs
    }

    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock.now_unix_seconds()
    }

    fn retention_cutoff(&self) -> f64 {
        self.now() - self.retention_window_secs
    }

    /// Discards the current series and opens a new selection.
    pub fn select_instrument(&mut self, instrument: Instrument) -> SelectionTicket {
        let ticket = SelectionTicket {
            instrument,
            generation: self.next_generation,
        };
        self.next_generation += 1;
        debug!(
            instrument = %ticket.instrument,
            generation = ticket.generation,
            discarded = self.series.len(),
            "select instrument"
        );
        self.series = Series::new();
        self.selection = Some(ticket.clone());
        ticket
    }

    /// Fails with `StaleSelection` unless `ticket` is the current selection.
    pub fn check_ticket(&self, ticket: &SelectionTicket) -> ChartResult<()> {
        match &self.selection {
            Some(current) if current == ticket => Ok(()),
            Some(current) => Err(ChartError::StaleSelection {
                expected: current.generation,
                received: ticket.generation,
            }),
            None => Err(ChartError::StaleSelection {
                expected: 0,
                received: ticket.generation,
            }),
        }
    }

    /// Replaces the series wholesale, then evicts the prefix older than the
    /// retention window. Input order is trusted, not re-sorted.
    pub fn load_history(&mut self, ticket: &SelectionTicket, samples: Vec<Sample>) -> ChartResult<()> {
        self.check_ticket(ticket)?;
        let replaced = self.series.len();
        self.series = Series::from_samples(samples);
        let evicted = self.series.evict_before(self.retention_cutoff());
        debug!(
            instrument = %ticket.instrument,
            count = self.series.len(),
            evicted,
            replaced,
            "load history"
        );
        Ok(())
    }

    /// Appends a live sample at the tail, then evicts samples older than the
    /// retention window relative to the store clock.
    ///
    /// A sample stamped before the current tail is moved up to the tail time.
    /// Non-finite samples are rejected.
    pub fn append_live(&mut self, ticket: &SelectionTicket, sample: Sample) -> ChartResult<&Series> {
        self.check_ticket(ticket)?;
        if !sample.is_finite() {
            return Err(ChartError::InvalidData(
                "live sample must have finite time and price".to_owned(),
            ));
        }
        let mut sample = sample;
        if let Some(last) = self.series.last() {
            if sample.time < last.time {
                trace!(
                    time = sample.time,
                    tail = last.time,
                    "clamp live sample to series tail"
                );
                sample.time = last.time;
            }
        }

        self.series.push(sample);
        let evicted = self.series.evict_before(self.retention_cutoff());
        trace!(
            count = self.series.len(),
            evicted,
            price = sample.price,
            "append live sample"
        );
        Ok(&self.series)
    }
}
