use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    Instrument, Sample, SelectionTicket, Series, parse_market_chart, parse_trade_event,
};
use crate::error::ChartError;
use crate::render::{Renderer, TransitionKind};

use super::ChartEngine;

/// Result of handing one upstream response or event to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngestOutcome {
    /// The series changed.
    Applied,
    /// The ticket belongs to an earlier selection; nothing changed.
    Stale,
    /// The input was unusable and was discarded.
    Dropped,
}

impl<R: Renderer> ChartEngine<R> {
    #[must_use]
    pub fn series(&self) -> &Series {
        self.core.store.series()
    }

    #[must_use]
    pub fn selection(&self) -> Option<&SelectionTicket> {
        self.core.store.selection()
    }

    /// Switches to a new instrument.
    ///
    /// The series starts empty, zoom/brush/tooltip reset, and the first
    /// non-empty data for the new instrument fades in. Responses carrying
    /// an older ticket are rejected from now on.
    pub fn select_instrument(&mut self, instrument: Instrument) -> SelectionTicket {
        let ticket = self.core.store.select_instrument(instrument);
        self.core.interaction.reset_for_new_context();
        self.core.transition.clear();
        self.core.runtime.fade_in_armed = true;
        self.invalidate_geometry(TransitionKind::Morph);
        ticket
    }

    /// Replaces the series with a bulk history load.
    pub fn load_history(&mut self, ticket: &SelectionTicket, samples: Vec<Sample>) -> IngestOutcome {
        match self.core.store.load_history(ticket, samples) {
            Ok(()) => {
                self.invalidate_geometry(TransitionKind::Morph);
                IngestOutcome::Applied
            }
            Err(err) => self.rejected(ticket, err),
        }
    }

    /// Appends one live sample and applies retention.
    pub fn append_live(&mut self, ticket: &SelectionTicket, sample: Sample) -> IngestOutcome {
        match self.core.store.append_live(ticket, sample) {
            Ok(_) => {
                self.invalidate_geometry(TransitionKind::Morph);
                IngestOutcome::Applied
            }
            Err(err) => self.rejected(ticket, err),
        }
    }

    /// Decodes and loads a market-chart history body.
    ///
    /// A malformed body is treated as "no data": the series is cleared and
    /// `Dropped` is returned.
    pub fn ingest_history_payload(&mut self, ticket: &SelectionTicket, body: &str) -> IngestOutcome {
        if let Err(err) = self.core.store.check_ticket(ticket) {
            return self.rejected(ticket, err);
        }

        match parse_market_chart(body) {
            Ok(samples) => self.load_history(ticket, samples),
            Err(err) => {
                warn!(
                    instrument = %ticket.instrument,
                    error = %err,
                    "malformed history payload, showing no data"
                );
                self.load_history(ticket, Vec::new());
                IngestOutcome::Dropped
            }
        }
    }

    /// Decodes one trade-stream message, stamps it with the engine clock and
    /// appends it.
    pub fn ingest_trade_message(&mut self, ticket: &SelectionTicket, body: &str) -> IngestOutcome {
        if let Err(err) = self.core.store.check_ticket(ticket) {
            return self.rejected(ticket, err);
        }

        match parse_trade_event(body, self.core.store.now()) {
            Ok(sample) => {
                trace!(price = sample.price, "decoded trade message");
                self.append_live(ticket, sample)
            }
            Err(err) => self.rejected(ticket, err),
        }
    }

    fn rejected(&self, ticket: &SelectionTicket, err: ChartError) -> IngestOutcome {
        match err {
            ChartError::StaleSelection { expected, received } => {
                debug!(
                    instrument = %ticket.instrument,
                    expected,
                    received,
                    "discard stale response"
                );
                IngestOutcome::Stale
            }
            other => {
                warn!(
                    instrument = %ticket.instrument,
                    error = %other,
                    "drop feed input"
                );
                IngestOutcome::Dropped
            }
        }
    }
}
