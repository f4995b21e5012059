//! live-price-chart: headless engine for a live, zoomable price line chart.
//!
//! The crate keeps a rolling window of `(time, price)` samples for one
//! instrument, fits time and price scales to it, and produces layered,
//! backend-agnostic frames (monotone curve, axes, brush, hover marker) for a
//! `Renderer`. Hosts feed it history payloads, trade messages, pointer
//! events and width measurements.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig, IngestOutcome, RenderOutcome};
pub use error::{ChartError, ChartResult};
