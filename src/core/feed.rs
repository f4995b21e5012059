//! Decoding of the two upstream payloads the chart consumes: the bulk
//! market-chart history (`{"prices": [[unix_millis, price], ...]}`) and
//! individual trade-stream messages (`{"p": "<decimal>", ...}`).

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::core::Sample;
use crate::core::primitives::decimal_to_f64;
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Deserialize)]
struct MarketChartPayload {
    prices: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TradeMessage {
    #[serde(rename = "p")]
    price: PriceField,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PriceField {
    Text(String),
    Number(f64),
}

/// Decodes a market-chart history payload into ordered samples.
///
/// Entries that are not finite `[millis, price]` pairs are skipped. A body
/// without a `prices` array is a `MalformedPayload` error.
pub fn parse_market_chart(body: &str) -> ChartResult<Vec<Sample>> {
    let payload: MarketChartPayload = serde_json::from_str(body)
        .map_err(|err| ChartError::MalformedPayload(format!("market chart: {err}")))?;

    let total = payload.prices.len();
    let samples: Vec<Sample> = payload
        .prices
        .iter()
        .filter_map(|entry| {
            let pair = entry.as_array()?;
            if pair.len() != 2 {
                return None;
            }
            let millis = pair[0].as_f64()?;
            let price = pair[1].as_f64()?;
            let sample = Sample::from_unix_millis(millis, price);
            sample.is_finite().then_some(sample)
        })
        .collect();

    trace!(total, kept = samples.len(), "decoded market chart payload");
    Ok(samples)
}

/// Decodes one trade message into a sample stamped with its arrival time.
///
/// The exchange timestamp in the message is ignored; retention is measured
/// against the local clock, so samples carry local arrival time.
pub fn parse_trade_event(body: &str, arrival_unix_seconds: f64) -> ChartResult<Sample> {
    let message: TradeMessage = serde_json::from_str(body)
        .map_err(|err| ChartError::MalformedPayload(format!("trade message: {err}")))?;

    let price = match message.price {
        PriceField::Text(text) => {
            let decimal = Decimal::from_str(text.trim()).map_err(|err| {
                ChartError::MalformedPayload(format!("trade price `{text}`: {err}"))
            })?;
            decimal_to_f64(decimal, "trade price")?
        }
        PriceField::Number(value) => value,
    };

    let sample = Sample::new(arrival_unix_seconds, price);
    if !sample.is_finite() {
        return Err(ChartError::MalformedPayload(
            "trade sample must be finite".to_owned(),
        ));
    }
    Ok(sample)
}
