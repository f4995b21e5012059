use live_price_chart::ChartError;
use live_price_chart::api::{ChartEngine, ChartEngineConfig, IngestOutcome};
use live_price_chart::core::{
    DEFAULT_RETENTION_WINDOW_SECS, FixedClock, Instrument, Sample, SeriesStore,
};
use live_price_chart::render::NullRenderer;
use proptest::prelude::*;

const NOW: f64 = 1_700_000_000.0;
const DAY: f64 = 86_400.0;

fn store(clock: &FixedClock) -> SeriesStore {
    SeriesStore::new(DEFAULT_RETENTION_WINDOW_SECS, Box::new(clock.clone())).expect("store init")
}

#[test]
fn append_evicts_samples_older_than_retention_window() {
    let clock = FixedClock::new(NOW);
    let mut store = store(&clock);
    let ticket = store.select_instrument(Instrument::new("bitcoin"));
    store
        .load_history(
            &ticket,
            vec![
                Sample::new(NOW - 8.0 * DAY, 90.0),
                Sample::new(NOW - 6.0 * DAY, 95.0),
                Sample::new(NOW - 60.0, 100.0),
            ],
        )
        .expect("history");

    let series = store
        .append_live(&ticket, Sample::new(NOW, 105.0))
        .expect("append");

    assert_eq!(series.len(), 3);
    assert_eq!(series.first(), Some(Sample::new(NOW - 6.0 * DAY, 95.0)));
    assert_eq!(series.last(), Some(Sample::new(NOW, 105.0)));
}

#[test]
fn history_load_evicts_samples_outside_retention_window() {
    let clock = FixedClock::new(NOW);
    let mut store = store(&clock);
    let ticket = store.select_instrument(Instrument::new("bitcoin"));
    let history = vec![
        Sample::new(NOW - 30.0 * DAY, 1.0),
        Sample::new(NOW - 7.0 * DAY, 2.0),
        Sample::new(NOW - 10.0, 3.0),
    ];
    store.load_history(&ticket, history.clone()).expect("history");
    assert_eq!(store.series().as_slice(), &history[1..]);
}

#[test]
fn late_history_for_previous_instrument_is_rejected() {
    let clock = FixedClock::new(NOW);
    let mut store = store(&clock);
    let bitcoin = store.select_instrument(Instrument::new("bitcoin"));
    let ethereum = store.select_instrument(Instrument::new("ethereum"));

    let err = store
        .load_history(&bitcoin, vec![Sample::new(NOW, 37_000.0)])
        .expect_err("stale ticket");
    assert!(matches!(err, ChartError::StaleSelection { .. }));
    assert!(store.series().is_empty());

    store
        .load_history(&ethereum, vec![Sample::new(NOW, 2_000.0)])
        .expect("current ticket");
    assert_eq!(store.series().len(), 1);
}

#[test]
fn reselecting_same_instrument_invalidates_old_ticket() {
    let clock = FixedClock::new(NOW);
    let mut store = store(&clock);
    let first = store.select_instrument(Instrument::new("bitcoin"));
    let _other = store.select_instrument(Instrument::new("ethereum"));
    let second = store.select_instrument(Instrument::new("bitcoin"));

    assert_ne!(first, second);
    assert!(store.check_ticket(&first).is_err());
    assert!(store.check_ticket(&second).is_ok());
}

#[test]
fn live_sample_behind_tail_is_clamped_and_non_finite_rejected() {
    let clock = FixedClock::new(NOW);
    let mut store = store(&clock);
    let ticket = store.select_instrument(Instrument::new("bitcoin"));
    store
        .append_live(&ticket, Sample::new(NOW, 100.0))
        .expect("first append");

    let series = store
        .append_live(&ticket, Sample::new(NOW - 1.0, 101.0))
        .expect("late append");
    assert_eq!(series.len(), 2);
    assert_eq!(series.last(), Some(Sample::new(NOW, 101.0)));

    let err = store
        .append_live(&ticket, Sample::new(NOW, f64::NAN))
        .expect_err("nan price");
    assert!(matches!(err, ChartError::InvalidData(_)));
    assert_eq!(store.series().len(), 2);
}

#[test]
fn engine_discards_history_arriving_after_instrument_switch() {
    let clock = FixedClock::new(NOW);
    let mut engine = ChartEngine::with_clock(
        NullRenderer::default(),
        ChartEngineConfig::default(),
        Box::new(clock.clone()),
    )
    .expect("engine init");

    let bitcoin = engine.select_instrument(Instrument::new("bitcoin"));
    let ethereum = engine.select_instrument(Instrument::new("ethereum"));

    let late = engine.load_history(&bitcoin, vec![Sample::new(NOW - 10.0, 37_000.0)]);
    assert_eq!(late, IngestOutcome::Stale);
    assert!(engine.series().is_empty());

    let live = engine.append_live(&bitcoin, Sample::new(NOW, 37_010.0));
    assert_eq!(live, IngestOutcome::Stale);
    assert!(engine.series().is_empty());

    let fresh = engine.load_history(&ethereum, vec![Sample::new(NOW - 10.0, 2_000.0)]);
    assert_eq!(fresh, IngestOutcome::Applied);
    assert_eq!(engine.series().len(), 1);
}

#[test]
fn engine_applies_trade_when_history_tail_is_ahead_of_local_clock() {
    let clock = FixedClock::new(NOW);
    let mut engine = ChartEngine::with_clock(
        NullRenderer::default(),
        ChartEngineConfig::default(),
        Box::new(clock.clone()),
    )
    .expect("engine init");
    let ticket = engine.select_instrument(Instrument::new("bitcoin"));
    engine.load_history(
        &ticket,
        vec![Sample::new(NOW - 60.0, 100.0), Sample::new(NOW + 20.0, 101.0)],
    );

    let outcome = engine.ingest_trade_message(&ticket, r#"{"p":"102.5"}"#);
    assert_eq!(outcome, IngestOutcome::Applied);
    assert_eq!(engine.series().len(), 3);
    assert_eq!(engine.series().last(), Some(Sample::new(NOW + 20.0, 102.5)));
}

proptest! {
    #[test]
    fn append_keeps_order_and_retention(
        history_ages in prop::collection::vec(0.0f64..(14.0 * DAY), 0..40),
        steps in prop::collection::vec((0.0f64..(3.0 * DAY), 1.0f64..1_000.0), 1..60)
    ) {
        let clock = FixedClock::new(NOW);
        let mut store = store(&clock);
        let ticket = store.select_instrument(Instrument::new("bitcoin"));

        let mut history: Vec<Sample> = history_ages
            .iter()
            .map(|age| Sample::new(NOW - age, 100.0))
            .collect();
        history.sort_by(|left, right| left.time.total_cmp(&right.time));
        store.load_history(&ticket, history).expect("history");

        for (advance, price) in steps {
            clock.advance(advance);
            let now = store.now();
            let series = store
                .append_live(&ticket, Sample::new(now, price))
                .expect("append");

            let samples = series.as_slice();
            prop_assert!(samples.windows(2).all(|pair| pair[0].time <= pair[1].time));
            prop_assert!(samples.iter().all(|sample| sample.time >= now - DEFAULT_RETENTION_WINDOW_SECS));
            prop_assert_eq!(series.last(), Some(Sample::new(now, price)));
        }
    }
}
