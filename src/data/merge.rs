use std::collections::BTreeMap;

use crate::domain::Candle;
use crate::models::OhlcvSeries;

/// Reconcile a previously held series with freshly fetched rows.
///
/// Union by `open_time`, the fresh row wins on a duplicate timestamp (the
/// exchange may restate a still-open candle), sorted ascending, trimmed to
/// the most recent `retention_ms` measured from the newest candle. The
/// pipeline recomputes every indicator window from scratch afterwards, so
/// re-running on a merged series is always safe.
pub fn merge_series(
    existing: &OhlcvSeries,
    fresh: &OhlcvSeries,
    retention_ms: i64,
) -> OhlcvSeries {
    // BTreeMap keeps timestamps unique and sorted
    let mut by_time: BTreeMap<i64, Candle> = BTreeMap::new();
    for idx in 0..existing.len() {
        let candle = existing.get_candle(idx);
        by_time.insert(candle.open_time_ms, candle);
    }
    for idx in 0..fresh.len() {
        let candle = fresh.get_candle(idx);
        by_time.insert(candle.open_time_ms, candle);
    }

    let symbol = if existing.symbol.is_empty() {
        fresh.symbol.clone()
    } else {
        existing.symbol.clone()
    };
    let mut merged = OhlcvSeries::new(symbol);

    let Some(newest) = by_time.keys().next_back().copied() else {
        return merged;
    };
    let cutoff = newest - retention_ms;

    for (open_time, candle) in by_time {
        if open_time >= cutoff {
            merged.push(candle);
        }
    }
    merged
}
