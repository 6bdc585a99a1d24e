use anyhow::Result;

use crate::analysis::{
    compute_adaptive_pct, compute_indicators, compute_overlay, compute_zones, evaluate_candles,
};
use crate::config::PipelineConfig;
use crate::domain::{Phase, Trend};
use crate::models::{AnnotatedSeries, OhlcvSeries};

/// Run the full indicator-and-signal pipeline over one symbol's series.
///
/// Pure per invocation: every window is recomputed from scratch (no online
/// update of the ZLEMA or bands: the multi-row lookback of the zero-lag
/// construction makes incremental updates unsound), the input is untouched
/// and running twice on the same series yields identical output.
pub fn run_pipeline(
    series: &OhlcvSeries,
    phase: Phase,
    trend: Trend,
    cfg: &PipelineConfig,
) -> Result<AnnotatedSeries> {
    series.validate()?;

    let indicators = compute_indicators(series, &cfg.indicators);
    let pct_dynamic = compute_adaptive_pct(&indicators, &cfg.adaptive);
    let overlay = compute_overlay(series, &cfg.overlay, &cfg.indicators);
    let zones = compute_zones(&indicators, &pct_dynamic, phase, &cfg.adaptive);
    let (entry_signals, reasons) =
        evaluate_candles(series, &indicators, &zones, phase, trend, &cfg.evaluator)?;

    Ok(AnnotatedSeries {
        series: series.clone(),
        indicators,
        pct_dynamic,
        overlay,
        zones,
        entry_signals,
        reasons,
    })
}

/// String-parameter front door matching the external contract: phase and
/// trend arrive as (case-insensitive) text, invalid trend normalizes to
/// sideways, unknown phase only disables zones.
pub fn run_pipeline_str(
    series: &OhlcvSeries,
    phase: &str,
    trend: &str,
    cfg: &PipelineConfig,
) -> Result<AnnotatedSeries> {
    run_pipeline(
        series,
        Phase::parse_lossy(phase),
        Trend::parse_lossy(trend),
        cfg,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PIPELINE;
    use crate::domain::Candle;

    fn noisy_series(n: usize) -> OhlcvSeries {
        let mut series = OhlcvSeries::new("TESTUSDT");
        for i in 0..n {
            let base = 100.0 + (i as f64 * 0.45).sin() * 4.0;
            series.push(Candle::new(
                i as i64 * 3_600_000,
                base,
                base + 1.2,
                base - 1.2,
                base + 0.6,
                10.0,
            ));
        }
        series
    }

    #[test]
    fn pipeline_is_idempotent() {
        let series = noisy_series(120);
        let first = run_pipeline(&series, Phase::Btr, Trend::Bullish, &PIPELINE).unwrap();
        let second = run_pipeline(&series, Phase::Btr, Trend::Bullish, &PIPELINE).unwrap();
        assert_eq!(first.indicators.trend_line, second.indicators.trend_line);
        assert_eq!(first.pct_dynamic, second.pct_dynamic);
        assert_eq!(first.zones.buy_zone_low, second.zones.buy_zone_low);
        assert_eq!(first.entry_signals, second.entry_signals);
        assert_eq!(first.reasons, second.reasons);
    }

    #[test]
    fn invalid_input_series_is_fatal() {
        let mut series = noisy_series(20);
        series.open_times_ms[5] = series.open_times_ms[4]; // duplicate timestamp
        assert!(run_pipeline(&series, Phase::Btr, Trend::Bullish, &PIPELINE).is_err());
    }

    #[test]
    fn string_front_door_normalizes_inputs() {
        let series = noisy_series(60);
        let out = run_pipeline_str(&series, "btr", "Bullish", &PIPELINE).unwrap();
        assert_eq!(out.len(), 60);
        // Unknown phase: zones stay undefined but the run succeeds
        let out = run_pipeline_str(&series, "consolidating", "upward", &PIPELINE).unwrap();
        assert!(out.zones.buy_zone_low.iter().all(|v| v.is_none()));
    }

    #[test]
    fn every_row_gets_a_signal_and_reason() {
        let series = noisy_series(90);
        let out = run_pipeline(&series, Phase::Sideways, Trend::Sideways, &PIPELINE).unwrap();
        assert_eq!(out.entry_signals.len(), 90);
        assert_eq!(out.reasons.len(), 90);
        assert!(out.reasons.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn pct_dynamic_is_bounded_everywhere() {
        let series = noisy_series(150);
        let out = run_pipeline(&series, Phase::Btr, Trend::Sideways, &PIPELINE).unwrap();
        for (i, pct) in out.pct_dynamic.iter().enumerate() {
            assert!(
                (PIPELINE.adaptive.min_pct..=PIPELINE.adaptive.max_pct).contains(pct),
                "pct {pct} out of bounds at row {i}"
            );
        }
    }

    #[test]
    fn latest_snapshot_points_at_last_row() {
        let series = noisy_series(40);
        let out = run_pipeline(&series, Phase::Ttr, Trend::Bullish, &PIPELINE).unwrap();
        let snap = out.latest().unwrap();
        assert_eq!(snap.symbol, "TESTUSDT");
        assert_eq!(snap.open_time_ms, 39 * 3_600_000);
        assert_eq!(snap.close, series.close_prices[39]);
    }
}
