use anyhow::{Result, bail};

use crate::analysis::patterns::{
    exists_color_in_lookback, is_evening_star, is_morning_star, strong_buy, strong_sell,
    wick_rejection_buy, wick_rejection_sell,
};
use crate::config::analysis::EvaluatorSettings;
use crate::domain::{CandleColor, EntrySignal, Phase, Trend};
use crate::models::{IndicatorColumns, OhlcvSeries, ZoneColumns};

pub const REASON_SMALL_RANGE: &str = "ignored_small_range_0.5%";
pub const REASON_TTR_SIDEWAYS: &str = "ttr_skipped_for_sideways";
pub const REASON_TTR_NO_PATTERN: &str = "zlema_touched_no_pattern";
pub const REASON_NO_CONDITIONS: &str = "no_conditions_met";
pub const REASON_INDEX_RANGE: &str = "index_out_of_range";

/// Run the per-row decision tree over the whole series.
///
/// Fails fast if the derived columns do not line up with the candle columns -
/// a caller that skipped a pipeline stage must not proceed.
pub fn evaluate_candles(
    series: &OhlcvSeries,
    ind: &IndicatorColumns,
    zones: &ZoneColumns,
    phase: Phase,
    trend: Trend,
    cfg: &EvaluatorSettings,
) -> Result<(Vec<EntrySignal>, Vec<String>)> {
    let n = series.len();
    if ind.trend_line.len() != n || ind.upper_band.len() != n || ind.lower_band.len() != n {
        bail!(
            "{}: indicator columns do not match series length {}",
            series.symbol,
            n
        );
    }
    if zones.buy_zone_low.len() != n || zones.sell_zone_high.len() != n {
        bail!(
            "{}: zone columns do not match series length {}",
            series.symbol,
            n
        );
    }

    let mut signals = Vec::with_capacity(n);
    let mut reasons = Vec::with_capacity(n);
    for idx in 0..n {
        let (signal, reason) = evaluate_signal(series, ind, zones, phase, trend, idx, cfg);
        signals.push(signal);
        reasons.push(reason);
    }
    Ok((signals, reasons))
}

/// Classify one row. Stateless: nothing persists between rows, every call
/// sees the same series and derives its own lookbacks.
pub fn evaluate_signal(
    series: &OhlcvSeries,
    ind: &IndicatorColumns,
    zones: &ZoneColumns,
    phase: Phase,
    trend: Trend,
    idx: usize,
    cfg: &EvaluatorSettings,
) -> (EntrySignal, String) {
    // Defensive: should not happen from evaluate_candles
    if idx >= series.len() {
        return (EntrySignal::None, REASON_INDEX_RANGE.to_string());
    }

    let candle = series.get_candle(idx);

    // Low-information candles are excluded up front
    if candle.range() < cfg.min_range_pct * candle.close {
        return (EntrySignal::None, REASON_SMALL_RANGE.to_string());
    }

    // --- TTR: trend-line touch + pattern, no zones ---
    if phase == Phase::Ttr {
        if trend == Trend::Sideways {
            return (EntrySignal::None, REASON_TTR_SIDEWAYS.to_string());
        }

        let touch = matches!(
            ind.trend_line[idx],
            Some(z) if candle.low <= z && z <= candle.high
        );
        if touch {
            match trend {
                Trend::Bullish => {
                    let star = is_morning_star(series, idx, cfg);
                    let wick = wick_rejection_buy(&candle, cfg);
                    let strong = strong_buy(series, idx, cfg);
                    if star || wick || strong {
                        let reason = join_reasons("zlema_touch", star, wick, strong, true);
                        return (EntrySignal::Buy, reason);
                    }
                }
                Trend::Bearish => {
                    let star = is_evening_star(series, idx, cfg);
                    let wick = wick_rejection_sell(&candle, cfg);
                    let strong = strong_sell(series, idx, cfg);
                    if star || wick || strong {
                        let reason = join_reasons("zlema_touch", star, wick, strong, false);
                        return (EntrySignal::Sell, reason);
                    }
                }
                Trend::Sideways => unreachable!("handled above"),
            }
        }
        return (EntrySignal::None, REASON_TTR_NO_PATTERN.to_string());
    }

    // --- BTR / Sideways: zone touch + confirming color + pattern ---
    // BUY is evaluated first; a row can never be both.
    if matches!(trend, Trend::Bullish | Trend::Sideways) {
        let zone_touch = matches!(
            (zones.buy_zone_low[idx], zones.buy_zone_high[idx]),
            (Some(low), Some(high)) if candle.high >= low && candle.low <= high
        );
        if zone_touch
            && exists_color_in_lookback(
                series,
                zones,
                idx,
                cfg.color_lookback,
                CandleColor::Green,
                trend,
            )
        {
            let star = is_morning_star(series, idx, cfg);
            let wick = wick_rejection_buy(&candle, cfg);
            let strong = strong_buy(series, idx, cfg);
            if star || wick || strong {
                let reason = join_reasons("buy_zone_touch", star, wick, strong, true);
                return (EntrySignal::Buy, reason);
            }
        }
    }

    if matches!(trend, Trend::Bearish | Trend::Sideways) {
        let zone_touch = matches!(
            (zones.sell_zone_low[idx], zones.sell_zone_high[idx]),
            (Some(low), Some(high)) if candle.high >= low && candle.low <= high
        );
        if zone_touch
            && exists_color_in_lookback(
                series,
                zones,
                idx,
                cfg.color_lookback,
                CandleColor::Red,
                trend,
            )
        {
            let star = is_evening_star(series, idx, cfg);
            let wick = wick_rejection_sell(&candle, cfg);
            let strong = strong_sell(series, idx, cfg);
            if star || wick || strong {
                let reason = join_reasons("sell_zone_touch", star, wick, strong, false);
                return (EntrySignal::Sell, reason);
            }
        }
    }

    (EntrySignal::None, REASON_NO_CONDITIONS.to_string())
}

/// Audit trail: prefix plus every satisfied sub-condition, star first, then
/// wick rejection, then strong candle.
fn join_reasons(prefix: &str, star: bool, wick: bool, strong: bool, buy_side: bool) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if star {
        parts.push(if buy_side { "morning_star" } else { "evening_star" });
    }
    if wick {
        parts.push("wick_rejection");
    }
    if strong {
        parts.push(if buy_side { "strong_buy" } else { "strong_sell" });
    }
    format!("{}+{}", prefix, parts.join("+"))
}
