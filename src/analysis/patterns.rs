use crate::config::analysis::EvaluatorSettings;
use crate::domain::{Candle, CandleColor, Trend};
use crate::models::{OhlcvSeries, ZoneColumns};

// ============================================================================
// Candle color
// ============================================================================

/// Green/red/neutral classification. Doji candles fall back to the trend
/// bias; in a sideways trend the zone the close sits in decides instead.
pub fn candle_color(
    candle: &Candle,
    trend: Trend,
    in_buy_zone: bool,
    in_sell_zone: bool,
) -> CandleColor {
    if candle.is_bullish() {
        return CandleColor::Green;
    }
    if candle.is_bearish() {
        return CandleColor::Red;
    }
    match trend {
        Trend::Bullish => CandleColor::Green,
        Trend::Bearish => CandleColor::Red,
        Trend::Sideways => {
            if in_buy_zone {
                CandleColor::Green
            } else if in_sell_zone {
                CandleColor::Red
            } else {
                CandleColor::Neutral
            }
        }
    }
}

/// True if any of the `lookback` candles before `idx` classifies as `color`.
/// Gates the BTR/Sideways zone signals.
pub fn exists_color_in_lookback(
    series: &OhlcvSeries,
    zones: &ZoneColumns,
    idx: usize,
    lookback: usize,
    color: CandleColor,
    trend: Trend,
) -> bool {
    let start = idx.saturating_sub(lookback);
    for j in (start..idx).rev() {
        let candle = series.get_candle(j);
        let close = candle.close;
        let in_buy_zone = matches!(
            (zones.buy_zone_low[j], zones.buy_zone_high[j]),
            (Some(low), Some(high)) if low <= close && close <= high
        );
        let in_sell_zone = matches!(
            (zones.sell_zone_low[j], zones.sell_zone_high[j]),
            (Some(low), Some(high)) if low <= close && close <= high
        );
        if candle_color(&candle, trend, in_buy_zone, in_sell_zone) == color {
            return true;
        }
    }
    false
}

// ============================================================================
// Wick rejection
// ============================================================================

/// Strong BUY wick rejection: a meaningful-range green candle with a long
/// lower wick (≥ 33% of range), solid body (≥ 40%) and a small upper wick
/// (≤ 25%).
pub fn wick_rejection_buy(candle: &Candle, cfg: &EvaluatorSettings) -> bool {
    let range = candle.range();
    if range <= 0.0 || range < cfg.min_range_pct * candle.close {
        return false;
    }
    candle.lower_wick() / range >= 0.33
        && candle.body() / range >= 0.4
        && candle.upper_wick() / range <= 0.25
        && candle.is_bullish()
}

/// Mirrored for SELL: long upper wick, solid body, small lower wick, red.
pub fn wick_rejection_sell(candle: &Candle, cfg: &EvaluatorSettings) -> bool {
    let range = candle.range();
    if range <= 0.0 || range < cfg.min_range_pct * candle.close {
        return false;
    }
    candle.upper_wick() / range >= 0.33
        && candle.body() / range >= 0.4
        && candle.lower_wick() / range <= 0.25
        && candle.is_bearish()
}

// ============================================================================
// Strong candle (momentum): body vs the 10-bar body average
// ============================================================================

/// Mean absolute body size over the `window` rows before `idx`.
/// None while not enough history exists.
fn body_average(series: &OhlcvSeries, idx: usize, window: usize) -> Option<f64> {
    if idx < window {
        return None;
    }
    let sum: f64 = (idx - window..idx)
        .map(|j| (series.close_prices[j] - series.open_prices[j]).abs())
        .sum();
    Some(sum / window as f64)
}

pub fn strong_buy(series: &OhlcvSeries, idx: usize, cfg: &EvaluatorSettings) -> bool {
    let Some(body_avg) = body_average(series, idx, cfg.body_avg_window) else {
        return false;
    };
    let candle = series.get_candle(idx);
    candle.is_bullish() && candle.body() >= cfg.strong_body_ratio * body_avg
}

pub fn strong_sell(series: &OhlcvSeries, idx: usize, cfg: &EvaluatorSettings) -> bool {
    let Some(body_avg) = body_average(series, idx, cfg.body_avg_window) else {
        return false;
    };
    let candle = series.get_candle(idx);
    candle.is_bearish() && candle.body() >= cfg.strong_body_ratio * body_avg
}

// ============================================================================
// Morning / evening star: 3-candle reversal patterns
// ============================================================================

/// Morning star: strong bearish candle with a small lower tail, an
/// indecision candle, then a bullish close beyond the midpoint of the
/// first candle's body. Needs the 10-bar baseline, so ≥ 10 prior rows.
pub fn is_morning_star(series: &OhlcvSeries, idx: usize, cfg: &EvaluatorSettings) -> bool {
    let Some(body_avg) = body_average(series, idx, cfg.body_avg_window) else {
        return false;
    };
    // body_avg needs idx >= 10, so idx-2 is always in range here
    let first = series.get_candle(idx - 2);
    let second = series.get_candle(idx - 1);
    let third = series.get_candle(idx);

    let first_range = first.range();
    let strong_sell_first = first.is_bearish()
        && first.body() >= cfg.strong_body_ratio * body_avg
        && first_range > 0.0
        && (first.close - first.low) / first_range <= cfg.star_wick_ratio;

    let second_range = second.range();
    let small_body =
        second_range > 0.0 && second.body() / second_range < cfg.indecision_body_ratio;

    let bullish_third = third.is_bullish() && third.close > first.body_midpoint();

    strong_sell_first && small_body && bullish_third
}

/// Evening star: the bearish mirror of the morning star.
pub fn is_evening_star(series: &OhlcvSeries, idx: usize, cfg: &EvaluatorSettings) -> bool {
    let Some(body_avg) = body_average(series, idx, cfg.body_avg_window) else {
        return false;
    };
    let first = series.get_candle(idx - 2);
    let second = series.get_candle(idx - 1);
    let third = series.get_candle(idx);

    let first_range = first.range();
    let strong_buy_first = first.is_bullish()
        && first.body() >= cfg.strong_body_ratio * body_avg
        && first_range > 0.0
        && (first.high - first.close) / first_range <= cfg.star_wick_ratio;

    let second_range = second.range();
    let small_body =
        second_range > 0.0 && second.body() / second_range < cfg.indecision_body_ratio;

    let bearish_third = third.is_bearish() && third.close < first.body_midpoint();

    strong_buy_first && small_body && bearish_third
}
