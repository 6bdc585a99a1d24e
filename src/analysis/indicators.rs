use crate::config::analysis::IndicatorSettings;
use crate::models::{IndicatorColumns, OhlcvSeries};
use crate::utils::maths_utils::{ema, rolling_mean, rolling_std};

/// Compute the base-timeframe indicator block: ZLEMA trend line, ±2σ bands
/// and ATR. Rows inside the warm-up windows stay `None` and must be treated
/// as "cannot evaluate" downstream, never as zero.
pub fn compute_indicators(series: &OhlcvSeries, cfg: &IndicatorSettings) -> IndicatorColumns {
    let trend_line = zero_lag_trend_line(&series.close_prices, cfg.zlema_span);

    // Bands: trend line ± k standard deviations over a span-sized window
    let sigma = rolling_std(&trend_line, cfg.zlema_span);
    let mut upper_band = vec![None; series.len()];
    let mut lower_band = vec![None; series.len()];
    for i in 0..series.len() {
        if let (Some(mid), Some(sd)) = (trend_line[i], sigma[i]) {
            upper_band[i] = Some(mid + cfg.band_std_mult * sd);
            lower_band[i] = Some(mid - cfg.band_std_mult * sd);
        }
    }

    let atr = average_true_range(series, cfg.atr_window);

    IndicatorColumns {
        trend_line,
        upper_band,
        lower_band,
        atr,
    }
}

/// Two-pass zero-lag EMA. The de-lag step doubles the most recent move
/// relative to `lag = (span-1)/2` rows back, which cancels the phase lag a
/// single EMA would carry; the second EMA re-smooths the result.
fn zero_lag_trend_line(closes: &[f64], span: usize) -> Vec<Option<f64>> {
    let lag = (span - 1) / 2;
    let de_lagged: Vec<Option<f64>> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            if i < lag {
                None
            } else {
                Some(close + (close - closes[i - lag]))
            }
        })
        .collect();
    ema(&de_lagged, span)
}

/// True range per row (first row falls back to high-low, there is no
/// previous close) followed by a rolling mean.
fn average_true_range(series: &OhlcvSeries, window: usize) -> Vec<Option<f64>> {
    let tr: Vec<Option<f64>> = (0..series.len())
        .map(|i| {
            let high = series.high_prices[i];
            let low = series.low_prices[i];
            if i == 0 {
                return Some(high - low);
            }
            let prev_close = series.close_prices[i - 1];
            Some(
                (high - low)
                    .max((high - prev_close).abs())
                    .max((low - prev_close).abs()),
            )
        })
        .collect();
    rolling_mean(&tr, window)
}
