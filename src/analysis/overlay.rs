use itertools::Itertools;

use crate::analysis::indicators::compute_indicators;
use crate::config::analysis::{IndicatorSettings, OverlaySettings};
use crate::domain::Candle;
use crate::models::{OhlcvSeries, OverlayColumns};
use crate::utils::maths_utils::{get_max, get_min};

/// Higher-timeframe overlay: bucket the base series into groups of
/// `bucket_size` rows, aggregate each group into one coarse candle, run the
/// indicator engine on the coarse series, then broadcast each coarse triple
/// back onto every base row of its bucket.
///
/// Bucket membership is `row_index / bucket_size`: position, not timestamp.
/// The trailing bucket may be partial and is aggregated with whatever rows
/// exist, so the most recent overlay values shift as the bucket fills. That
/// retroactive drift is intended behavior, not a defect.
pub fn compute_overlay(
    series: &OhlcvSeries,
    overlay_cfg: &OverlaySettings,
    indicator_cfg: &IndicatorSettings,
) -> OverlayColumns {
    let n = series.len();
    let mut columns = OverlayColumns {
        trend_line_4h: vec![None; n],
        upper_band_4h: vec![None; n],
        lower_band_4h: vec![None; n],
    };
    if n == 0 {
        return columns;
    }

    let coarse = aggregate_buckets(series, overlay_cfg.bucket_size);
    let coarse_ind = compute_indicators(&coarse, indicator_cfg);

    for (base_idx, slot) in columns.trend_line_4h.iter_mut().enumerate() {
        *slot = coarse_ind.trend_line[base_idx / overlay_cfg.bucket_size];
    }
    for (base_idx, slot) in columns.upper_band_4h.iter_mut().enumerate() {
        *slot = coarse_ind.upper_band[base_idx / overlay_cfg.bucket_size];
    }
    for (base_idx, slot) in columns.lower_band_4h.iter_mut().enumerate() {
        *slot = coarse_ind.lower_band[base_idx / overlay_cfg.bucket_size];
    }

    columns
}

/// Collapse contiguous groups of `bucket_size` rows into synthetic coarse
/// candles: first open, max high, min low, last close, summed volume.
pub fn aggregate_buckets(series: &OhlcvSeries, bucket_size: usize) -> OhlcvSeries {
    let mut coarse = OhlcvSeries::new(series.symbol.clone());
    for chunk in &(0..series.len()).chunks(bucket_size) {
        let indices: Vec<usize> = chunk.collect();
        let first = indices[0];
        let last = *indices.last().unwrap();
        coarse.push(Candle::new(
            series.open_times_ms[first],
            series.open_prices[first],
            get_max(&series.high_prices[first..=last]),
            get_min(&series.low_prices[first..=last]),
            series.close_prices[last],
            series.volumes[first..=last].iter().sum(),
        ));
    }
    coarse
}
