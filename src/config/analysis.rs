//! Indicator and signal pipeline configuration

use crate::utils::TimeUtils;

/// Settings for the zero-lag trend line and its derived bands
pub struct IndicatorSettings {
    // Smoothing span shared by both EMA passes of the ZLEMA construction
    pub zlema_span: usize,
    // Band half-width in standard deviations of the trend line
    pub band_std_mult: f64,
    // Rolling window for the average true range
    pub atr_window: usize,
}

/// Settings for the adaptive zone percentage
pub struct AdaptiveSettings {
    // Scaling factor applied to the raw band-width ratio
    pub base_scale: f64,
    // EMA span used to smooth the scaled ratio
    pub ema_span: usize,
    // Weight of the ATR contribution
    pub atr_weight: f64,
    // Weights of the raw vs smoothed ratio in the blend
    pub raw_weight: f64,
    pub smoothed_weight: f64,
    // Hard floor / ceiling of the final percentage (0.2% .. 1.8%)
    pub min_pct: f64,
    pub max_pct: f64,
    // Band-relative limiter: the zone never exceeds this share of the band width
    pub band_cap_ratio: f64,
}

/// Settings for the higher-timeframe overlay
pub struct OverlaySettings {
    // Number of base candles aggregated into one coarse candle
    pub bucket_size: usize,
}

/// Settings for the per-row candle evaluator
pub struct EvaluatorSettings {
    // Candles with range below this fraction of close are ignored outright
    pub min_range_pct: f64,
    // How many previous candles to scan for a confirming color
    pub color_lookback: usize,
    // Window for the average body size baseline used by strong/star patterns
    pub body_avg_window: usize,
    // A "strong" candle has a body at least this multiple of the baseline
    pub strong_body_ratio: f64,
    // An "indecision" candle has a body below this fraction of its own range
    pub indecision_body_ratio: f64,
    // Maximum opposite-side wick fraction for the first candle of a star
    pub star_wick_ratio: f64,
}

/// The Master Pipeline Configuration
pub struct PipelineConfig {
    pub indicators: IndicatorSettings,
    pub adaptive: AdaptiveSettings,
    pub overlay: OverlaySettings,
    pub evaluator: EvaluatorSettings,

    // Base candle interval the pipeline is calibrated for
    pub interval_width_ms: i64,
    // Rolling retention window applied after an incremental merge
    pub retention_ms: i64,
}

pub const PIPELINE: PipelineConfig = PipelineConfig {
    indicators: IndicatorSettings {
        zlema_span: 16,
        band_std_mult: 2.0,
        atr_window: 14,
    },
    adaptive: AdaptiveSettings {
        base_scale: 0.25,
        ema_span: 8,
        atr_weight: 0.25,
        raw_weight: 0.6,
        smoothed_weight: 0.4,
        min_pct: 0.002,
        max_pct: 0.018,
        band_cap_ratio: 0.6,
    },
    overlay: OverlaySettings { bucket_size: 4 },
    evaluator: EvaluatorSettings {
        min_range_pct: 0.005,
        color_lookback: 4,
        body_avg_window: 10,
        strong_body_ratio: 1.2,
        indecision_body_ratio: 0.3,
        star_wick_ratio: 0.25,
    },

    interval_width_ms: TimeUtils::MS_IN_H,
    retention_ms: TimeUtils::MS_IN_D * 30,
};
