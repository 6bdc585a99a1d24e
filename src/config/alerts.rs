//! Alerting and multi-symbol driver configuration

/// Settings for the sequential multi-symbol driver.
/// Batching exists purely to be polite to the upstream data source,
/// it is not a concurrency primitive.
pub struct DriverSettings {
    // How many symbols to process before pausing
    pub batch_size: usize,
    // Fixed pause between batches (milliseconds)
    pub batch_pause_ms: u64,
}

/// The Master Alerting Configuration
pub struct AlertConfig {
    pub driver: DriverSettings,
    // Where the last-signal memo is persisted between runs
    pub memo_path: &'static str,
    // Where per-symbol candle caches live
    pub cache_dir: &'static str,
    // Default watch list
    pub symbols: &'static [&'static str],
}

pub const ALERTS: AlertConfig = AlertConfig {
    driver: DriverSettings {
        batch_size: 2,
        batch_pause_ms: 1500,
    },
    memo_path: "last_signals.json",
    cache_dir: "kline_cache",
    symbols: &["BTCUSDT", "ETHUSDT", "SOLUSDT", "LTCUSDT"],
};
