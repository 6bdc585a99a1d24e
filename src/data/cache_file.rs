use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::OhlcvSeries;

/// Per-symbol JSON candle cache. Holds the "existing" side of an incremental
/// merge between runs; small enough that human-inspectable JSON beats a
/// binary format.
pub fn cache_path(cache_dir: &Path, symbol: &str) -> PathBuf {
    cache_dir.join(format!("{}_1h.json", symbol))
}

/// Load a cached series; a missing file yields an empty series for the
/// symbol (first run), a corrupt file is an error.
pub fn load_series(cache_dir: &Path, symbol: &str) -> Result<OhlcvSeries> {
    let path = cache_path(cache_dir, symbol);
    if !path.exists() {
        return Ok(OhlcvSeries::new(symbol));
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("reading candle cache {}", path.display()))?;
    let series: OhlcvSeries = serde_json::from_str(&text)
        .with_context(|| format!("parsing candle cache {}", path.display()))?;
    series.validate()?;
    Ok(series)
}

pub fn save_series(cache_dir: &Path, series: &OhlcvSeries) -> Result<()> {
    std::fs::create_dir_all(cache_dir)
        .with_context(|| format!("creating cache dir {}", cache_dir.display()))?;
    let path = cache_path(cache_dir, &series.symbol);
    let text = serde_json::to_string(series)?;
    std::fs::write(&path, text)
        .with_context(|| format!("writing candle cache {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Candle;

    #[test]
    fn round_trip_preserves_the_series() {
        let dir = tempfile::tempdir().unwrap();
        let mut series = OhlcvSeries::new("BTCUSDT");
        for i in 0..5 {
            series.push(Candle::new(
                i * 3_600_000,
                100.0,
                101.0,
                99.0,
                100.5,
                12.0,
            ));
        }
        save_series(dir.path(), &series).unwrap();

        let loaded = load_series(dir.path(), "BTCUSDT").unwrap();
        assert_eq!(loaded.symbol, "BTCUSDT");
        assert_eq!(loaded.open_times_ms, series.open_times_ms);
        assert_eq!(loaded.close_prices, series.close_prices);
    }

    #[test]
    fn missing_cache_is_an_empty_series() {
        let dir = tempfile::tempdir().unwrap();
        let series = load_series(dir.path(), "ETHUSDT").unwrap();
        assert!(series.is_empty());
        assert_eq!(series.symbol, "ETHUSDT");
    }

    #[test]
    fn corrupt_cache_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(cache_path(dir.path(), "BTCUSDT"), "not json").unwrap();
        assert!(load_series(dir.path(), "BTCUSDT").is_err());
    }
}
