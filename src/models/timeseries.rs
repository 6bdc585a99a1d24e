use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::domain::Candle;

// ============================================================================
// OhlcvSeries: Raw hourly time series data for a trading pair
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct OhlcvSeries {
    pub symbol: String,

    // Candle open timestamps, unique and ascending
    pub open_times_ms: Vec<i64>,

    // Prices
    pub open_prices: Vec<f64>,
    pub high_prices: Vec<f64>,
    pub low_prices: Vec<f64>,
    pub close_prices: Vec<f64>,

    // Volumes (unused by the indicators but part of the external contract)
    pub volumes: Vec<f64>,
}

impl OhlcvSeries {
    pub fn new(symbol: impl Into<String>) -> Self {
        OhlcvSeries {
            symbol: symbol.into(),
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.open_times_ms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open_times_ms.is_empty()
    }

    pub fn push(&mut self, candle: Candle) {
        self.open_times_ms.push(candle.open_time_ms);
        self.open_prices.push(candle.open);
        self.high_prices.push(candle.high);
        self.low_prices.push(candle.low);
        self.close_prices.push(candle.close);
        self.volumes.push(candle.volume);
    }

    pub fn get_candle(&self, idx: usize) -> Candle {
        Candle::new(
            self.open_times_ms[idx],
            self.open_prices[idx],
            self.high_prices[idx],
            self.low_prices[idx],
            self.close_prices[idx],
            self.volumes[idx],
        )
    }

    pub fn last_open_time_ms(&self) -> Option<i64> {
        self.open_times_ms.last().copied()
    }

    /// Check the structural contract: equal column lengths, strictly ascending
    /// unique timestamps, and well-formed candles throughout.
    pub fn validate(&self) -> Result<()> {
        let n = self.len();
        let lengths = [
            self.open_prices.len(),
            self.high_prices.len(),
            self.low_prices.len(),
            self.close_prices.len(),
            self.volumes.len(),
        ];
        if lengths.iter().any(|&l| l != n) {
            bail!(
                "{}: ragged columns (times={}, lengths={:?})",
                self.symbol,
                n,
                lengths
            );
        }
        for window in self.open_times_ms.windows(2) {
            if window[1] <= window[0] {
                bail!(
                    "{}: open_times not strictly ascending at {} -> {}",
                    self.symbol,
                    window[0],
                    window[1]
                );
            }
        }
        for idx in 0..n {
            let candle = self.get_candle(idx);
            if !candle.is_well_formed() {
                return Err(anyhow!(
                    "{}: malformed candle at index {} ({:?})",
                    self.symbol,
                    idx,
                    candle
                ));
            }
        }
        Ok(())
    }
}
