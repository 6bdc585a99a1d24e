// Define the CandleColor enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandleColor {
    Green,
    Red,
    Neutral,
}

// A single OHLCV row pulled out of the column store for per-candle maths
#[derive(Debug, Clone, Copy)]
pub struct Candle {
    pub open_time_ms: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(open_time_ms: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Candle {
            open_time_ms,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Full candle range, high to low. Can be 0.0 for a flat candle.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }

    pub fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    pub fn is_bearish(&self) -> bool {
        self.close < self.open
    }

    // Wick below the body
    pub fn lower_wick(&self) -> f64 {
        self.open.min(self.close) - self.low
    }

    // Wick above the body
    pub fn upper_wick(&self) -> f64 {
        self.high - self.open.max(self.close)
    }

    /// Midpoint of the body, used by the star reversal patterns.
    pub fn body_midpoint(&self) -> f64 {
        (self.open + self.close) / 2.0
    }

    /// Sanity bounds every well-formed candle satisfies.
    pub fn is_well_formed(&self) -> bool {
        let finite = [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite());
        finite && self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}
