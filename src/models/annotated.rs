use serde::{Deserialize, Serialize};

use crate::domain::EntrySignal;
use crate::models::OhlcvSeries;

// ============================================================================
// Per-row column blocks produced by the pipeline stages.
// "Undefined" is an explicit None, never NaN or a spurious zero.
// ============================================================================

/// Base-timeframe indicator columns
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndicatorColumns {
    pub trend_line: Vec<Option<f64>>,
    pub upper_band: Vec<Option<f64>>,
    pub lower_band: Vec<Option<f64>>,
    pub atr: Vec<Option<f64>>,
}

/// Higher-timeframe indicator triple, broadcast onto every base row
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct OverlayColumns {
    pub trend_line_4h: Vec<Option<f64>>,
    pub upper_band_4h: Vec<Option<f64>>,
    pub lower_band_4h: Vec<Option<f64>>,
}

/// Buy/sell entry zones. All None when the phase does not use zones.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ZoneColumns {
    pub buy_zone_low: Vec<Option<f64>>,
    pub buy_zone_high: Vec<Option<f64>>,
    pub sell_zone_low: Vec<Option<f64>>,
    pub sell_zone_high: Vec<Option<f64>>,
}

impl ZoneColumns {
    pub fn undefined(len: usize) -> Self {
        ZoneColumns {
            buy_zone_low: vec![None; len],
            buy_zone_high: vec![None; len],
            sell_zone_low: vec![None; len],
            sell_zone_high: vec![None; len],
        }
    }
}

// ============================================================================
// AnnotatedSeries: the full pipeline output frame
// ============================================================================

/// The raw series plus every derived column. Produced once per pipeline run;
/// rows are never retro-edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotatedSeries {
    pub series: OhlcvSeries,
    pub indicators: IndicatorColumns,
    /// Adaptive zone width, back-filled so every row is defined
    pub pct_dynamic: Vec<f64>,
    pub overlay: OverlayColumns,
    pub zones: ZoneColumns,
    pub entry_signals: Vec<EntrySignal>,
    pub reasons: Vec<String>,
}

/// The last row of an annotated frame, reduced to what alerting needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSnapshot {
    pub symbol: String,
    pub signal: EntrySignal,
    pub reason: String,
    pub close: f64,
    pub open_time_ms: i64,
}

impl AnnotatedSeries {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Snapshot of the most recent row (what the alerting boundary consumes).
    pub fn latest(&self) -> Option<SignalSnapshot> {
        let idx = self.len().checked_sub(1)?;
        Some(SignalSnapshot {
            symbol: self.series.symbol.clone(),
            signal: self.entry_signals[idx],
            reason: self.reasons[idx].clone(),
            close: self.series.close_prices[idx],
            open_time_ms: self.series.open_times_ms[idx],
        })
    }
}
