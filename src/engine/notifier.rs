use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::{EntrySignal, Phase, Trend};
use crate::models::SignalSnapshot;
use crate::utils::time_utils::epoch_ms_to_utc;

/// What gets handed to the delivery channel when a signal flips to BUY/SELL.
/// The core builds this and stops there: delivery (Telegram etc.) lives
/// outside the crate behind the `Notifier` trait.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertPayload {
    pub symbol: String,
    pub signal: EntrySignal,
    pub phase: Phase,
    pub trend: Trend,
    pub price: f64,
    pub timestamp_ms: i64,
    pub reason: String,
}

impl AlertPayload {
    pub fn from_snapshot(snapshot: &SignalSnapshot, phase: Phase, trend: Trend) -> Self {
        AlertPayload {
            symbol: snapshot.symbol.clone(),
            signal: snapshot.signal,
            phase,
            trend,
            price: snapshot.close,
            timestamp_ms: snapshot.open_time_ms,
            reason: snapshot.reason.clone(),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} {} @ {:.4} ({} / {}) [{}] {}",
            self.signal,
            self.symbol,
            self.price,
            self.phase,
            self.trend,
            epoch_ms_to_utc(self.timestamp_ms),
            self.reason
        )
    }
}

/// Outbound alert boundary. Implementations perform the actual delivery;
/// the core never does network I/O itself.
pub trait Notifier {
    fn notify(&self, payload: &AlertPayload) -> Result<()>;
}

/// Default delivery: the application log.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, payload: &AlertPayload) -> Result<()> {
        log::info!("ALERT {}", payload.summary());
        Ok(())
    }
}
