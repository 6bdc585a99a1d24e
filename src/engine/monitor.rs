use std::thread;
use std::time::Duration;

use anyhow::Result;

use crate::domain::{Phase, Trend};
use crate::engine::memo::SignalMemo;
use crate::engine::notifier::{AlertPayload, Notifier};
use crate::models::AnnotatedSeries;

/// Multi-symbol signal monitor: compares each run's latest signal against
/// the last-signal memo and pushes an alert when it flips to BUY or SELL.
pub struct SignalMonitor<'a> {
    memo: &'a mut SignalMemo,
    notifier: &'a dyn Notifier,
}

impl<'a> SignalMonitor<'a> {
    pub fn new(memo: &'a mut SignalMemo, notifier: &'a dyn Notifier) -> Self {
        Self { memo, notifier }
    }

    /// Inspect the latest row of an annotated frame. Returns the payload if
    /// an alert was dispatched. The memo is updated on every change (NONE
    /// included) so a later flip back to BUY re-alerts.
    pub fn process(
        &mut self,
        annotated: &AnnotatedSeries,
        phase: Phase,
        trend: Trend,
    ) -> Result<Option<AlertPayload>> {
        let Some(snapshot) = annotated.latest() else {
            return Ok(None);
        };

        let changed = self.memo.observe(&snapshot.symbol, snapshot.signal);
        if !(changed && snapshot.signal.is_actionable()) {
            return Ok(None);
        }

        let payload = AlertPayload::from_snapshot(&snapshot, phase, trend);
        self.notifier.notify(&payload)?;
        Ok(Some(payload))
    }
}

/// Sequential driver: visit symbols in fixed-size batches with a fixed pause
/// between batches. This throttles the upstream data source and nothing
/// else: within a batch symbols are still processed one at a time.
pub fn for_each_symbol_batched<F>(
    symbols: &[String],
    batch_size: usize,
    batch_pause_ms: u64,
    mut visit: F,
) where
    F: FnMut(&str),
{
    let batch_size = batch_size.max(1);
    for (batch_idx, batch) in symbols.chunks(batch_size).enumerate() {
        if batch_idx > 0 && batch_pause_ms > 0 {
            thread::sleep(Duration::from_millis(batch_pause_ms));
        }
        for symbol in batch {
            visit(symbol);
        }
    }
}
