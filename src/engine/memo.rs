use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::EntrySignal;

/// Last-seen-signal memo, one entry per symbol. The only persistent mutable
/// state in the system: used to avoid re-alerting an unchanged signal.
///
/// Contract: single writer per symbol. `observe` is read-then-compare-then-
/// write, so two concurrent evaluations of the same symbol must not share a
/// memo handle.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SignalMemo {
    entries: HashMap<String, EntrySignal>,
}

impl SignalMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON file; a missing file is an empty memo, not an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading signal memo {}", path.display()))?;
        let memo = serde_json::from_str(&text)
            .with_context(|| format!("parsing signal memo {}", path.display()))?;
        Ok(memo)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)
            .with_context(|| format!("writing signal memo {}", path.display()))?;
        Ok(())
    }

    pub fn last_signal(&self, symbol: &str) -> Option<EntrySignal> {
        self.entries.get(symbol).copied()
    }

    /// Record the latest signal for a symbol. Returns true when the signal
    /// changed from the previously recorded value (including the first
    /// observation).
    pub fn observe(&mut self, symbol: &str, signal: EntrySignal) -> bool {
        let changed = self.entries.get(symbol) != Some(&signal);
        if changed {
            self.entries.insert(symbol.to_string(), signal);
        }
        changed
    }
}

/// Convenience handle binding a memo to its backing file.
#[derive(Debug)]
pub struct PersistentMemo {
    pub memo: SignalMemo,
    path: PathBuf,
}

impl PersistentMemo {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let memo = SignalMemo::load(&path)?;
        Ok(Self { memo, path })
    }

    pub fn flush(&self) -> Result<()> {
        self.memo.save(&self.path)
    }
}
