#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod models;
pub mod utils;

// The engine
pub mod engine;

// Re-export commonly used types
pub use data::{load_series, merge_series, save_series};
pub use domain::{Candle, EntrySignal, Phase, Trend};
pub use engine::{
    AlertPayload, LogNotifier, Notifier, PersistentMemo, SignalMemo, SignalMonitor, run_pipeline,
    run_pipeline_str,
};
pub use models::{AnnotatedSeries, OhlcvSeries, SignalSnapshot};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Market phase (TTR / BTR / Sideways), case-insensitive
    #[arg(long, default_value = "BTR")]
    pub phase: String,

    /// Market trend (Bullish / Bearish / Sideways), case-insensitive;
    /// invalid values fall back to sideways
    #[arg(long, default_value = "sideways")]
    pub trend: String,

    /// Symbols to evaluate (defaults to the configured watch list)
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Directory holding the per-symbol candle caches
    #[arg(long)]
    pub cache_dir: Option<String>,

    /// Directory with freshly fetched candles to merge in (written by the
    /// external fetch collaborator, same <SYMBOL>_1h.json layout)
    #[arg(long)]
    pub incoming_dir: Option<String>,

    /// Path of the persisted last-signal memo
    #[arg(long)]
    pub memo_path: Option<String>,
}
