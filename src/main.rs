use std::path::Path;

use anyhow::Result;
use clap::Parser;

use zlema_signals::config::{ALERTS, PIPELINE};
use zlema_signals::engine::for_each_symbol_batched;
use zlema_signals::utils::time_utils::epoch_ms_to_utc;
use zlema_signals::{
    Cli, LogNotifier, PersistentMemo, Phase, SignalMonitor, Trend, load_series, merge_series,
    run_pipeline, save_series,
};

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Cli::parse();
    log::info!("Parsed arguments: {:?}", args);

    let phase = Phase::parse_lossy(&args.phase);
    let trend = Trend::parse_lossy(&args.trend);

    let symbols: Vec<String> = if args.symbols.is_empty() {
        ALERTS.symbols.iter().map(|s| s.to_string()).collect()
    } else {
        args.symbols.clone()
    };
    let cache_dir = args.cache_dir.as_deref().unwrap_or(ALERTS.cache_dir);
    let memo_path = args.memo_path.as_deref().unwrap_or(ALERTS.memo_path);

    let mut memo = PersistentMemo::open(memo_path)?;
    let notifier = LogNotifier;

    for_each_symbol_batched(
        &symbols,
        ALERTS.driver.batch_size,
        ALERTS.driver.batch_pause_ms,
        |symbol| {
            if let Err(e) = process_symbol(
                symbol,
                phase,
                trend,
                Path::new(cache_dir),
                args.incoming_dir.as_deref().map(Path::new),
                &mut memo,
                &notifier,
            ) {
                log::error!("{}: {:#}", symbol, e);
            }
        },
    );

    memo.flush()?;
    Ok(())
}

fn process_symbol(
    symbol: &str,
    phase: Phase,
    trend: Trend,
    cache_dir: &Path,
    incoming_dir: Option<&Path>,
    memo: &mut PersistentMemo,
    notifier: &LogNotifier,
) -> Result<()> {
    log::info!("Processing {}...", symbol);

    let existing = load_series(cache_dir, symbol)?;
    let series = match incoming_dir {
        Some(dir) => {
            let fresh = load_series(dir, symbol)?;
            merge_series(&existing, &fresh, PIPELINE.retention_ms)
        }
        None => existing,
    };

    if series.is_empty() {
        log::warn!("No data for {}, skipping.", symbol);
        return Ok(());
    }

    let annotated = run_pipeline(&series, phase, trend, &PIPELINE)?;

    if let Some(snapshot) = annotated.latest() {
        log::info!(
            "{}: {} at {:.4} ({}): {}",
            symbol,
            snapshot.signal,
            snapshot.close,
            epoch_ms_to_utc(snapshot.open_time_ms),
            snapshot.reason
        );
    }

    let mut monitor = SignalMonitor::new(&mut memo.memo, notifier);
    monitor.process(&annotated, phase, trend)?;

    save_series(cache_dir, &series)?;
    Ok(())
}
