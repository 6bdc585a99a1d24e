pub mod memo;
pub mod monitor;
pub mod notifier;
pub mod pipeline;

pub use memo::{PersistentMemo, SignalMemo};
pub use monitor::{SignalMonitor, for_each_symbol_batched};
pub use notifier::{AlertPayload, LogNotifier, Notifier};
pub use pipeline::{run_pipeline, run_pipeline_str};
