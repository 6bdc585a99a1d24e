pub mod adaptive_pct;
pub mod evaluator;
pub mod indicators;
pub mod overlay;
pub mod patterns;
pub mod zones;

pub use adaptive_pct::compute_adaptive_pct;
pub use evaluator::{evaluate_candles, evaluate_signal};
pub use indicators::compute_indicators;
pub use overlay::{aggregate_buckets, compute_overlay};
pub use zones::compute_zones;
