pub mod candle;
pub mod market;

pub use candle::{Candle, CandleColor};
pub use market::{EntrySignal, Phase, Trend};
