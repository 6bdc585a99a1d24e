pub mod annotated;
pub mod timeseries;

pub use annotated::{
    AnnotatedSeries, IndicatorColumns, OverlayColumns, SignalSnapshot, ZoneColumns,
};
pub use timeseries::OhlcvSeries;
