pub mod cache_file;
pub mod merge;

pub use cache_file::{load_series, save_series};
pub use merge::merge_series;
