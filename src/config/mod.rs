//! Configuration module for the signal pipeline.

pub mod alerts;
pub mod analysis;

// Re-export commonly used items
pub use alerts::ALERTS;
pub use analysis::{PIPELINE, PipelineConfig};
