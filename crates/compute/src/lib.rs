pub mod algorithms;
pub mod analytics;
pub mod engine;

pub use algorithms::frequency::ValueCount;
pub use algorithms::stats::PopulationStats;
pub use analytics::AnalyticsMetadata;
pub use engine::{compute_for_dataset, compute_metadata};
