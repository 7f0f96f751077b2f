pub mod config;
pub mod dataset;
pub mod error;
pub mod generation;
pub mod tier;

pub use config::Settings;
pub use dataset::*;
pub use error::*;
pub use generation::GenerationRules;
pub use tier::*;
