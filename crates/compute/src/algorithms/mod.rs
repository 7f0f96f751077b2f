pub mod clusters;
pub mod frequency;
pub mod sequences;
pub mod stats;
