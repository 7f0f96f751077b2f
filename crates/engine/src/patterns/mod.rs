//! Pattern registry: definitions grouped by dataset kind, each able to write
//! itself into a grid and to recognise the cells it wrote.

pub mod definitions;
mod injector;
mod profile;
mod registry;

pub use injector::{
    apply_highlight_logic, fallback_meta, inject_pattern, GlyphActivation, InjectionResult,
    LensMeta, PatternMeta, ScoringMeta, UiContext,
};
pub use profile::{
    InjectionDetails, PatternProfile, PatternRequirements, QuestionHints, Scoring, SigilHint,
    UiProfile,
};
pub use registry::PatternRegistry;

use hunter_core::{CellValue, Dataset};
use rand::RngCore;

/// Id of the canonical no-op pattern.
pub const NONE_PATTERN: &str = "none";

/// A pattern that can be embedded into a dataset.
///
/// Implementations mutate a small number of cells in [`inject`](Self::inject)
/// and report them in [`InjectionDetails`]; [`matches`](Self::matches) must
/// then recognise at least those cells.
pub trait PatternDefinition: Send + Sync {
    /// Static identity, requirements and presentation hooks.
    fn profile(&self) -> &PatternProfile;

    /// Write the pattern into `dataset`.
    fn inject(&self, dataset: &mut Dataset, rng: &mut dyn RngCore) -> InjectionDetails;

    /// Whether `value` belongs to the pattern described by `details`.
    fn matches(&self, value: &CellValue, details: &InjectionDetails) -> bool;

    fn id(&self) -> &str {
        &self.profile().id
    }
}
