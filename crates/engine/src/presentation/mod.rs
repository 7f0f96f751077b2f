//! Glyph, sigil and lens codices. Pure functions of the analytics record;
//! rendering is left to the caller.

pub mod glyphs;
pub mod lens;
pub mod sigils;

pub use glyphs::{compute_glyphs, ActiveGlyph, GlyphDefinition, GLYPH_CODEX};
pub use lens::{apply_lens, LensMode, LensView};
pub use sigils::{compute_sigils, ActiveSigil, SigilDefinition, SIGIL_CODEX};

use hunter_compute::AnalyticsMetadata;
use hunter_core::DatasetKind;
use serde::Serialize;

/// Active glyphs and sigils attached to a challenge.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Insights {
    pub glyphs: Vec<ActiveGlyph>,
    pub sigils: Vec<ActiveSigil>,
}

impl Insights {
    pub fn from_analytics(analytics: &AnalyticsMetadata, kind: DatasetKind) -> Self {
        Self {
            glyphs: compute_glyphs(analytics, kind),
            sigils: compute_sigils(analytics),
        }
    }
}
