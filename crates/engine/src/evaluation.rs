//! Checking a player's answer and pricing a solved challenge.

use tracing::debug;

use crate::patterns::PatternMeta;
use crate::questions::Question;

/// Points lost per extra attempt.
pub const ATTEMPT_PENALTY: u32 = 10;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Case- and whitespace-insensitive comparison against the answer's display form.
pub fn evaluate_answer(question: &Question, input: &str) -> bool {
    let correct = normalize(input) == normalize(&question.answer.to_string());
    debug!(question = %question.kind, correct, "answer evaluated");
    correct
}

/// `round(base × difficulty × tier) − 10 × (attempts − 1)`, floored at zero.
///
/// `attempts` counts the successful one; zero is treated as one.
pub fn award_points(meta: &PatternMeta, attempts: u32) -> u32 {
    let scoring = &meta.scoring;
    if scoring.base_points == 0 {
        return 0;
    }
    let full = (scoring.base_points as f64 * scoring.difficulty_multiplier * scoring.tier_multiplier).round();
    let penalty = ATTEMPT_PENALTY.saturating_mul(attempts.saturating_sub(1)) as f64;
    (full - penalty).max(0.0) as u32
}
