pub mod evaluation;
pub mod formatting;
pub mod generator;
pub mod orchestrator;
pub mod patterns;
pub mod presentation;
pub mod questions;

pub use evaluation::{award_points, evaluate_answer};
pub use formatting::{resolve_formatting, FormattingResult, FormattingRule};
pub use generator::DatasetGenerator;
pub use orchestrator::{Challenge, EngineContext, EngineContextBuilder};
pub use patterns::{
    apply_highlight_logic, fallback_meta, inject_pattern, InjectionDetails, InjectionResult,
    PatternDefinition, PatternMeta, PatternRegistry, NONE_PATTERN,
};
pub use questions::{select_question, Answer, Question, QuestionError, QuestionRegistry};
