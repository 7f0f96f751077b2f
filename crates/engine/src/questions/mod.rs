//! Question registry and selector.

mod registry;
mod selector;

pub use registry::{QuestionDefinition, QuestionRegistry, QuestionRequirements, Templates};
pub use selector::{
    candidate_pool, fallback_question, select_question, QueryContext, QueryStats, Question,
};

use std::fmt;

use hunter_core::CellValue;
use serde::Serialize;
use thiserror::Error;

/// Raised inside a question's `compute`; the selector replaces it with the
/// `"Error"` sentinel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestionError {
    #[error("question needs a highlighted cell")]
    NoHighlight,

    #[error("question needs numeric stats")]
    MissingStats,
}

/// A computed answer. Serializes as the bare number or string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Count(usize),
    Value(CellValue),
    Text(String),
}

impl Answer {
    pub fn text(s: &str) -> Self {
        Answer::Text(s.to_string())
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Count(n) => write!(f, "{}", n),
            Answer::Value(v) => write!(f, "{}", v),
            Answer::Text(s) => write!(f, "{}", s),
        }
    }
}
