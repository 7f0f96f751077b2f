use thiserror::Error;

#[derive(Error, Debug)]
pub enum HunterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(String),

    /// An engine component was used before its rule tables were supplied.
    #[error("Engine not initialized: missing {0}")]
    NotInitialized(&'static str),

    #[error("Unknown dataset type: {name}{}", suggestion.as_ref().map(|s| format!(" (did you mean '{}'?)", s)).unwrap_or_default())]
    UnknownDatasetType {
        name: String,
        suggestion: Option<String>,
    },

    #[error("No configuration found for level {0}")]
    UnknownLevel(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A generated or injected cell failed its type validator.
    #[error("Dataset integrity violated at ({row}, {col}): {reason}")]
    DatasetIntegrity {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl HunterError {
    /// True for errors that indicate a caller bug rather than data drift.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            HunterError::NotInitialized(_)
                | HunterError::UnknownDatasetType { .. }
                | HunterError::UnknownLevel(_)
                | HunterError::InvalidConfig(_)
        )
    }
}

impl From<serde_json::Error> for HunterError {
    fn from(e: serde_json::Error) -> Self {
        HunterError::Serialize(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HunterError>;
