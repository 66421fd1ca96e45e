//! Error types for the triage assistant.
//!
//! The rule engine itself never fails; these errors come from the
//! boundaries around it (form parsing, session gating, config, export).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Unknown {field}: '{value}'")]
    UnknownChoice { field: &'static str, value: String },

    #[error("Age must be between 0 and 120, got {0}")]
    InvalidAge(i64),

    #[error("Personal information must be submitted before medical details")]
    PersonalInfoRequired,

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TriageError {
    /// Process exit code for this error (sysexits-style)
    pub fn exit_code(&self) -> i32 {
        match self {
            TriageError::UnknownChoice { .. } => 65,
            TriageError::InvalidAge(_) => 65,
            TriageError::PersonalInfoRequired => 65,
            TriageError::Json(_) => 65,
            TriageError::Config(_) => 78,
            TriageError::Toml(_) => 78,
            TriageError::Io(_) => 74,
        }
    }

    pub(crate) fn unknown(field: &'static str, value: &str) -> Self {
        TriageError::UnknownChoice {
            field,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TriageError>;
