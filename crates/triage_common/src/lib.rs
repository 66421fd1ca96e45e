//! Triage Common - Shared types and the diagnosis rule engine
//!
//! The engine is a pure function from a symptom intake to a diagnosis
//! bundle. Session state, history and rendering live alongside it so the
//! CLI only has to collect input and print.

pub mod config;
pub mod engine;
pub mod error;
pub mod history;
pub mod intake;
pub mod render;
pub mod session;

pub use engine::{evaluate, DiagnosisResult};
pub use error::{Result, TriageError};
pub use history::{History, HistoryEntry};
pub use intake::{
    Choice, Duration, ExistingCondition, FeverLevel, MainSymptom, PainLevel, SymptomIntake,
};
pub use session::{Gender, Page, PersonalInfo, Session};
