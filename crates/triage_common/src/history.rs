//! Diagnosis history for one session.
//!
//! Append-only, lives as long as the process. An explicit JSON export and
//! import exist for the `history` command; nothing is saved automatically.

use crate::engine::DiagnosisResult;
use crate::error::Result;
use crate::intake::{Choice, MainSymptom};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Timestamp format shown in the history view
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One past diagnosis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(alias = "time")]
    pub timestamp: String,
    pub name: String,
    #[serde(alias = "symptom")]
    pub main_symptom: String,
    pub condition: String,
    /// Missing on entries recorded before scores existed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
}

impl HistoryEntry {
    pub fn new(
        at: DateTime<Local>,
        name: &str,
        main_symptom: MainSymptom,
        result: &DiagnosisResult,
    ) -> Self {
        Self {
            timestamp: at.format(TIMESTAMP_FORMAT).to_string(),
            name: name.to_string(),
            main_symptom: main_symptom.label().to_string(),
            condition: result.condition.clone(),
            confidence: Some(result.confidence),
        }
    }

    /// Confidence for display; legacy entries read as 0
    pub fn confidence_or_default(&self) -> u8 {
        self.confidence.unwrap_or(0)
    }
}

/// Ordered, append-only list of entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries in reverse chronological order
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Read an exported history (a JSON array of entries)
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the history as a pretty JSON array
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
