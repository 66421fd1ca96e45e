//! Text rendering of results and history.
//!
//! Deterministic layout; color is added through `Highlight` by the CLI.

use crate::engine::DiagnosisResult;
use crate::history::{History, HistoryEntry};

pub const DISCLAIMER: &str = "This system provides preliminary health guidance only. \
Prioritize consulting a doctor for serious concerns.";

pub const EMPTY_HISTORY: &str = "No previous diagnoses found.";

pub const DIVIDER: &str = "----------------------------------------";

/// Styling hooks for rendered text. The defaults return the text unchanged.
pub trait Highlight {
    fn success(&self, text: &str) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn heading(&self, text: &str) -> String {
        text.to_string()
    }

    fn metric(&self, text: &str) -> String {
        text.to_string()
    }

    fn dimmed(&self, text: &str) -> String {
        text.to_string()
    }
}

/// No styling
pub struct Plain;

impl Highlight for Plain {}

/// Format a diagnosis result
pub fn format_result(result: &DiagnosisResult, hl: &dyn Highlight) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", hl.success(&format!("[RESULT] {}", result.condition))));
    out.push_str(&format!(
        "Confidence Score: {}\n\n",
        hl.metric(&format!("{}%", result.confidence))
    ));

    out.push_str(&format!("{}\n", hl.heading("Prescription")));
    push_bullets(&mut out, &result.prescription, hl);
    out.push('\n');

    out.push_str(&format!("{}\n", hl.heading("Care Guidelines")));
    push_bullets(&mut out, &result.care, hl);
    out.push('\n');

    out.push_str(&format!("{}\n", hl.warning(&format!("[ALERT] {}", result.alert))));
    out
}

pub fn format_result_text(result: &DiagnosisResult) -> String {
    format_result(result, &Plain)
}

fn push_bullets(out: &mut String, items: &[String], hl: &dyn Highlight) {
    if items.is_empty() {
        out.push_str(&format!("  {}\n", hl.dimmed("(none)")));
    }
    for item in items {
        out.push_str(&format!("  - {}\n", item));
    }
}

/// Format one history entry
pub fn format_entry(entry: &HistoryEntry, hl: &dyn Highlight) -> String {
    format!(
        "Date: {}\nName: {}\nMain Symptom: {}\nDiagnosis: {}\nConfidence: {}\n",
        entry.timestamp,
        entry.name,
        entry.main_symptom,
        hl.success(&entry.condition),
        hl.metric(&format!("{}%", entry.confidence_or_default()))
    )
}

/// Format the history newest first; `limit` of 0 shows everything
pub fn format_history(history: &History, limit: usize, hl: &dyn Highlight) -> String {
    if history.is_empty() {
        return format!("{}\n", hl.dimmed(EMPTY_HISTORY));
    }

    let take = if limit == 0 { history.len() } else { limit };
    let divider = format!("{}\n", hl.dimmed(DIVIDER));
    history
        .newest_first()
        .take(take)
        .map(|e| format_entry(e, hl))
        .collect::<Vec<_>>()
        .join(&divider)
}

pub fn format_history_text(history: &History, limit: usize) -> String {
    format_history(history, limit, &Plain)
}
