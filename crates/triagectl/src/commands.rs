//! Command implementations for triagectl

use crate::display::Display;
use crate::form::Prompter;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, info_span, warn};
use triage_common::intake::ADDITIONAL_SYMPTOMS;
use triage_common::render::DISCLAIMER;
use triage_common::{
    evaluate, Choice, DiagnosisResult, History, MainSymptom, Session, SymptomIntake,
};

/// Top-level menu entries of the interactive session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    NewDiagnosis,
    AnalyzeAgain,
    History,
    Quit,
}

impl MenuItem {
    fn label(&self) -> &'static str {
        match self {
            MenuItem::NewDiagnosis => "New Diagnosis",
            MenuItem::AnalyzeAgain => "Analyze more symptoms (same person)",
            MenuItem::History => "History",
            MenuItem::Quit => "Quit",
        }
    }

    /// Items available in the current session state
    fn available(session: &Session) -> Vec<MenuItem> {
        let mut items = vec![MenuItem::NewDiagnosis];
        if session.personal_done() {
            items.push(MenuItem::AnalyzeAgain);
        }
        items.push(MenuItem::History);
        items.push(MenuItem::Quit);
        items
    }
}

/// Run the interactive session until the user quits or input ends
pub fn run_session<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut Prompter<R, W>,
    display: &Display,
    history_limit: usize,
) -> Result<()> {
    let session_id = uuid::Uuid::new_v4();
    let span = info_span!("session", id = %session_id);
    let _guard = span.enter();
    info!("Session started");

    writeln!(prompter.output(), "{}", display.title("Medical Pre-Diagnosis System"))?;
    writeln!(prompter.output(), "{}", display.note(DISCLAIMER))?;

    loop {
        let items = MenuItem::available(session);
        let labels: Vec<&str> = items.iter().map(MenuItem::label).collect();
        writeln!(prompter.output())?;
        let Some(picked) = prompter.ask_menu("Menu", &labels)? else {
            break;
        };

        match items[picked] {
            MenuItem::NewDiagnosis => {
                session.new_diagnosis();
                let Some(person) = prompter.personal_form()? else {
                    debug!("Personal form cancelled");
                    continue;
                };
                session.submit_personal(person);
                diagnose(session, prompter, display)?;
            }
            MenuItem::AnalyzeAgain => diagnose(session, prompter, display)?,
            MenuItem::History => {
                session.show_history();
                debug!(page = ?session.page(), entries = session.history().len(), "Showing history");
                writeln!(prompter.output())?;
                writeln!(prompter.output(), "{}", display.title("Diagnosis History"))?;
                write!(prompter.output(), "{}", display.history(session.history(), history_limit))?;
            }
            MenuItem::Quit => break,
        }
    }

    info!(entries = session.history().len(), "Session ended");
    Ok(())
}

/// Medical form, evaluation and result display for the current person
fn diagnose<R: BufRead, W: Write>(
    session: &mut Session,
    prompter: &mut Prompter<R, W>,
    display: &Display,
) -> Result<()> {
    session.show_diagnosis();
    let Some(intake) = prompter.medical_form()? else {
        debug!("Medical form cancelled");
        return Ok(());
    };
    let symptom = intake.main_symptom;
    warn_if_unmapped(symptom);

    let result = session.submit_medical(intake)?;
    info!(
        symptom = symptom.label(),
        condition = %result.condition,
        confidence = result.confidence,
        "Diagnosis recorded"
    );

    writeln!(prompter.output())?;
    writeln!(prompter.output(), "{}", display.title("Diagnosis Result"))?;
    write!(prompter.output(), "{}", display.result(&result))?;
    Ok(())
}

fn warn_if_unmapped(symptom: MainSymptom) {
    if !symptom.has_rule() {
        warn!(symptom = symptom.label(), "No rule for main symptom, using general observation");
    }
}

/// JSON shape of a one-shot evaluation
#[derive(Debug, Serialize)]
pub struct EvaluateOutput<'a> {
    pub intake: &'a SymptomIntake,
    pub result: &'a DiagnosisResult,
    pub rule_matched: bool,
}

/// Evaluate one intake and print it
pub fn evaluate_once<W: Write>(
    out: &mut W,
    intake: &SymptomIntake,
    display: &Display,
    json: bool,
) -> Result<DiagnosisResult> {
    warn_if_unmapped(intake.main_symptom);
    let result = evaluate(intake);
    debug!(condition = %result.condition, confidence = result.confidence, "Evaluated");

    if json {
        let output = EvaluateOutput {
            intake,
            result: &result,
            rule_matched: intake.main_symptom.has_rule(),
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        write!(out, "{}", display.result(&result))?;
        writeln!(out)?;
        writeln!(out, "{}", display.note(DISCLAIMER))?;
    }
    Ok(result)
}

/// Render an exported history file
pub fn history_file<W: Write>(out: &mut W, path: &Path, display: &Display, limit: usize) -> Result<()> {
    let history = History::load_json(path)
        .with_context(|| format!("Failed to load history from {}", path.display()))?;
    let legacy = history
        .entries()
        .iter()
        .filter(|e| e.confidence.is_none())
        .count();
    if legacy > 0 {
        debug!(legacy, "Entries without confidence shown as 0%");
    }

    writeln!(out, "{}", display.title("Diagnosis History"))?;
    write!(out, "{}", display.history(&history, limit))?;
    Ok(())
}

/// Write a session history export
pub fn export_history(history: &History, path: &Path) -> Result<()> {
    history
        .write_json(path)
        .with_context(|| format!("Failed to export history to {}", path.display()))?;
    info!(path = %path.display(), entries = history.len(), "History exported");
    Ok(())
}

/// List the form choices
pub fn symptoms<W: Write>(out: &mut W, display: &Display) -> Result<()> {
    writeln!(out, "{}", display.title("Main symptoms"))?;
    for symptom in MainSymptom::ALL {
        if symptom.has_rule() {
            writeln!(out, "  {}", symptom.label())?;
        } else {
            writeln!(
                out,
                "  {}  {}",
                symptom.label(),
                display.warn("(no rule: general observation)")
            )?;
        }
    }
    writeln!(out)?;
    writeln!(out, "{}", display.title("Additional symptoms"))?;
    for symptom in ADDITIONAL_SYMPTOMS {
        writeln!(out, "  {}", symptom)?;
    }
    Ok(())
}
